//! Row objects.
//!
//! Any serializable type can be a row. Attribute lookup serializes the row
//! and reads the named field, so a `#[derive(Serialize)]` struct works out
//! of the box; types with expensive serialization can override
//! [`Record::attribute`] with direct field access.

use serde::Serialize;
use serde_json::{Map, Value};

/// A row object a table can render.
///
/// # Example
///
/// ```rust
/// use dining_table::{humanize, Record};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Car {
///     brand: String,
///     number_of_doors: u8,
/// }
///
/// impl Record for Car {
///     fn human_attribute_name(name: &str) -> Option<String> {
///         Some(humanize(name))
///     }
/// }
///
/// let car = Car { brand: "Audi".into(), number_of_doors: 3 };
/// assert_eq!(car.attribute("brand"), Some("Audi".into()));
/// assert_eq!(car.attribute("stock"), None);
/// assert_eq!(Car::human_attribute_name("number_of_doors").unwrap(), "Number of doors");
/// ```
pub trait Record: Serialize {
    /// Looks up an attribute by name. `None` means the row has no such
    /// attribute; the cell renders empty.
    ///
    /// The default serializes the whole row on every call, and a render
    /// calls it once per attribute cell, so a table of `r` rows and `c`
    /// attribute columns serializes a row `r * c` times. Wide rows or large
    /// tables should override this with direct field access.
    fn attribute(&self, name: &str) -> Option<Value> {
        match serde_json::to_value(self).ok()? {
            Value::Object(mut map) => map.remove(name),
            _ => None,
        }
    }

    /// Human-readable label for an attribute, used as the default column
    /// header. Types without one leave headers blank.
    fn human_attribute_name(_name: &str) -> Option<String>
    where
        Self: Sized,
    {
        None
    }
}

impl Record for Value {
    fn attribute(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Record for Map<String, Value> {
    fn attribute(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl<R: Record> Record for &R {
    fn attribute(&self, name: &str) -> Option<Value> {
        (**self).attribute(name)
    }

    fn human_attribute_name(name: &str) -> Option<String> {
        R::human_attribute_name(name)
    }
}

/// Turns an attribute name into a label: underscores become spaces, a
/// trailing `_id` is dropped and only the first letter is capitalized.
///
/// `humanize("number_of_doors") == "Number of doors"`.
pub fn humanize(name: &str) -> String {
    let name = name.strip_suffix("_id").unwrap_or(name);
    let spaced = name.replace('_', " ").trim().to_lowercase();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
