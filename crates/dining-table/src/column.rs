//! Column definitions.
//!
//! A [`Column`] knows how to produce a cell value for a row, and how to
//! label itself in the header and footer. Values come from one of:
//!
//! - the row attribute named like the column (the default),
//! - a value block (`value_with`), returned verbatim,
//! - an actions block (`Column::actions`), concatenating per-row fragments,
//! - a custom [`ColumnType`], which may fall back to the above.
//!
//! ```rust
//! use dining_table::{Column, DefaultViewContext, Helpers, PresenterKind};
//! use serde_json::json;
//!
//! let brand: Column<serde_json::Value> = Column::new("brand")
//!     .header("The brand")
//!     .value_with(|car: &serde_json::Value, _| {
//!         car["brand"].as_str().unwrap_or("").to_uppercase().into()
//!     });
//!
//! let cars = vec![json!({"brand": "Audi"})];
//! let helpers = Helpers::new(&DefaultViewContext, &cars, PresenterKind::Html);
//! assert_eq!(brand.value(&cars[0], &helpers), json!("AUDI"));
//! assert_eq!(brand.header_label(&helpers), Some("The brand"));
//! ```

use crate::presenters::{PresenterKind, RowIndex, TagsConfiguration};
use crate::record::Record;
use crate::value::{is_blank, value_to_string};
use crate::view::ViewContext;
use once_cell::unsync::OnceCell;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// Name given to columns created with [`Column::actions`].
pub const ACTIONS_COLUMN: &str = "actions__";

/// Value block: computes a cell from the row.
///
/// Table state comes through the [`Helpers`]; a block needing its own
/// column (to fall back to the attribute, say) is a [`ColumnType`].
pub type ValueFn<T> = dyn Fn(&T, &Helpers<'_, T>) -> Value;

/// Actions block: declares the actions for a row.
pub type ActionsFn<T> = dyn Fn(&T, &mut Actions<'_, T>);

/// Label generator for headers and footers.
pub type LabelFn<T> = dyn Fn(&Helpers<'_, T>) -> String;

/// Per-cell HTML configuration callback.
///
/// Receives a copy of the row configuration that applies to this
/// column's cell only.
pub type CellConfigFn<T> = dyn Fn(&mut TagsConfiguration, RowIndex, Option<&T>);

/// Table state reachable from column blocks, labels and actions.
///
/// Everything returned borrows from the render, not from the `Helpers`
/// value itself, so results can be captured by closures.
pub struct Helpers<'r, T> {
    view: &'r dyn ViewContext,
    collection: &'r [T],
    index: usize,
    presenter: PresenterKind,
}

impl<T> Clone for Helpers<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Helpers<'_, T> {}

impl<'r, T> Helpers<'r, T> {
    /// Creates helpers positioned at the first row.
    pub fn new(view: &'r dyn ViewContext, collection: &'r [T], presenter: PresenterKind) -> Self {
        Helpers {
            view,
            collection,
            index: 0,
            presenter,
        }
    }

    /// Returns a copy positioned at `index`.
    pub fn at(self, index: usize) -> Self {
        Helpers { index, ..self }
    }

    /// The view context.
    pub fn h(&self) -> &'r dyn ViewContext {
        self.view
    }

    /// The view context (long form of [`h`](Self::h)).
    pub fn helpers(&self) -> &'r dyn ViewContext {
        self.view
    }

    /// The whole collection being rendered.
    pub fn collection(&self) -> &'r [T] {
        self.collection
    }

    /// Position of the current row. Stays at the last row while the
    /// footer renders.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The kind of presenter doing the rendering.
    pub fn presenter(&self) -> PresenterKind {
        self.presenter
    }
}

impl<T> fmt::Debug for Helpers<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Helpers")
            .field("rows", &self.collection.len())
            .field("index", &self.index)
            .field("presenter", &self.presenter)
            .finish()
    }
}

/// A header or footer label.
pub enum Label<T> {
    /// A fixed label.
    Text(String),
    /// A label computed from the table helpers at render time.
    Generated(Box<LabelFn<T>>),
}

impl<T> Label<T> {
    fn resolve(&self, helpers: &Helpers<'_, T>) -> String {
        match self {
            Label::Text(text) => text.clone(),
            Label::Generated(generator) => generator(helpers),
        }
    }
}

impl<T> fmt::Debug for Label<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Label::Generated(_) => f.write_str("Generated(..)"),
        }
    }
}

/// Custom column behavior, replacing the value rule of a column.
///
/// Implementations usually start from [`Column::default_value`] and
/// post-process it.
///
/// ```rust
/// use dining_table::{Column, ColumnType, Helpers};
/// use serde_json::Value;
///
/// struct Upcase;
///
/// impl ColumnType<Value> for Upcase {
///     fn value(&self, column: &Column<Value>, row: &Value, helpers: &Helpers<'_, Value>) -> Value {
///         match column.default_value(row, helpers) {
///             Value::String(s) => Value::String(s.to_uppercase()),
///             other => other,
///         }
///     }
/// }
///
/// let column: Column<Value> = Column::new("brand").custom(Upcase);
/// ```
pub trait ColumnType<T> {
    fn value(&self, column: &Column<T>, row: &T, helpers: &Helpers<'_, T>) -> Value;
}

enum Source<T> {
    Attribute,
    Block(Box<ValueFn<T>>),
    Actions(Box<ActionsFn<T>>),
}

/// A table column.
pub struct Column<T> {
    name: String,
    source: Source<T>,
    custom: Option<Box<dyn ColumnType<T>>>,
    header: Option<Label<T>>,
    footer: Option<Label<T>>,
    options: HashMap<PresenterKind, Value>,
    html_config: Option<Box<CellConfigFn<T>>>,
    header_cache: OnceCell<Option<String>>,
    footer_cache: OnceCell<Option<String>>,
}

impl<T: Record> Column<T> {
    /// Creates a column reading the attribute `name` from each row.
    pub fn new(name: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            source: Source::Attribute,
            custom: None,
            header: None,
            footer: None,
            options: HashMap::new(),
            html_config: None,
            header_cache: OnceCell::new(),
            footer_cache: OnceCell::new(),
        }
    }

    /// Creates an actions column.
    ///
    /// The block runs once per row and declares actions through
    /// [`Actions::action`]; the cell is their concatenated output.
    ///
    /// ```rust
    /// use dining_table::Column;
    /// use serde_json::Value;
    ///
    /// let column: Column<Value> = Column::actions(|row: &Value, actions| {
    ///     let h = actions.h();
    ///     actions.action(|_| h.link_to("Show", "#show"));
    ///     if row["editable"] == Value::Bool(true) {
    ///         actions.action(|_| h.link_to("Edit", "#edit"));
    ///     }
    /// })
    /// .header("Action");
    /// ```
    pub fn actions<F>(block: F) -> Self
    where
        F: Fn(&T, &mut Actions<'_, T>) + 'static,
    {
        Column {
            source: Source::Actions(Box::new(block)),
            ..Column::new(ACTIONS_COLUMN)
        }
    }

    /// Computes the cell value with a block instead of the attribute.
    pub fn value_with<F>(mut self, block: F) -> Self
    where
        F: Fn(&T, &Helpers<'_, T>) -> Value + 'static,
    {
        self.source = Source::Block(Box::new(block));
        self
    }

    /// Replaces the value rule with a custom column type.
    pub fn custom(mut self, column_type: impl ColumnType<T> + 'static) -> Self {
        self.custom = Some(Box::new(column_type));
        self
    }

    /// Sets a fixed header label.
    pub fn header(mut self, label: impl Into<String>) -> Self {
        self.header = Some(Label::Text(label.into()));
        self
    }

    /// Sets a header label computed at render time.
    pub fn header_with<F>(mut self, generator: F) -> Self
    where
        F: Fn(&Helpers<'_, T>) -> String + 'static,
    {
        self.header = Some(Label::Generated(Box::new(generator)));
        self
    }

    /// Sets a fixed footer label.
    pub fn footer(mut self, label: impl Into<String>) -> Self {
        self.footer = Some(Label::Text(label.into()));
        self
    }

    /// Sets a footer label computed at render time.
    pub fn footer_with<F>(mut self, generator: F) -> Self
    where
        F: Fn(&Helpers<'_, T>) -> String + 'static,
    {
        self.footer = Some(Label::Generated(Box::new(generator)));
        self
    }

    /// Sets options for one presenter kind.
    pub fn option(mut self, kind: PresenterKind, options: impl Into<Value>) -> Self {
        self.options.insert(kind, options.into());
        self
    }

    /// Sets static HTML cell options, e.g. `json!({"td": {"class": "left"}})`.
    pub fn html(self, options: impl Into<Value>) -> Self {
        self.option(PresenterKind::Html, options)
    }

    /// Sets a per-cell HTML configuration callback.
    pub fn html_with<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut TagsConfiguration, RowIndex, Option<&T>) + 'static,
    {
        self.html_config = Some(Box::new(callback));
        self
    }

    /// The column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value of this column for `row`.
    ///
    /// Custom column types decide on their own; otherwise see
    /// [`default_value`](Self::default_value).
    pub fn value(&self, row: &T, helpers: &Helpers<'_, T>) -> Value {
        match &self.custom {
            Some(custom) => custom.value(self, row, helpers),
            None => self.default_value(row, helpers),
        }
    }

    /// The block or actions result, or the attribute value when the column
    /// has no block. Missing attributes are `Value::Null`.
    pub fn default_value(&self, row: &T, helpers: &Helpers<'_, T>) -> Value {
        match &self.source {
            Source::Attribute => self.attribute_value(row),
            Source::Block(block) => block(row, helpers),
            Source::Actions(block) => {
                let mut actions = Actions::new(row, *helpers);
                block(row, &mut actions);
                Value::String(actions.into_output())
            }
        }
    }

    /// The row attribute named like this column.
    pub fn attribute_value(&self, row: &T) -> Value {
        row.attribute(&self.name).unwrap_or(Value::Null)
    }

    /// The header label, computed on first use.
    ///
    /// Without an explicit label the row type's human attribute name is
    /// used, if it has one.
    pub fn header_label(&self, helpers: &Helpers<'_, T>) -> Option<&str> {
        self.header_cache
            .get_or_init(|| match &self.header {
                Some(label) => Some(label.resolve(helpers)),
                None => T::human_attribute_name(&self.name),
            })
            .as_deref()
    }

    /// The footer label, computed on first use. Absent unless configured.
    pub fn footer_label(&self, helpers: &Helpers<'_, T>) -> Option<&str> {
        self.footer_cache
            .get_or_init(|| self.footer.as_ref().map(|label| label.resolve(helpers)))
            .as_deref()
    }

    /// Options configured for a presenter kind, or an empty map.
    pub fn options_for(&self, kind: PresenterKind) -> Map<String, Value> {
        match self.options.get(&kind) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }

    /// The per-cell HTML callback, if any.
    pub fn html_config(&self) -> Option<&CellConfigFn<T>> {
        self.html_config.as_deref()
    }
}

impl<T: Record> From<&str> for Column<T> {
    fn from(name: &str) -> Self {
        Column::new(name)
    }
}

impl<T: Record> From<String> for Column<T> {
    fn from(name: String) -> Self {
        Column::new(name)
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            Source::Attribute => "attribute",
            Source::Block(_) => "block",
            Source::Actions(_) => "actions",
        };
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("source", &source)
            .field("custom", &self.custom.is_some())
            .field("header", &self.header)
            .field("footer", &self.footer)
            .field("options", &self.options)
            .finish()
    }
}

/// Scope handed to an actions block for one row.
pub struct Actions<'r, T> {
    row: &'r T,
    helpers: Helpers<'r, T>,
    output: String,
}

impl<'r, T> Actions<'r, T> {
    fn new(row: &'r T, helpers: Helpers<'r, T>) -> Self {
        Actions {
            row,
            helpers,
            output: String::new(),
        }
    }

    /// Runs `generator` against the row and appends its text.
    ///
    /// Absent and empty results add nothing.
    pub fn action<F, R>(&mut self, generator: F) -> &mut Self
    where
        F: FnOnce(&T) -> R,
        R: Into<Value>,
    {
        let value = generator(self.row).into();
        if !is_blank(&value) {
            self.output.push_str(&value_to_string(&value));
        }
        self
    }

    /// The view context.
    pub fn h(&self) -> &'r dyn ViewContext {
        self.helpers.h()
    }

    /// The view context (long form of [`h`](Self::h)).
    pub fn helpers(&self) -> &'r dyn ViewContext {
        self.helpers.helpers()
    }

    /// The whole collection being rendered.
    pub fn collection(&self) -> &'r [T] {
        self.helpers.collection()
    }

    /// Position of the current row.
    pub fn index(&self) -> usize {
        self.helpers.index()
    }

    /// The kind of presenter doing the rendering.
    pub fn presenter(&self) -> PresenterKind {
        self.helpers.presenter()
    }

    fn into_output(self) -> String {
        self.output
    }
}
