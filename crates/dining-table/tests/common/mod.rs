//! Shared fixtures: cars, the table layouts rendering them, and a small
//! markup tree for checking HTML output.

#![allow(dead_code)]

use dining_table::prelude::*;
use dining_table::ColumnType;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use serde_json::{json, Value};

// ============================================================================
// Rows
// ============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct Car {
    pub brand: String,
    #[serde(rename = "type")]
    pub model: String,
    pub number_of_doors: u32,
    pub stock: u32,
    pub launch_date: String,
}

impl Record for Car {}

/// A car whose type knows human attribute names.
#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct NamedCar(pub Car);

impl Record for NamedCar {
    fn human_attribute_name(name: &str) -> Option<String> {
        let spaced = name.replace('_', " ");
        let mut chars = spaced.chars();
        chars
            .next()
            .map(|first| first.to_uppercase().chain(chars).collect())
    }
}

/// Rows the car tables can render.
pub trait CarRow: Record + 'static {
    fn car(&self) -> &Car;
}

impl CarRow for Car {
    fn car(&self) -> &Car {
        self
    }
}

impl CarRow for NamedCar {
    fn car(&self) -> &Car {
        &self.0
    }
}

pub fn cars() -> Vec<Car> {
    [
        ("Audi", "A4", 3, 100, "2016-01-01"),
        ("Citroën", "C4 Picasso", 5, 150, "2016-02-01"),
        ("Ferrari", "F12", 3, 2, "2016-03-01"),
    ]
    .into_iter()
    .map(|(brand, model, number_of_doors, stock, launch_date)| Car {
        brand: brand.to_string(),
        model: model.to_string(),
        number_of_doors,
        stock,
        launch_date: launch_date.to_string(),
    })
    .collect()
}

pub fn named_cars() -> Vec<NamedCar> {
    cars().into_iter().map(NamedCar).collect()
}

// ============================================================================
// Tables
// ============================================================================

pub struct CarTable;

impl<R: CarRow> TableDefinition<R> for CarTable {
    fn define<P: Presenter<R>>(&self, table: &mut Table<'_, R, P>) {
        table.column("brand");
        if table.presenter().is(PresenterKind::Csv) {
            table.column("type");
        }
        table.column("number_of_doors").column("stock");
    }
}

pub struct CarTableWithHeader;

impl<R: CarRow> TableDefinition<R> for CarTableWithHeader {
    fn define<P: Presenter<R>>(&self, table: &mut Table<'_, R, P>) {
        table
            .column(Column::new("brand").header("The brand"))
            .column(
                Column::new("number_of_doors").header_with(|_| "The number of doors".to_string()),
            )
            .column(
                Column::new("stock")
                    .header_with(|helpers| helpers.h().link_to("Stock", "http://www.google.com")),
            );
    }
}

pub struct CarTableWithFooter;

impl<R: CarRow> TableDefinition<R> for CarTableWithFooter {
    fn define<P: Presenter<R>>(&self, table: &mut Table<'_, R, P>) {
        table
            .column("brand")
            .column(Column::new("number_of_doors").footer("Total"))
            .column(Column::new("stock").footer_with(stock_total));
    }
}

fn stock_total<R: CarRow>(helpers: &Helpers<'_, R>) -> String {
    let total: u32 = helpers.collection().iter().map(|row| row.car().stock).sum();
    helpers.h().link_to(&format!("Total: {}", total), "#")
}

pub struct CarTableWithoutHeader;

impl<R: CarRow> TableDefinition<R> for CarTableWithoutHeader {
    fn define<P: Presenter<R>>(&self, table: &mut Table<'_, R, P>) {
        table
            .skip_header()
            .skip_footer()
            .column("brand")
            .column(Column::new("number_of_doors").footer("Total"));
    }
}

/// Table options select the launch date rendering.
#[derive(Default)]
pub struct CarTableWithOptions {
    pub normal_launch_date: bool,
    pub date_column_launch_date: bool,
    pub legacy_syntax: bool,
}

impl<R: CarRow> TableDefinition<R> for CarTableWithOptions {
    fn define<P: Presenter<R>>(&self, table: &mut Table<'_, R, P>) {
        table.column(
            Column::new("brand")
                .html(json!({"td": {"class": "center"}, "th": {"class": "center"}}))
                .value_with(|row: &R, _| json!(row.car().brand.to_uppercase())),
        );
        let stock_options = if self.legacy_syntax {
            json!({"td_options": {"class": "left"}, "th_options": {"class": "left"}})
        } else {
            json!({"td": {"class": "left"}, "th": {"class": "left"}})
        };
        table.column(Column::new("stock").html(stock_options));
        if self.normal_launch_date {
            table.column("launch_date");
        }
        if self.date_column_launch_date {
            table.column(Column::new("launch_date").custom(DateColumn));
        }
    }
}

pub struct CarTableWithActions;

impl<R: CarRow> TableDefinition<R> for CarTableWithActions {
    fn define<P: Presenter<R>>(&self, table: &mut Table<'_, R, P>) {
        table.column("brand").column("number_of_doors");
        table.column(
            Column::actions(|_, actions| {
                let h = actions.h();
                actions
                    .action(|_| h.link_to("Show", "#show"))
                    .action(|_| h.link_to("Edit", "#edit"));
            })
            .header("Action")
            .html(json!({"td": {"class": "left"}, "th": {"class": "left"}})),
        );
    }
}

pub struct CarTableWithConfigBlocks;

impl<R: CarRow> TableDefinition<R> for CarTableWithConfigBlocks {
    fn define<P: Presenter<R>>(&self, table: &mut Table<'_, R, P>) {
        if let Some(html) = table.presenter_mut().as_html() {
            html.table_config(|config| {
                config.table.set_class("my-table-class");
                config.thead.set_class("my-thead-class");
                config.tfoot.set_class("my-tfoot-class");
            });
            html.row_config(|config, index, row: Option<&R>| match index {
                RowIndex::Header => {
                    config.tr.set_class("header-tr");
                    config.th.set_class("header-th");
                }
                RowIndex::Footer => {
                    config.tr.set_class("footer-tr");
                    config.td.set_class("footer-td");
                }
                RowIndex::Row(_) => {
                    config.tr.set_class(if index.is_odd() { "odd" } else { "even" });
                    if row.is_some_and(|row| row.car().stock < 10) {
                        config.tr.add_class("lowstock");
                    }
                }
            });
        }

        table.column(Column::new("brand").html(json!({"td": {"class": "left"}})));
        table.column(
            Column::new("number_of_doors")
                .footer("Total")
                .html_with(|config, index, row: Option<&R>| {
                    if !index.is_footer() {
                        config.td.set_class("center");
                    }
                    if row.is_some_and(|row| row.car().number_of_doors == 5) {
                        config.td.add_class("five_doors");
                    }
                }),
        );
        table.column(Column::new("stock").footer_with(stock_total));
    }
}

/// Renders ISO dates as day/month/year without padding.
pub struct DateColumn;

impl DateColumn {
    pub fn localize(date: &str) -> Option<String> {
        let mut parts = date.splitn(3, '-').map(|part| part.parse::<u32>().ok());
        let (year, month, day) = (parts.next()??, parts.next()??, parts.next()??);
        Some(format!("{}/{}/{}", day, month, year))
    }
}

impl<R: CarRow> ColumnType<R> for DateColumn {
    fn value(&self, column: &Column<R>, row: &R, _helpers: &Helpers<'_, R>) -> Value {
        let value = column.attribute_value(row);
        match value.as_str().and_then(DateColumn::localize) {
            Some(localized) => Value::String(localized),
            None => value,
        }
    }
}

// ============================================================================
// Markup
// ============================================================================

/// An element of parsed markup with its direct text.
#[derive(Clone, Debug, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn class(&self) -> Option<&str> {
        self.attribute("class")
    }

    /// Children with the given name, in order.
    pub fn children_named(&self, name: &str) -> Vec<&Element> {
        self.children.iter().filter(|child| child.name == name).collect()
    }

    /// The only child with the given name.
    pub fn child(&self, name: &str) -> &Element {
        let matches = self.children_named(name);
        assert_eq!(matches.len(), 1, "expected one <{}> in <{}>", name, self.name);
        matches[0]
    }

    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|child| child.name.as_str()).collect()
    }
}

/// Parses markup with a single root element.
pub fn parse(markup: &str) -> Element {
    let mut reader = Reader::from_str(markup);
    let mut stack = vec![Element::default()];
    loop {
        match reader.read_event().expect("well-formed markup") {
            Event::Start(start) => stack.push(element(&start)),
            Event::Empty(start) => {
                let empty = element(&start);
                stack.last_mut().unwrap().children.push(empty);
            }
            Event::End(_) => {
                let done = stack.pop().unwrap();
                stack.last_mut().unwrap().children.push(done);
            }
            Event::Text(text) => {
                let text = text.unescape().expect("valid text");
                stack.last_mut().unwrap().text.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    let mut document = stack.pop().unwrap();
    assert!(stack.is_empty(), "unclosed elements");
    assert_eq!(document.children.len(), 1, "expected a single root element");
    document.children.remove(0)
}

fn element(start: &BytesStart<'_>) -> Element {
    let attributes = start
        .attributes()
        .map(|attribute| {
            let attribute = attribute.expect("valid attribute");
            let key = String::from_utf8(attribute.key.as_ref().to_vec()).unwrap();
            let value = attribute.unescape_value().expect("valid value").into_owned();
            (key, value)
        })
        .collect();
    Element {
        name: String::from_utf8(start.name().as_ref().to_vec()).unwrap(),
        attributes,
        ..Element::default()
    }
}

/// Parses a rendered table and checks its overall shape: one `thead`, one
/// `tbody`, at most one `tfoot`, in that order.
pub fn document(markup: &str) -> Element {
    let table = parse(markup);
    assert_eq!(table.name, "table");
    let names = table.child_names();
    assert!(
        names == ["thead", "tbody"] || names == ["thead", "tbody", "tfoot"],
        "unexpected table sections: {:?}",
        names
    );
    table
}

/// The text of each cell of a row.
pub fn cell_texts(row: &Element) -> Vec<&str> {
    row.children.iter().map(|cell| cell.text.as_str()).collect()
}
