//! # Dining Table - Declarative Tables for HTML, CSV and Spreadsheets
//!
//! `dining-table` turns a collection of row objects into a table. Columns
//! are declared once; a presenter decides the output format, so the same
//! definition renders an HTML `<table>`, CSV text, or rows appended to a
//! spreadsheet worksheet.
//!
//! ## Core Concepts
//!
//! - [`Record`]: any `Serialize` type; attributes are looked up by name
//! - [`Column`]: a value rule plus header and footer labels and per-format options
//! - [`Table`]: a collection, its columns, and the presenter that renders them
//! - [`TableDefinition`]: a reusable, presenter-agnostic table layout
//! - [`Presenter`]: the output format ([`HtmlPresenter`], [`CsvPresenter`], [`ExcelPresenter`])
//! - [`Configuration`]: application-wide default options per presenter kind
//!
//! ## Quick Start
//!
//! ```rust
//! use dining_table::prelude::*;
//! use serde::Serialize;
//! use serde_json::json;
//!
//! #[derive(Serialize)]
//! struct Car {
//!     brand: String,
//!     stock: u32,
//! }
//!
//! impl Record for Car {
//!     fn human_attribute_name(name: &str) -> Option<String> {
//!         Some(humanize(name))
//!     }
//! }
//!
//! struct CarTable;
//!
//! impl TableDefinition<Car> for CarTable {
//!     fn define<P: Presenter<Car>>(&self, table: &mut Table<'_, Car, P>) {
//!         table
//!             .column(Column::new("brand").html(json!({"td": {"class": "left"}})))
//!             .column(Column::new("stock").footer_with(|helpers: &Helpers<'_, Car>| {
//!                 let total: u32 = helpers.collection().iter().map(|car| car.stock).sum();
//!                 format!("Total: {}", total)
//!             }))
//!             .actions(|_, actions| {
//!                 let h = actions.h();
//!                 actions.action(|_| h.link_to("Show", "#show"));
//!             });
//!     }
//! }
//!
//! let cars = vec![
//!     Car { brand: "Audi".into(), stock: 100 },
//!     Car { brand: "Fiat".into(), stock: 2 },
//! ];
//!
//! let html = CarTable.render_html(&cars, &DefaultViewContext)?;
//! assert!(html.starts_with("<table><thead><tr><th>Brand</th><th>Stock</th><th>Actions</th></tr></thead>"));
//! assert!(html.contains("<td class=\"left\">Audi</td><td>100</td><td><a href=\"#show\">Show</a></td>"));
//! assert!(html.ends_with("<tfoot><tr><td class=\"left\"></td><td>Total: 102</td><td></td></tr></tfoot></table>"));
//!
//! let csv = CarTable.render_with(
//!     &cars,
//!     &DefaultViewContext,
//!     CsvPresenter::new(CsvOptions::new().clean(true))?,
//! )?;
//! assert_eq!(csv, "Brand,Stock,Actions\nAudi,100,Show\nFiat,2,Show\n,Total: 102,\n");
//! # Ok::<(), dining_table::Error>(())
//! ```
//!
//! ## Configuring HTML
//!
//! Tag attributes are layered, later layers winning per attribute:
//! [`Configuration`] defaults, presenter options, the presenter's
//! `table_config` callback, its `row_config` callback, then column
//! options. See [`presenters`] for the lifecycle and
//! [`TagsConfiguration`] for the tag slots.
//!
//! Cell contents and attribute values are written as given. Rows and
//! labels that carry user input must be escaped before they reach the
//! table.

pub mod column;
pub mod config;
mod error;
pub mod presenters;
pub mod record;
pub mod table;
mod value;
pub mod view;

// Error type
pub use error::{Error, Result};

// Column exports
pub use column::{Actions, Column, ColumnType, Helpers, Label, ACTIONS_COLUMN};

// Configuration exports
pub use config::{Configuration, PresenterConfiguration};

// Presenter exports
pub use presenters::{
    CsvFormat, CsvOptions, CsvPresenter, ExcelOptions, ExcelPresenter, HtmlOptions,
    HtmlPresenter, Merge, Presenter, PresenterKind, QuoteStyle, RowIndex, RowWriter,
    SpreadsheetPresenter, Tag, TagConfiguration, TagsConfiguration, Worksheet, WrapOptions,
};

// Row and view exports
pub use record::{humanize, Record};
pub use view::{DefaultViewContext, ViewContext};

// Table exports
pub use table::{Table, TableDefinition, TableScope};

// Utility exports
pub use value::{is_blank, value_to_string};

/// Common imports for table definitions.
///
/// ```rust
/// use dining_table::prelude::*;
///
/// let rows = vec![serde_json::json!({"name": "Audi"})];
/// let mut table = Table::new(&rows, &DefaultViewContext);
/// table.column("name");
/// assert!(table.render()?.contains("<td>Audi</td>"));
/// # Ok::<(), dining_table::Error>(())
/// ```
pub mod prelude {
    pub use crate::{
        humanize, Column, Configuration, CsvOptions, CsvPresenter, DefaultViewContext,
        ExcelOptions, ExcelPresenter, Helpers, HtmlOptions, HtmlPresenter, Presenter,
        PresenterKind, Record, RowIndex, Table, TableDefinition, Tag, ViewContext,
    };
}
