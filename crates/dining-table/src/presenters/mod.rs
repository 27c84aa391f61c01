//! Output formats.
//!
//! A [`Presenter`] is driven through the table lifecycle by
//! [`Table::render`](crate::Table::render):
//!
//! ```text
//! start_table → render_header? → start_body → render_row × N
//!             → end_body → render_footer? → end_table → output
//! ```
//!
//! | Presenter | Kind | Output |
//! |-----------|------|--------|
//! | [`HtmlPresenter`] | `html` | markup `String` |
//! | [`CsvPresenter`] | `csv` | delimited text `String` |
//! | [`ExcelPresenter`] | `xlsx` | rows appended to a caller-owned [`Worksheet`] |
//!
//! Custom formats either implement [`Presenter`] directly or plug a
//! [`RowWriter`] into [`SpreadsheetPresenter`].

mod html;
mod spreadsheet;
mod tags;

pub use html::{HtmlOptions, HtmlPresenter, RowConfigFn, RowIndex, TableConfigFn, WrapOptions};
pub use spreadsheet::{
    CsvFormat, CsvOptions, CsvPresenter, CsvRows, ExcelOptions, ExcelPresenter, QuoteStyle,
    RowWriter, SpreadsheetPresenter, Worksheet, WorksheetRows,
};
pub use tags::{Tag, TagConfiguration, TagsConfiguration};

use crate::error::Result;
use crate::record::Record;
use crate::table::TableScope;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a presenter family.
///
/// Column options and process-wide defaults are keyed by kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenterKind {
    Html,
    Csv,
    Xlsx,
}

impl PresenterKind {
    /// The short identifier used for column options (`html`, `csv`, `xlsx`).
    pub fn identifier(&self) -> &'static str {
        match self {
            PresenterKind::Html => "html",
            PresenterKind::Csv => "csv",
            PresenterKind::Xlsx => "xlsx",
        }
    }

    /// The key of this presenter's section in a
    /// [`Configuration`](crate::Configuration) document.
    pub fn configuration_key(&self) -> &'static str {
        match self {
            PresenterKind::Html => "html_presenter",
            PresenterKind::Csv => "csv_presenter",
            PresenterKind::Xlsx => "excel_presenter",
        }
    }
}

impl fmt::Display for PresenterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Layered options: `base.merge(&overrides)` returns a new value where
/// everything set in `overrides` wins and everything else comes from `base`.
pub trait Merge {
    fn merge(&self, overrides: &Self) -> Self;
}

/// The render lifecycle contract.
///
/// Lifecycle steps without output in a given format have no-op defaults.
/// `kind`, the header/row/footer steps and `output` must be provided.
pub trait Presenter<T: Record> {
    /// What a finished render produces.
    type Output;

    /// The presenter family.
    fn kind(&self) -> PresenterKind;

    /// Returns true if this presenter is of the given kind.
    fn is(&self, kind: PresenterKind) -> bool {
        self.kind() == kind
    }

    fn start_table(&mut self, _table: &TableScope<'_, T>) -> Result<()> {
        Ok(())
    }

    fn render_header(&mut self, table: &TableScope<'_, T>) -> Result<()>;

    fn start_body(&mut self, _table: &TableScope<'_, T>) -> Result<()> {
        Ok(())
    }

    /// Renders one body row. The scope's index is the row's position.
    fn render_row(&mut self, table: &TableScope<'_, T>, row: &T) -> Result<()>;

    fn end_body(&mut self, _table: &TableScope<'_, T>) -> Result<()> {
        Ok(())
    }

    fn render_footer(&mut self, table: &TableScope<'_, T>) -> Result<()>;

    fn end_table(&mut self, _table: &TableScope<'_, T>) -> Result<()> {
        Ok(())
    }

    /// Finishes the render and hands over the result.
    fn output(self) -> Result<Self::Output>
    where
        Self: Sized;

    /// Access to HTML-specific configuration hooks, for table definitions
    /// that are generic over their presenter.
    fn as_html(&mut self) -> Option<&mut HtmlPresenter<T>> {
        None
    }
}
