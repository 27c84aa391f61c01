//! Row-based presenters: CSV text and spreadsheet worksheets.
//!
//! [`SpreadsheetPresenter`] turns every header, body row and footer into
//! an ordered list of cell values and hands it to a [`RowWriter`]. The
//! writer decides the encoding: [`CsvRows`] feeds the `csv` crate,
//! [`WorksheetRows`] appends to a caller-owned [`Worksheet`].

use super::{Merge, Presenter, PresenterKind};
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::table::TableScope;
use crate::value::{label_is_blank, value_to_string};
use crate::view::ViewContext;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Entity replacements applied after markup is stripped from clean values.
const ENTITY_REPLACEMENTS: [(&str, &str); 3] =
    [("&mdash;", "--"), ("&ndash;", "-"), ("&nbsp;", " ")];

/// Destination of spreadsheet rows.
pub trait RowWriter {
    /// What the finished render produces.
    type Output;

    /// The presenter family this writer implements.
    fn kind(&self) -> PresenterKind;

    /// Emits one row.
    fn add_row(&mut self, row: Vec<Value>) -> Result<()>;

    /// Flushes pending rows and hands over the result.
    fn finish(self) -> Result<Self::Output>;
}

/// Presenter producing one value list per row.
///
/// With `clean` enabled, string values have their markup stripped (through
/// the table's [`ViewContext`]) and common dash and space entities
/// replaced, so link-bearing HTML columns export as plain text.
#[derive(Debug)]
pub struct SpreadsheetPresenter<W> {
    writer: W,
    clean: bool,
}

impl<W: RowWriter> SpreadsheetPresenter<W> {
    /// Creates a presenter around any row writer.
    pub fn from_writer(writer: W, clean: bool) -> Self {
        SpreadsheetPresenter { writer, clean }
    }

    /// Whether values are cleaned of markup.
    pub fn is_clean(&self) -> bool {
        self.clean
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn labels(labels: Vec<Option<&str>>) -> Vec<Value> {
        labels
            .into_iter()
            .map(|label| label.map_or(Value::Null, |text| Value::String(text.to_string())))
            .collect()
    }
}

impl<T: Record, W: RowWriter> Presenter<T> for SpreadsheetPresenter<W> {
    type Output = W::Output;

    fn kind(&self) -> PresenterKind {
        self.writer.kind()
    }

    fn render_header(&mut self, table: &TableScope<'_, T>) -> Result<()> {
        let helpers = table.helpers();
        let headers = table
            .columns()
            .iter()
            .map(|column| column.header_label(&helpers))
            .collect();
        self.writer.add_row(Self::labels(headers))
    }

    fn render_row(&mut self, table: &TableScope<'_, T>, row: &T) -> Result<()> {
        let helpers = table.helpers();
        let values = table
            .columns()
            .iter()
            .map(|column| {
                let value = column.value(row, &helpers);
                if self.clean {
                    clean(helpers.h(), value)
                } else {
                    value
                }
            })
            .collect();
        self.writer.add_row(values)
    }

    fn render_footer(&mut self, table: &TableScope<'_, T>) -> Result<()> {
        let helpers = table.helpers();
        let footers: Vec<Option<&str>> = table
            .columns()
            .iter()
            .map(|column| column.footer_label(&helpers))
            .collect();
        if footers.iter().all(|footer| label_is_blank(*footer)) {
            return Ok(());
        }
        self.writer.add_row(Self::labels(footers))
    }

    fn output(self) -> Result<W::Output> {
        self.writer.finish()
    }
}

/// Strips markup from string values. Other values pass through untouched
/// so worksheets keep their types.
fn clean(view: &dyn ViewContext, value: Value) -> Value {
    match value {
        Value::String(text) => {
            let mut plain = view.strip_tags(&text);
            for (entity, replacement) in ENTITY_REPLACEMENTS {
                plain = plain.replace(entity, replacement);
            }
            Value::String(plain)
        }
        other => other,
    }
}

// ============================================================================
// CSV
// ============================================================================

/// Quoting policy for CSV fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// Quote every field.
    Always,
    /// Quote fields only when needed.
    #[default]
    Necessary,
    /// Quote every field that is not a number.
    NonNumeric,
    /// Never quote.
    Never,
}

impl From<QuoteStyle> for csv::QuoteStyle {
    fn from(style: QuoteStyle) -> Self {
        match style {
            QuoteStyle::Always => csv::QuoteStyle::Always,
            QuoteStyle::Necessary => csv::QuoteStyle::Necessary,
            QuoteStyle::NonNumeric => csv::QuoteStyle::NonNumeric,
            QuoteStyle::Never => csv::QuoteStyle::Never,
        }
    }
}

/// CSV dialect. Unset fields fall back to the configured defaults, then to
/// the `csv` crate's defaults (comma, double quote, `\n`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvFormat {
    /// Field separator.
    #[serde(alias = "col_sep", skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
    /// Quote character.
    #[serde(alias = "quote_char", skip_serializing_if = "Option::is_none")]
    pub quote: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_style: Option<QuoteStyle>,
    /// End rows with `\r\n` instead of `\n`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crlf: Option<bool>,
}

impl CsvFormat {
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn quote(mut self, quote: char) -> Self {
        self.quote = Some(quote);
        self
    }

    pub fn quote_style(mut self, style: QuoteStyle) -> Self {
        self.quote_style = Some(style);
        self
    }

    pub fn crlf(mut self, crlf: bool) -> Self {
        self.crlf = Some(crlf);
        self
    }

    fn writer_builder(&self) -> Result<csv::WriterBuilder> {
        let mut builder = csv::WriterBuilder::new();
        if let Some(delimiter) = self.delimiter {
            builder.delimiter(ascii_byte("delimiter", delimiter)?);
        }
        if let Some(quote) = self.quote {
            builder.quote(ascii_byte("quote", quote)?);
        }
        if let Some(style) = self.quote_style {
            builder.quote_style(style.into());
        }
        if self.crlf == Some(true) {
            builder.terminator(csv::Terminator::CRLF);
        }
        Ok(builder)
    }
}

impl Merge for CsvFormat {
    fn merge(&self, overrides: &Self) -> Self {
        CsvFormat {
            delimiter: overrides.delimiter.or(self.delimiter),
            quote: overrides.quote.or(self.quote),
            quote_style: overrides.quote_style.or(self.quote_style),
            crlf: overrides.crlf.or(self.crlf),
        }
    }
}

fn ascii_byte(option: &'static str, value: char) -> Result<u8> {
    u8::try_from(value)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(Error::NonAsciiCsvOption { option, value })
}

/// Options of the CSV presenter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Strip markup from string values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean: Option<bool>,
    /// CSV dialect.
    pub csv: CsvFormat,
}

impl CsvOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = Some(clean);
        self
    }

    pub fn format(mut self, format: CsvFormat) -> Self {
        self.csv = format;
        self
    }
}

impl Merge for CsvOptions {
    fn merge(&self, overrides: &Self) -> Self {
        CsvOptions {
            clean: overrides.clean.or(self.clean),
            csv: self.csv.merge(&overrides.csv),
        }
    }
}

/// Row writer encoding rows as CSV text.
pub struct CsvRows {
    writer: csv::Writer<Vec<u8>>,
}

impl CsvRows {
    pub fn new(format: &CsvFormat) -> Result<Self> {
        Ok(CsvRows {
            writer: format.writer_builder()?.from_writer(Vec::new()),
        })
    }
}

impl std::fmt::Debug for CsvRows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvRows").finish_non_exhaustive()
    }
}

impl RowWriter for CsvRows {
    type Output = String;

    fn kind(&self) -> PresenterKind {
        PresenterKind::Csv
    }

    fn add_row(&mut self, row: Vec<Value>) -> Result<()> {
        self.writer
            .write_record(row.iter().map(value_to_string))?;
        Ok(())
    }

    fn finish(self) -> Result<String> {
        let bytes = self.writer.into_inner()?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// Presenter producing CSV text.
///
/// ```rust
/// use dining_table::{Column, CsvFormat, CsvOptions, CsvPresenter, DefaultViewContext, Table};
/// use serde_json::json;
///
/// let cars = vec![json!({"brand": "Audi", "doors": 3})];
/// let presenter = CsvPresenter::new(CsvOptions::new().format(CsvFormat::default().delimiter(';')))?;
/// let mut table = Table::with_presenter(&cars, &DefaultViewContext, presenter);
/// table
///     .column(Column::new("brand").header("Brand"))
///     .column(Column::new("doors").header("Doors"));
/// assert_eq!(table.render()?, "Brand;Doors\nAudi;3\n");
/// # Ok::<(), dining_table::Error>(())
/// ```
pub type CsvPresenter = SpreadsheetPresenter<CsvRows>;

impl SpreadsheetPresenter<CsvRows> {
    /// Creates a CSV presenter from its own options only.
    pub fn new(options: CsvOptions) -> Result<Self> {
        let writer = CsvRows::new(&options.csv)?;
        Ok(Self::from_writer(writer, options.clean.unwrap_or(false)))
    }

    /// Creates a CSV presenter whose options are layered over the
    /// configured CSV defaults.
    pub fn with_configuration(configuration: &Configuration, options: CsvOptions) -> Result<Self> {
        Self::new(configuration.csv_presenter.default_options.merge(&options))
    }
}

// ============================================================================
// Worksheets
// ============================================================================

/// A worksheet rows can be appended to, typically an adapter over an XLSX
/// writer.
///
/// `Vec<Vec<Value>>` implements it as an in-memory sheet.
pub trait Worksheet {
    type Error: std::error::Error + Send + Sync + 'static;

    fn add_row(&mut self, row: Vec<Value>) -> std::result::Result<(), Self::Error>;
}

impl Worksheet for Vec<Vec<Value>> {
    type Error = std::convert::Infallible;

    fn add_row(&mut self, row: Vec<Value>) -> std::result::Result<(), Self::Error> {
        self.push(row);
        Ok(())
    }
}

/// Options of the Excel presenter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcelOptions {
    /// Strip markup from string values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean: Option<bool>,
}

impl ExcelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = Some(clean);
        self
    }
}

impl Merge for ExcelOptions {
    fn merge(&self, overrides: &Self) -> Self {
        ExcelOptions {
            clean: overrides.clean.or(self.clean),
        }
    }
}

/// Row writer appending to a borrowed worksheet.
#[derive(Debug)]
pub struct WorksheetRows<'w, S> {
    sheet: &'w mut S,
}

impl<S: Worksheet> RowWriter for WorksheetRows<'_, S> {
    type Output = ();

    fn kind(&self) -> PresenterKind {
        PresenterKind::Xlsx
    }

    fn add_row(&mut self, row: Vec<Value>) -> Result<()> {
        self.sheet
            .add_row(row)
            .map_err(|e| Error::Worksheet(Box::new(e)))
    }

    fn finish(self) -> Result<()> {
        Ok(())
    }
}

/// Presenter appending rows to a caller-owned worksheet. Rendering
/// returns `()`; the result is the filled worksheet.
///
/// ```rust
/// use dining_table::{Column, DefaultViewContext, ExcelOptions, ExcelPresenter, Table};
/// use serde_json::{json, Value};
///
/// let cars = vec![json!({"brand": "Audi", "doors": 3})];
/// let mut sheet: Vec<Vec<Value>> = Vec::new();
/// let presenter = ExcelPresenter::new(&mut sheet, ExcelOptions::new());
/// let mut table = Table::with_presenter(&cars, &DefaultViewContext, presenter);
/// table.column(Column::new("brand").header("Brand")).column("doors");
/// table.render()?;
///
/// assert_eq!(sheet, vec![vec![json!("Brand"), Value::Null], vec![json!("Audi"), json!(3)]]);
/// # Ok::<(), dining_table::Error>(())
/// ```
pub type ExcelPresenter<'w, S> = SpreadsheetPresenter<WorksheetRows<'w, S>>;

impl<'w, S: Worksheet> SpreadsheetPresenter<WorksheetRows<'w, S>> {
    /// Creates an Excel presenter from its own options only.
    pub fn new(worksheet: &'w mut S, options: ExcelOptions) -> Self {
        Self::from_writer(
            WorksheetRows { sheet: worksheet },
            options.clean.unwrap_or(false),
        )
    }

    /// Creates an Excel presenter whose options are layered over the
    /// configured Excel defaults.
    pub fn with_configuration(
        configuration: &Configuration,
        worksheet: &'w mut S,
        options: ExcelOptions,
    ) -> Self {
        Self::new(
            worksheet,
            configuration.excel_presenter.default_options.merge(&options),
        )
    }
}
