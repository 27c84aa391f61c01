//! HTML table presenter.
//!
//! Markup is built by appending open tags, cell contents and close tags to
//! a string. Attributes for every tag come from a [`TagsConfiguration`]
//! resolved in layers:
//!
//! 1. presenter defaults from the [`Configuration`],
//! 2. the presenter's own [`HtmlOptions`],
//! 3. the table callback ([`HtmlPresenter::table_config`]), once per render,
//! 4. the row callback ([`HtmlPresenter::row_config`]), once per header,
//!    body row and footer,
//! 5. column options ([`Column::html`] / [`Column::html_with`]), per cell.
//!
//! Cell contents and attribute values are written verbatim: the presenter
//! treats everything it receives as markup the caller has already escaped.

use super::tags::{Tag, TagConfiguration, TagsConfiguration};
use super::{Merge, Presenter, PresenterKind};
use crate::column::Column;
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::table::TableScope;
use crate::value::{label_is_blank, value_to_string};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use tracing::warn;

/// Callback adjusting the table-wide configuration.
pub type TableConfigFn = dyn Fn(&mut TagsConfiguration);

/// Callback adjusting the configuration of one header, body or footer row.
pub type RowConfigFn<T> = dyn Fn(&mut TagsConfiguration, RowIndex, Option<&T>);

/// Keys of [`HtmlOptions`] that are never rendered as attributes.
const SKIPPED_ATTRIBUTES: [&str; 1] = ["wrap"];

/// Which row a configuration callback is being asked about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowIndex {
    Header,
    Footer,
    /// A body row, by position in the collection.
    Row(usize),
}

impl RowIndex {
    pub fn is_header(&self) -> bool {
        matches!(self, RowIndex::Header)
    }

    pub fn is_footer(&self) -> bool {
        matches!(self, RowIndex::Footer)
    }

    /// The body row position, if this is a body row.
    pub fn row(&self) -> Option<usize> {
        match self {
            RowIndex::Row(index) => Some(*index),
            _ => None,
        }
    }

    /// True for body rows at odd positions (the second, fourth, ...).
    pub fn is_odd(&self) -> bool {
        self.row().is_some_and(|index| index % 2 == 1)
    }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIndex::Header => f.write_str("header"),
            RowIndex::Footer => f.write_str("footer"),
            RowIndex::Row(index) => write!(f, "{}", index),
        }
    }
}

/// An element wrapped around the table, e.g. a responsive `div`.
///
/// ```rust
/// use dining_table::presenters::WrapOptions;
///
/// let wrap: WrapOptions =
///     serde_json::from_str(r#"{"tag": "div", "class": "table-responsive"}"#).unwrap();
/// assert_eq!(wrap.tag, "div");
/// assert_eq!(wrap.attributes.class(), Some("table-responsive"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapOptions {
    /// Element name.
    #[serde(default = "default_wrap_tag")]
    pub tag: String,
    /// Attributes of the wrapping element.
    #[serde(flatten)]
    pub attributes: TagConfiguration,
}

fn default_wrap_tag() -> String {
    "div".to_string()
}

impl WrapOptions {
    /// Wraps the table in `tag` with no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        WrapOptions {
            tag: tag.into(),
            attributes: TagConfiguration::new(),
        }
    }

    /// Sets an attribute of the wrapping element.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(key, value);
        self
    }

    /// Sets the class of the wrapping element.
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attribute("class", class)
    }
}

/// Options of the HTML presenter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlOptions {
    /// Attributes per tag.
    pub tags: TagsConfiguration,
    /// Optional element around the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<WrapOptions>,
    /// Deprecated: table class. Use `tags.table.class` instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl HtmlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the tag configuration.
    pub fn tags(mut self, tags: TagsConfiguration) -> Self {
        self.tags = tags;
        self
    }

    /// Sets one attribute on one tag.
    pub fn attribute(mut self, tag: Tag, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.get_mut(tag).set(key, value);
        self
    }

    /// Wraps the table in another element.
    pub fn wrap(mut self, wrap: WrapOptions) -> Self {
        self.wrap = Some(wrap);
        self
    }

    /// Reads options from a JSON value such as
    /// `{"tags": {"table": {"class": "table"}}, "wrap": {"tag": "div"}}`.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::invalid_options("HTML presenter", e))
    }
}

impl Merge for HtmlOptions {
    fn merge(&self, overrides: &Self) -> Self {
        HtmlOptions {
            tags: self.tags.merge(&overrides.tags),
            wrap: overrides.wrap.clone().or_else(|| self.wrap.clone()),
            class: overrides.class.clone().or_else(|| self.class.clone()),
        }
    }
}

/// Renders a table as an HTML string.
///
/// ```rust
/// use dining_table::{Column, DefaultViewContext, HtmlPresenter, Table};
/// use serde_json::json;
///
/// let cars = vec![json!({"brand": "Audi", "stock": 100})];
/// let mut presenter = HtmlPresenter::default();
/// presenter.row_config(|config, index, _| {
///     if index.is_odd() {
///         config.tr.set_class("odd");
///     }
/// });
///
/// let mut table = Table::with_presenter(&cars, &DefaultViewContext, presenter);
/// table.column(Column::new("brand").header("Brand"));
/// table.column(Column::new("stock").header("Stock").html(json!({"td": {"class": "number"}})));
///
/// assert_eq!(
///     table.render().unwrap(),
///     "<table><thead><tr><th>Brand</th><th>Stock</th></tr></thead>\
///      <tbody><tr><td>Audi</td><td class=\"number\">100</td></tr></tbody></table>"
/// );
/// ```
pub struct HtmlPresenter<T> {
    options: HtmlOptions,
    table_config: Option<Box<TableConfigFn>>,
    row_config: Option<Box<RowConfigFn<T>>>,
    table_tags: TagsConfiguration,
    tags: TagsConfiguration,
    column_tags: Vec<Option<TagsConfiguration>>,
    output: String,
}

impl<T: Record> HtmlPresenter<T> {
    /// Creates a presenter from its own options only.
    pub fn new(options: HtmlOptions) -> Self {
        HtmlPresenter {
            options,
            table_config: None,
            row_config: None,
            table_tags: TagsConfiguration::new(),
            tags: TagsConfiguration::new(),
            column_tags: Vec::new(),
            output: String::new(),
        }
    }

    /// Creates a presenter whose options are layered over the configured
    /// HTML defaults.
    pub fn with_configuration(configuration: &Configuration, options: HtmlOptions) -> Self {
        Self::new(
            configuration
                .html_presenter
                .default_options
                .merge(&options),
        )
    }

    /// The effective options.
    pub fn options(&self) -> &HtmlOptions {
        &self.options
    }

    /// Registers a callback adjusting the table-wide configuration. It runs
    /// once at the start of every render.
    pub fn table_config<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&mut TagsConfiguration) + 'static,
    {
        self.table_config = Some(Box::new(callback));
        self
    }

    /// Registers a callback adjusting each row's configuration. It runs
    /// for the header ([`RowIndex::Header`], no row), every body row and
    /// the footer ([`RowIndex::Footer`], no row).
    pub fn row_config<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&mut TagsConfiguration, RowIndex, Option<&T>) + 'static,
    {
        self.row_config = Some(Box::new(callback));
        self
    }

    fn set_up_configuration(&mut self, columns: &[Column<T>]) -> Result<()> {
        self.table_tags = self.options.tags.clone();
        if let Some(callback) = &self.table_config {
            callback(&mut self.table_tags);
        }
        self.tags = self.table_tags.clone();
        self.column_tags = columns
            .iter()
            .map(column_tags)
            .collect::<Result<Vec<_>>>()?;
        Ok(())
    }

    fn set_up_row_configuration(&mut self, index: RowIndex, row: Option<&T>) {
        self.tags = self.table_tags.clone();
        if let Some(callback) = &self.row_config {
            callback(&mut self.tags, index, row);
        }
    }

    fn table_attributes(&self) -> Cow<'_, TagConfiguration> {
        if !self.tags.table.is_empty() {
            return Cow::Borrowed(&self.tags.table);
        }
        match &self.options.class {
            Some(class) => {
                warn!(
                    "HTML presenter option \"class\" is deprecated, set the table class \
                     through tags.table.class instead"
                );
                Cow::Owned(std::iter::once(("class", class.as_str())).collect())
            }
            None => Cow::Borrowed(&self.tags.table),
        }
    }
}

impl<T: Record> Default for HtmlPresenter<T> {
    fn default() -> Self {
        Self::new(HtmlOptions::default())
    }
}

impl<T> fmt::Debug for HtmlPresenter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlPresenter")
            .field("options", &self.options)
            .field("table_config", &self.table_config.is_some())
            .field("row_config", &self.row_config.is_some())
            .field("output", &self.output)
            .finish()
    }
}

impl<T: Record> Presenter<T> for HtmlPresenter<T> {
    type Output = String;

    fn kind(&self) -> PresenterKind {
        PresenterKind::Html
    }

    fn start_table(&mut self, table: &TableScope<'_, T>) -> Result<()> {
        self.set_up_configuration(table.columns())?;
        if let Some(wrap) = &self.options.wrap {
            push_start_tag(&mut self.output, &wrap.tag, &wrap.attributes);
        }
        let attributes = self.table_attributes().into_owned();
        push_start_tag(&mut self.output, Tag::Table.name(), &attributes);
        Ok(())
    }

    fn render_header(&mut self, table: &TableScope<'_, T>) -> Result<()> {
        self.set_up_row_configuration(RowIndex::Header, None);
        push_start_tag(&mut self.output, Tag::Thead.name(), &self.tags.thead);
        push_start_tag(&mut self.output, Tag::Tr.name(), &self.tags.tr);
        let helpers = table.helpers();
        for (position, column) in table.columns().iter().enumerate() {
            let label = column.header_label(&helpers).unwrap_or_default();
            let configuration = cell_configuration(
                &self.tags,
                self.column_tags.get(position),
                column,
                RowIndex::Header,
                None,
            );
            push_cell(&mut self.output, Tag::Th, &configuration.th, label);
        }
        push_end_tag(&mut self.output, Tag::Tr.name());
        push_end_tag(&mut self.output, Tag::Thead.name());
        Ok(())
    }

    fn start_body(&mut self, _table: &TableScope<'_, T>) -> Result<()> {
        push_start_tag(&mut self.output, Tag::Tbody.name(), &self.tags.tbody);
        Ok(())
    }

    fn render_row(&mut self, table: &TableScope<'_, T>, row: &T) -> Result<()> {
        let index = RowIndex::Row(table.index());
        self.set_up_row_configuration(index, Some(row));
        push_start_tag(&mut self.output, Tag::Tr.name(), &self.tags.tr);
        let helpers = table.helpers();
        for (position, column) in table.columns().iter().enumerate() {
            let value = column.value(row, &helpers);
            let configuration = cell_configuration(
                &self.tags,
                self.column_tags.get(position),
                column,
                index,
                Some(row),
            );
            push_cell(&mut self.output, Tag::Td, &configuration.td, &value_to_string(&value));
        }
        push_end_tag(&mut self.output, Tag::Tr.name());
        Ok(())
    }

    fn end_body(&mut self, _table: &TableScope<'_, T>) -> Result<()> {
        push_end_tag(&mut self.output, Tag::Tbody.name());
        Ok(())
    }

    fn render_footer(&mut self, table: &TableScope<'_, T>) -> Result<()> {
        self.set_up_row_configuration(RowIndex::Footer, None);
        let helpers = table.helpers();
        let footers: Vec<Option<&str>> = table
            .columns()
            .iter()
            .map(|column| column.footer_label(&helpers))
            .collect();
        if footers.iter().all(|footer| label_is_blank(*footer)) {
            return Ok(());
        }

        push_start_tag(&mut self.output, Tag::Tfoot.name(), &self.tags.tfoot);
        push_start_tag(&mut self.output, Tag::Tr.name(), &self.tags.tr);
        for (position, (column, footer)) in table.columns().iter().zip(&footers).enumerate() {
            let configuration = cell_configuration(
                &self.tags,
                self.column_tags.get(position),
                column,
                RowIndex::Footer,
                None,
            );
            push_cell(
                &mut self.output,
                Tag::Td,
                &configuration.td,
                footer.unwrap_or_default(),
            );
        }
        push_end_tag(&mut self.output, Tag::Tr.name());
        push_end_tag(&mut self.output, Tag::Tfoot.name());
        Ok(())
    }

    fn end_table(&mut self, _table: &TableScope<'_, T>) -> Result<()> {
        push_end_tag(&mut self.output, Tag::Table.name());
        if let Some(wrap) = &self.options.wrap {
            push_end_tag(&mut self.output, &wrap.tag);
        }
        Ok(())
    }

    fn output(self) -> Result<String> {
        Ok(self.output)
    }

    fn as_html(&mut self) -> Option<&mut HtmlPresenter<T>> {
        Some(self)
    }
}

/// Reads a column's static HTML options into a tag configuration.
///
/// Accepts `{"td": {..}, "th": {..}}` as well as the nested
/// `{"tags": {..}}` form, and renames the legacy `td_options` /
/// `th_options` keys.
fn column_tags<T: Record>(column: &Column<T>) -> Result<Option<TagsConfiguration>> {
    let mut options = column.options_for(PresenterKind::Html);
    if options.is_empty() {
        return Ok(None);
    }
    if let Some(Value::Object(tags)) = options.get("tags") {
        options = tags.clone();
    }

    let legacy = options.contains_key("td_options") || options.contains_key("th_options");
    if legacy {
        warn!(
            column = column.name(),
            "column options \"th_options\" and \"td_options\" are deprecated, \
             use \"th\" and \"td\" instead"
        );
    }
    let normalized: Map<String, Value> = options
        .into_iter()
        .map(|(key, value)| match key.as_str() {
            "td_options" => ("td".to_string(), value),
            "th_options" => ("th".to_string(), value),
            _ => (key, value),
        })
        .collect();

    serde_json::from_value(Value::Object(normalized))
        .map(Some)
        .map_err(|e| Error::invalid_options(format!("column '{}'", column.name()), e))
}

/// The configuration for one cell: the row configuration, overlaid with
/// the column's static options, then adjusted by its callback.
fn cell_configuration<'c, T>(
    row_tags: &'c TagsConfiguration,
    static_tags: Option<&Option<TagsConfiguration>>,
    column: &Column<T>,
    index: RowIndex,
    row: Option<&T>,
) -> Cow<'c, TagsConfiguration>
where
    T: Record,
{
    let mut configuration = match static_tags {
        Some(Some(tags)) => Cow::Owned(row_tags.merge(tags)),
        _ => Cow::Borrowed(row_tags),
    };
    if let Some(callback) = column.html_config() {
        callback(configuration.to_mut(), index, row);
    }
    configuration
}

fn push_attributes(output: &mut String, attributes: &TagConfiguration) {
    for (key, value) in attributes.iter() {
        if SKIPPED_ATTRIBUTES.contains(&key) {
            continue;
        }
        output.push(' ');
        output.push_str(key);
        output.push_str("=\"");
        output.push_str(value);
        output.push('"');
    }
}

fn push_start_tag(output: &mut String, tag: &str, attributes: &TagConfiguration) {
    output.push('<');
    output.push_str(tag);
    push_attributes(output, attributes);
    output.push('>');
}

fn push_end_tag(output: &mut String, tag: &str) {
    output.push_str("</");
    output.push_str(tag);
    output.push('>');
}

fn push_cell(output: &mut String, tag: Tag, attributes: &TagConfiguration, content: &str) {
    push_start_tag(output, tag.name(), attributes);
    output.push_str(content);
    push_end_tag(output, tag.name());
}
