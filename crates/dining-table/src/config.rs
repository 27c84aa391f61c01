//! Default presenter options.
//!
//! A [`Configuration`] holds one [`PresenterConfiguration`] per presenter
//! kind. Presenters built with `with_configuration` layer their own options
//! over these defaults, so the configuration only has to say what every
//! table of an application has in common.
//!
//! ```rust
//! use dining_table::Configuration;
//!
//! let configuration = Configuration::from_yaml(r#"
//! html_presenter:
//!   default_options:
//!     tags:
//!       table:
//!         class: [table, table-bordered]
//!       thead:
//!         class: thead-dark
//! csv_presenter:
//!   default_options:
//!     csv:
//!       col_sep: ";"
//! "#)?;
//!
//! let table = &configuration.html_presenter.default_options.tags.table;
//! assert_eq!(table.class(), Some("table table-bordered"));
//! assert_eq!(configuration.csv_presenter.default_options.csv.delimiter, Some(';'));
//! # Ok::<(), dining_table::Error>(())
//! ```
//!
//! There is no process-wide instance: the application owns its
//! configuration and passes it to the presenters it builds.

use crate::error::{Error, Result};
use crate::presenters::{CsvOptions, ExcelOptions, HtmlOptions, PresenterKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Defaults for one presenter kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfiguration<O> {
    pub default_options: O,
}

impl<O> PresenterConfiguration<O> {
    pub fn new(default_options: O) -> Self {
        PresenterConfiguration { default_options }
    }
}

/// Default options for every presenter kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub html_presenter: PresenterConfiguration<HtmlOptions>,
    pub csv_presenter: PresenterConfiguration<CsvOptions>,
    pub excel_presenter: PresenterConfiguration<ExcelOptions>,
}

impl Configuration {
    /// An empty configuration: no defaults for any presenter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjusts the configuration in place.
    ///
    /// ```rust
    /// use dining_table::{Configuration, Tag};
    ///
    /// let mut configuration = Configuration::new();
    /// configuration.configure(|config| {
    ///     config.html_presenter.default_options.tags.table.set_class("table");
    ///     config.csv_presenter.default_options.clean = Some(true);
    /// });
    /// assert_eq!(
    ///     configuration.html_presenter.default_options.tags.get(Tag::Table).class(),
    ///     Some("table")
    /// );
    /// ```
    pub fn configure<F>(&mut self, block: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        block(self);
        self
    }

    /// Drops every default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Parses a configuration from YAML. Missing sections keep their
    /// defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a configuration from JSON. Missing sections keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration file, as YAML unless its extension is `json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Load {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    /// The defaults of one presenter kind, as a JSON object.
    pub fn default_options(&self, kind: PresenterKind) -> Result<Value> {
        let value = match kind {
            PresenterKind::Html => serde_json::to_value(&self.html_presenter.default_options),
            PresenterKind::Csv => serde_json::to_value(&self.csv_presenter.default_options),
            PresenterKind::Xlsx => serde_json::to_value(&self.excel_presenter.default_options),
        };
        value.map_err(|e| Error::invalid_options(kind.configuration_key(), e))
    }
}
