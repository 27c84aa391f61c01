//! Tables: a collection, its columns, and the presenter rendering them.
//!
//! A [`Table`] borrows the rows and a [`ViewContext`], owns its presenter,
//! and collects [`Column`]s through a small builder DSL. [`Table::render`]
//! then drives the presenter through the lifecycle:
//!
//! | Step | Skippable | Index seen by columns |
//! |------|-----------|-----------------------|
//! | `start_table` | no | 0 |
//! | `render_header` | `skip_header()` | 0 |
//! | `start_body` | no | 0 |
//! | `render_row` × N | no | the row's position |
//! | `end_body` | no | last row |
//! | `render_footer` | `skip_footer()` | last row |
//! | `end_table` | no | last row |
//!
//! Reusable layouts implement [`TableDefinition`], which works with any
//! presenter:
//!
//! ```rust
//! use dining_table::{Column, CsvOptions, CsvPresenter, DefaultViewContext};
//! use dining_table::{Presenter, PresenterKind, Table, TableDefinition};
//! use serde_json::{json, Value};
//!
//! struct CarTable;
//!
//! impl TableDefinition<Value> for CarTable {
//!     fn define<P: Presenter<Value>>(&self, table: &mut Table<'_, Value, P>) {
//!         table.column(Column::new("brand").header("Brand"));
//!         if table.presenter().is(PresenterKind::Csv) {
//!             table.column(Column::new("type").header("Type"));
//!         }
//!     }
//! }
//!
//! let cars = vec![json!({"brand": "Audi", "type": "A4"})];
//! let html = CarTable.render_html(&cars, &DefaultViewContext)?;
//! assert_eq!(html, "<table><thead><tr><th>Brand</th></tr></thead><tbody><tr><td>Audi</td></tr></tbody></table>");
//!
//! let csv = CarTable.render_with(&cars, &DefaultViewContext, CsvPresenter::new(CsvOptions::new())?)?;
//! assert_eq!(csv, "Brand,Type\nAudi,A4\n");
//! # Ok::<(), dining_table::Error>(())
//! ```

use crate::column::{Actions, Column, Helpers};
use crate::error::Result;
use crate::presenters::{HtmlPresenter, Presenter};
use crate::record::Record;
use crate::view::ViewContext;
use tracing::debug;

/// What a presenter sees of the table during one lifecycle step.
pub struct TableScope<'r, T> {
    columns: &'r [Column<T>],
    helpers: Helpers<'r, T>,
}

impl<'r, T> TableScope<'r, T> {
    pub fn new(columns: &'r [Column<T>], helpers: Helpers<'r, T>) -> Self {
        TableScope { columns, helpers }
    }

    /// The columns, in declaration order.
    pub fn columns(&self) -> &'r [Column<T>] {
        self.columns
    }

    /// Helpers for computing values and labels at this step.
    pub fn helpers(&self) -> Helpers<'r, T> {
        self.helpers
    }

    /// Position of the current row.
    pub fn index(&self) -> usize {
        self.helpers.index()
    }

    fn at(&self, index: usize) -> Self {
        TableScope {
            columns: self.columns,
            helpers: self.helpers.at(index),
        }
    }
}

/// A table under construction.
///
/// ```rust
/// use dining_table::{Column, DefaultViewContext, Table};
/// use serde_json::json;
///
/// let cars = vec![json!({"brand": "Audi", "stock": 100}), json!({"brand": "Fiat", "stock": 2})];
/// let mut table = Table::new(&cars, &DefaultViewContext);
/// table
///     .column(Column::new("brand").header("Brand"))
///     .column(Column::new("stock").header("Stock").footer("Low"))
///     .skip_header();
///
/// assert_eq!(
///     table.render()?,
///     "<table><tbody><tr><td>Audi</td><td>100</td></tr><tr><td>Fiat</td><td>2</td></tr>\
///      </tbody><tfoot><tr><td></td><td>Low</td></tr></tfoot></table>"
/// );
/// # Ok::<(), dining_table::Error>(())
/// ```
pub struct Table<'a, T, P = HtmlPresenter<T>> {
    collection: &'a [T],
    view: &'a dyn ViewContext,
    presenter: P,
    columns: Vec<Column<T>>,
    index: usize,
    skip_header: bool,
    skip_footer: bool,
}

impl<'a, T: Record> Table<'a, T> {
    /// Creates a table rendered by an HTML presenter without defaults.
    pub fn new(collection: &'a [T], view: &'a dyn ViewContext) -> Self {
        Self::with_presenter(collection, view, HtmlPresenter::default())
    }
}

impl<'a, T: Record, P: Presenter<T>> Table<'a, T, P> {
    /// Creates a table rendered by `presenter`.
    pub fn with_presenter(collection: &'a [T], view: &'a dyn ViewContext, presenter: P) -> Self {
        Table {
            collection,
            view,
            presenter,
            columns: Vec::new(),
            index: 0,
            skip_header: false,
            skip_footer: false,
        }
    }

    /// Appends a column. A bare name is a plain attribute column.
    pub fn column(&mut self, column: impl Into<Column<T>>) -> &mut Self {
        self.columns.push(column.into());
        self
    }

    /// Appends an actions column; see [`Column::actions`].
    pub fn actions<F>(&mut self, block: F) -> &mut Self
    where
        F: Fn(&T, &mut Actions<'_, T>) + 'static,
    {
        self.column(Column::actions(block))
    }

    /// Renders no header.
    pub fn skip_header(&mut self) -> &mut Self {
        self.skip_header = true;
        self
    }

    /// Renders no footer, even when columns have footer labels.
    pub fn skip_footer(&mut self) -> &mut Self {
        self.skip_footer = true;
        self
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// The view context.
    pub fn h(&self) -> &'a dyn ViewContext {
        self.view
    }

    /// The view context (long form of [`h`](Self::h)).
    pub fn helpers(&self) -> &'a dyn ViewContext {
        self.view
    }

    pub fn collection(&self) -> &'a [T] {
        self.collection
    }

    /// Position of the row being rendered; 0 before rendering starts.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Renders the table and returns the presenter's output.
    pub fn render(mut self) -> Result<P::Output> {
        let kind = self.presenter.kind();
        debug!(
            presenter = %kind,
            rows = self.collection.len(),
            columns = self.columns.len(),
            "rendering table"
        );

        let scope = TableScope::new(
            &self.columns,
            Helpers::new(self.view, self.collection, kind),
        );
        self.presenter.start_table(&scope)?;
        if !self.skip_header {
            self.presenter.render_header(&scope)?;
        }

        self.presenter.start_body(&scope)?;
        for (index, row) in self.collection.iter().enumerate() {
            self.index = index;
            self.presenter.render_row(&scope.at(index), row)?;
        }
        let scope = scope.at(self.index);
        self.presenter.end_body(&scope)?;

        if !self.skip_footer {
            self.presenter.render_footer(&scope)?;
        }
        self.presenter.end_table(&scope)?;
        debug!(presenter = %kind, "table rendered");
        self.presenter.output()
    }
}

/// A reusable table layout.
///
/// `define` declares the columns and, through the table's presenter, any
/// presenter-specific configuration. Fields of the implementing type play
/// the role of table options.
pub trait TableDefinition<T: Record> {
    fn define<P: Presenter<T>>(&self, table: &mut Table<'_, T, P>);

    /// Builds a table for `collection`, defines it and renders it with
    /// `presenter`.
    fn render_with<P: Presenter<T>>(
        &self,
        collection: &[T],
        view: &dyn ViewContext,
        presenter: P,
    ) -> Result<P::Output> {
        let mut table = Table::with_presenter(collection, view, presenter);
        self.define(&mut table);
        table.render()
    }

    /// Renders as HTML with a default presenter.
    fn render_html(&self, collection: &[T], view: &dyn ViewContext) -> Result<String> {
        self.render_with(collection, view, HtmlPresenter::default())
    }
}
