//! HTML rendering of complete tables.

mod common;

use common::*;
use dining_table::prelude::*;
use dining_table::{TagsConfiguration, WrapOptions};
use proptest::prelude::*;

fn view() -> DefaultViewContext {
    DefaultViewContext
}

// ============================================================================
// Body, header and footer
// ============================================================================

#[test]
fn test_basic_table_body() {
    let cars = cars();
    let html = CarTable.render_html(&cars, &view()).unwrap();
    let table = document(&html);
    let rows = table.child("tbody").children_named("tr");
    assert_eq!(rows.len(), cars.len());
    for (row, car) in rows.iter().zip(&cars) {
        assert_eq!(
            cell_texts(row),
            vec![
                car.brand.clone(),
                car.number_of_doors.to_string(),
                car.stock.to_string()
            ]
        );
    }
}

#[test]
fn test_header_without_explicit_labels() {
    let html = CarTable.render_html(&named_cars(), &view()).unwrap();
    let table = document(&html);
    let header = table.child("thead").child("tr");
    assert_eq!(cell_texts(header), vec!["Brand", "Number of doors", "Stock"]);
}

#[test]
fn test_header_of_row_type_without_human_names_is_blank() {
    let html = CarTable.render_html(&cars(), &view()).unwrap();
    let table = document(&html);
    let header = table.child("thead").child("tr");
    assert_eq!(cell_texts(header), vec!["", "", ""]);
}

#[test]
fn test_header_with_empty_body() {
    let cars: Vec<NamedCar> = Vec::new();
    let html = CarTable.render_html(&cars, &view()).unwrap();
    let table = document(&html);
    let header = table.child("thead").child("tr");
    assert_eq!(cell_texts(header), vec!["Brand", "Number of doors", "Stock"]);
    assert!(table.child("tbody").children.is_empty());
}

#[test]
fn test_explicit_headers() {
    for cars in [named_cars(), Vec::new()] {
        let html = CarTableWithHeader.render_html(&cars, &view()).unwrap();
        let table = document(&html);
        let header = table.child("thead").child("tr");
        let cells = header.children_named("th");
        assert_eq!(cells[0].text, "The brand");
        assert_eq!(cells[1].text, "The number of doors");

        let link = cells[2].child("a");
        assert_eq!(link.text, "Stock");
        assert_eq!(link.attribute("href"), Some("http://www.google.com"));
    }
}

#[test]
fn test_footer() {
    let html = CarTableWithFooter.render_html(&named_cars(), &view()).unwrap();
    let table = document(&html);
    let footer = table.child("tfoot").child("tr");
    let cells = footer.children_named("td");
    assert_eq!(cells.len(), 3);
    assert_eq!(cells[0].text, "");
    assert_eq!(cells[1].text, "Total");

    let link = cells[2].child("a");
    assert_eq!(link.text, "Total: 252");
    assert_eq!(link.attribute("href"), Some("#"));
}

#[test]
fn test_footer_is_omitted_when_blank() {
    let html = CarTable.render_html(&cars(), &view()).unwrap();
    let table = document(&html);
    assert_eq!(table.child_names(), vec!["thead", "tbody"]);
}

#[test]
fn test_skip_header_and_footer() {
    let html = CarTableWithoutHeader.render_html(&named_cars(), &view()).unwrap();
    let table = parse(&html);
    assert_eq!(table.child_names(), vec!["tbody"]);
}

// ============================================================================
// Column options
// ============================================================================

#[test]
fn test_column_options_and_blocks() {
    let cars = cars();
    let html = CarTableWithOptions::default()
        .render_html(&cars, &view())
        .unwrap();
    let table = document(&html);
    for (row, car) in table.child("tbody").children_named("tr").iter().zip(&cars) {
        let cells = row.children_named("td");
        assert_eq!(cells[0].text, car.brand.to_uppercase());
        assert_eq!(cells[0].class(), Some("center"));
        assert_eq!(cells[1].text, car.stock.to_string());
        assert_eq!(cells[1].class(), Some("left"));
    }

    let header = table.child("thead").child("tr").children_named("th");
    assert_eq!(header[0].class(), Some("center"));
    assert_eq!(header[1].class(), Some("left"));
}

#[test]
fn test_legacy_column_options_render_identically() {
    let cars = cars();
    let current = CarTableWithOptions::default()
        .render_html(&cars, &view())
        .unwrap();
    let legacy = CarTableWithOptions {
        legacy_syntax: true,
        ..Default::default()
    }
    .render_html(&cars, &view())
    .unwrap();
    assert_eq!(current, legacy);
}

#[test]
fn test_actions() {
    let html = CarTableWithActions.render_html(&cars(), &view()).unwrap();
    let table = document(&html);

    let header = table.child("thead").child("tr").children_named("th");
    assert_eq!(header[2].text, "Action");
    assert_eq!(header[2].class(), Some("left"));

    for row in table.child("tbody").children_named("tr") {
        let cell = row.children_named("td")[2];
        assert_eq!(cell.class(), Some("left"));
        let links: Vec<_> = cell
            .children_named("a")
            .into_iter()
            .map(|link| (link.text.as_str(), link.attribute("href").unwrap()))
            .collect();
        assert_eq!(links, vec![("Show", "#show"), ("Edit", "#edit")]);
    }
}

#[test]
fn test_custom_column_type() {
    let cars = cars();
    let plain = CarTableWithOptions {
        normal_launch_date: true,
        ..Default::default()
    }
    .render_html(&cars, &view())
    .unwrap();
    let localized = CarTableWithOptions {
        date_column_launch_date: true,
        ..Default::default()
    }
    .render_html(&cars, &view())
    .unwrap();

    let plain = document(&plain);
    let localized = document(&localized);
    let expected = ["1/1/2016", "1/2/2016", "1/3/2016"];
    let rows = plain
        .child("tbody")
        .children_named("tr")
        .into_iter()
        .zip(localized.child("tbody").children_named("tr"));
    for ((plain_row, localized_row), (car, date)) in rows.zip(cars.iter().zip(expected)) {
        assert_eq!(plain_row.children_named("td")[2].text, car.launch_date);
        assert_eq!(localized_row.children_named("td")[2].text, date);
    }
}

// ============================================================================
// Presenter options
// ============================================================================

fn presenter_tags() -> TagsConfiguration {
    serde_json::from_value(serde_json::json!({
        "table": {"class": "table table-bordered", "id": "my_table_id", "data-custom": "custom1!"},
        "thead": {"class": "mythead", "id": "my_thead_id", "data-custom": "custom2!"},
        "tbody": {"class": "mytbody", "id": "my_tbody_id", "data-custom": "custom3!"},
        "tfoot": {"class": "mytfoot", "id": "my_tfoot_id", "data-custom": "custom4!"},
        "tr": {"class": "mytr", "data-custom": "custom5!"},
        "th": {"class": "myth", "data-custom": "custom6!"},
        "td": {"class": "mytd", "data-custom": "custom7!"}
    }))
    .unwrap()
}

fn assert_attributes(element: &Element, expected: &[(&str, &str)]) {
    let actual: Vec<_> = element
        .attributes
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    assert_eq!(actual, expected, "attributes of <{}>", element.name);
}

#[test]
fn test_presenter_options() {
    let presenter = HtmlPresenter::new(HtmlOptions::new().tags(presenter_tags()));
    let html = CarTableWithFooter
        .render_with(&cars(), &view(), presenter)
        .unwrap();
    let table = document(&html);

    assert_attributes(
        &table,
        &[("class", "table table-bordered"), ("id", "my_table_id"), ("data-custom", "custom1!")],
    );
    let thead = table.child("thead");
    assert_attributes(
        thead,
        &[("class", "mythead"), ("id", "my_thead_id"), ("data-custom", "custom2!")],
    );
    let tbody = table.child("tbody");
    assert_attributes(
        tbody,
        &[("class", "mytbody"), ("id", "my_tbody_id"), ("data-custom", "custom3!")],
    );
    let tfoot = table.child("tfoot");
    assert_attributes(
        tfoot,
        &[("class", "mytfoot"), ("id", "my_tfoot_id"), ("data-custom", "custom4!")],
    );

    let tr = [("class", "mytr"), ("data-custom", "custom5!")];
    let header = thead.child("tr");
    assert_attributes(header, &tr);
    for cell in &header.children {
        assert_attributes(cell, &[("class", "myth"), ("data-custom", "custom6!")]);
    }
    for row in tbody.children_named("tr") {
        assert_attributes(row, &tr);
        for cell in &row.children {
            assert_attributes(cell, &[("class", "mytd"), ("data-custom", "custom7!")]);
        }
    }
    assert_attributes(tfoot.child("tr"), &tr);
}

#[test]
fn test_deprecated_table_class() {
    let options = HtmlOptions {
        class: Some("table table-bordered".to_string()),
        ..HtmlOptions::default()
    };
    let html = CarTable
        .render_with(&cars(), &view(), HtmlPresenter::new(options))
        .unwrap();
    let table = document(&html);
    assert_eq!(table.class(), Some("table table-bordered"));
}

#[test]
fn test_tags_table_class_wins_over_deprecated_class() {
    let options = HtmlOptions {
        class: Some("legacy".to_string()),
        ..HtmlOptions::new().attribute(Tag::Table, "class", "current")
    };
    let html = CarTable
        .render_with(&cars(), &view(), HtmlPresenter::new(options))
        .unwrap();
    assert_eq!(document(&html).class(), Some("current"));
}

#[test]
fn test_wrap() {
    let options = HtmlOptions::new().wrap(WrapOptions::new("div").class("table-responsive"));
    let html = CarTable
        .render_with(&cars(), &view(), HtmlPresenter::new(options))
        .unwrap();
    let wrapper = parse(&html);
    assert_eq!(wrapper.name, "div");
    assert_eq!(wrapper.attributes, vec![("class".to_string(), "table-responsive".to_string())]);
    assert_eq!(wrapper.child_names(), vec!["table"]);
    assert!(html.ends_with("</table></div>"));
}

#[test]
fn test_configuration_defaults() {
    let configuration = Configuration::from_yaml(
        r#"
html_presenter:
  default_options:
    tags:
      table:
        class: table-hover
      tr:
        class: rowrow
    wrap:
      tag: div
      class: table-responsive
"#,
    )
    .unwrap();
    let presenter = HtmlPresenter::with_configuration(&configuration, HtmlOptions::new());
    let html = CarTable.render_with(&cars(), &view(), presenter).unwrap();

    let wrapper = parse(&html);
    assert_eq!(wrapper.name, "div");
    assert_eq!(wrapper.class(), Some("table-responsive"));
    let table = wrapper.child("table");
    assert_eq!(table.class(), Some("table-hover"));
    for row in table.child("tbody").children_named("tr") {
        assert_eq!(row.class(), Some("rowrow"));
    }

    // Instance options override the configured defaults per attribute.
    let options = HtmlOptions::new().attribute(Tag::Table, "class", "table-dark");
    let presenter = HtmlPresenter::with_configuration(&configuration, options);
    let html = CarTable.render_with(&cars(), &view(), presenter).unwrap();
    let table = parse(&html).child("table").clone();
    assert_eq!(table.class(), Some("table-dark"));
    assert_eq!(table.child("tbody").children_named("tr")[0].class(), Some("rowrow"));

    // A plain presenter is unaffected by the configuration.
    let html = CarTable.render_html(&cars(), &view()).unwrap();
    assert!(html.starts_with("<table><thead>"));
}

#[test]
fn test_config_blocks() {
    let cars = cars();
    let html = CarTableWithConfigBlocks.render_html(&cars, &view()).unwrap();
    let table = document(&html);
    assert_eq!(table.class(), Some("my-table-class"));

    let thead = table.child("thead");
    assert_eq!(thead.class(), Some("my-thead-class"));
    let header = thead.child("tr");
    assert_eq!(header.class(), Some("header-tr"));
    for cell in &header.children {
        assert_eq!(cell.class(), Some("header-th"));
    }

    for (index, (row, car)) in table
        .child("tbody")
        .children_named("tr")
        .into_iter()
        .zip(&cars)
        .enumerate()
    {
        let class = row.class().unwrap();
        assert!(class.contains(if index % 2 == 1 { "odd" } else { "even" }));
        assert_eq!(class.contains("lowstock"), car.stock < 10);

        let cells = row.children_named("td");
        assert_eq!(cells[0].class(), Some("left"));
        let doors = cells[1].class().unwrap();
        assert!(doors.contains("center"));
        assert_eq!(doors.contains("five_doors"), car.number_of_doors == 5);
        assert_eq!(cells[2].class(), None);
    }

    let tfoot = table.child("tfoot");
    assert_eq!(tfoot.class(), Some("my-tfoot-class"));
    let footer = tfoot.child("tr");
    assert_eq!(footer.class(), Some("footer-tr"));
    let cells = footer.children_named("td");
    assert_eq!(cells[0].class(), Some("left"));
    assert_eq!(cells[1].class(), Some("footer-td"));
    assert_eq!(cells[2].class(), Some("footer-td"));
}

#[test]
fn test_config_blocks_are_ignored_by_other_presenters() {
    let csv = CarTableWithConfigBlocks
        .render_with(
            &cars(),
            &view(),
            CsvPresenter::new(CsvOptions::new().clean(true)).unwrap(),
        )
        .unwrap();
    assert_eq!(csv.lines().count(), 5);
    assert!(!csv.contains("class"));
}

// ============================================================================
// Structure
// ============================================================================

fn car_strategy() -> impl Strategy<Value = Car> {
    ("[a-zA-Z ]{0,12}", 2u32..6, 0u32..500).prop_map(|(brand, number_of_doors, stock)| Car {
        brand,
        model: String::new(),
        number_of_doors,
        stock,
        launch_date: "2016-01-01".to_string(),
    })
}

proptest! {
    #[test]
    fn prop_table_structure(
        cars in prop::collection::vec(car_strategy(), 0..8),
        columns in prop::sample::subsequence(vec!["brand", "number_of_doors", "stock"], 1..=3),
        footer in any::<bool>(),
    ) {
        let mut table = Table::new(&cars, &DefaultViewContext);
        for name in &columns {
            table.column(*name);
        }
        if footer {
            table.column(Column::new("total").footer("Total"));
        }
        let column_count = columns.len() + usize::from(footer);

        let html = table.render().unwrap();
        let table = document(&html);
        prop_assert_eq!(table.child("thead").child("tr").children.len(), column_count);

        let rows = table.child("tbody").children_named("tr");
        prop_assert_eq!(rows.len(), cars.len());
        for row in rows {
            prop_assert_eq!(row.children_named("td").len(), column_count);
        }

        let footers = table.children_named("tfoot");
        prop_assert_eq!(footers.len(), usize::from(footer));
    }
}

#[test]
fn test_cell_attribute_precedence() {
    let configuration = Configuration::from_yaml(
        r#"
html_presenter:
  default_options:
    tags:
      td:
        class: stage1
        lang: stage1
        title: stage1
        data-kept: defaults
"#,
    )
    .unwrap();
    let options = HtmlOptions::new()
        .attribute(Tag::Td, "class", "stage2")
        .attribute(Tag::Td, "lang", "stage2")
        .attribute(Tag::Td, "title", "stage2");
    let mut presenter = HtmlPresenter::with_configuration(&configuration, options);
    presenter.table_config(|config| {
        config.td.set_class("stage3");
        config.td.set("title", "stage3");
        config.td.set("data-row", "stage3");
    });
    presenter.row_config(|config, index, _: Option<&Car>| {
        if index.row().is_some() {
            config.td.set_class("stage4");
            config.td.set("data-row", "stage4");
        }
    });

    let cars = cars();
    let view = view();
    let mut table = Table::with_presenter(&cars, &view, presenter);
    table
        .column(
            Column::<Car>::new("brand").html(serde_json::json!({"td": {"class": "stage5", "id": "col"}})),
        )
        .column(Column::<Car>::new("number_of_doors").html_with(|config, _, _| {
            config.td.set_class("stage5-block");
        }))
        .column("stock");
    let html = table.render().unwrap();

    let inherited = [
        ("lang", "stage2"),
        ("title", "stage3"),
        ("data-kept", "defaults"),
        ("data-row", "stage4"),
    ];
    let expect = |class: &'static str, extra: &[(&'static str, &'static str)]| {
        let mut attributes = vec![("class", class)];
        attributes.extend(inherited);
        attributes.extend(extra);
        attributes
    };

    let table = document(&html);
    let rows = table.child("tbody").children_named("tr");
    assert_eq!(rows.len(), cars.len());
    for row in rows {
        let cells = row.children_named("td");
        assert_attributes(cells[0], &expect("stage5", &[("id", "col")]));
        assert_attributes(cells[1], &expect("stage5-block", &[]));
        assert_attributes(cells[2], &expect("stage4", &[]));
    }

    // td layers never reach header cells.
    for cell in &table.child("thead").child("tr").children {
        assert_attributes(cell, &[]);
    }
}
