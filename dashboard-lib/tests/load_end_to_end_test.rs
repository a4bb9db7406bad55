//! Full load scenarios against real xlsx files written with rust_xlsxwriter.

use dashboard_lib::{
    Chart, DataPolicy, Dashboard, DashboardConfig, LoadError, LoadOptions, SchemaPreset,
    SheetLayout, load, render_page,
};

mod common;

use common::{Cell, FixtureSheet, text_row};

fn base_layout() -> SheetLayout {
    SheetLayout::Fixed {
        header_row: 0,
        max_columns: Some(5),
    }
}

fn complaints_options(path: &std::path::Path) -> LoadOptions {
    LoadOptions::new(path, SchemaPreset::Complaints.schema())
        .with_sheet("base")
        .with_layout(base_layout())
}

#[test]
fn test_base_sheet_with_locale_and_unparseable_severity() {
    let (_dir, path) = common::write_workbook(
        "dashboard.xlsx",
        &[
            FixtureSheet {
                name: "resumen",
                rows: vec![text_row(&["ignored"])],
            },
            FixtureSheet {
                name: "base",
                rows: vec![
                    text_row(&[
                        "ID",
                        "Categoria",
                        "Supervisor",
                        "Gravedad",
                        "Descripcion-del-reclamo",
                    ]),
                    text_row(&["1", "Entrega", "Ana", "10,5", "Llegó tarde"]),
                    text_row(&["2", "Calidad", "Luis", "n/a", "Producto dañado"]),
                ],
            },
        ],
    );

    let dataset = load(&complaints_options(&path)).unwrap();

    assert_eq!(dataset.sheet_name, "base");
    assert_eq!(dataset.records.len(), 2);
    assert_eq!(dataset.records[0].severity, Some(10.5));
    assert_eq!(dataset.records[1].severity, None);
    assert_eq!(dataset.records[1].get("Gravedad"), Some("n/a"));
    assert_eq!(
        dataset.records[1].get("Descripcion del reclamo"),
        Some("Producto dañado")
    );

    // Both rows reach the table even though only one severity parsed
    let dashboard = Dashboard::build(&dataset, &DashboardConfig::default());
    let table = dashboard.table.as_ref().unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1][3], "n/a");
    match &dashboard.charts[2] {
        Chart::Histogram { values, .. } => assert_eq!(values, &vec![10.5]),
        other => panic!("expected histogram, got {other:?}"),
    }
}

#[test]
fn test_columns_beyond_e_are_ignored() {
    let (_dir, path) = common::write_workbook(
        "dashboard.xlsx",
        &[FixtureSheet {
            name: "base",
            rows: vec![
                text_row(&["ID", "Categoria", "Supervisor", "Gravedad", "Notas", "Descripcion del reclamo"]),
                text_row(&["1", "Entrega", "Ana", "3", "x", "Demora"]),
            ],
        }],
    );

    match load(&complaints_options(&path)) {
        Err(LoadError::MissingColumns { missing, detected }) => {
            assert_eq!(missing, vec!["Descripcion del reclamo"]);
            assert_eq!(detected.len(), 5);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn test_numeric_severity_cells_pass_through() {
    let (_dir, path) = common::write_workbook(
        "dashboard.xlsx",
        &[FixtureSheet {
            name: "base",
            rows: vec![
                text_row(&["ID", "Categoria", "Supervisor", "Gravedad", "Descripcion del reclamo"]),
                vec![
                    Cell::Number(7.0),
                    Cell::Text("Entrega"),
                    Cell::Text("Ana"),
                    Cell::Number(1234.5),
                    Cell::Text("Demora"),
                ],
            ],
        }],
    );

    let dataset = load(&complaints_options(&path)).unwrap();
    assert_eq!(dataset.records[0].severity, Some(1234.5));
    assert_eq!(dataset.records[0].get("ID"), Some("7"));
}

#[test]
fn test_missing_sheet_lists_available_sheets() {
    let (_dir, path) = common::write_workbook(
        "dashboard.xlsx",
        &[FixtureSheet {
            name: "Hoja1",
            rows: vec![text_row(&["ID"])],
        }],
    );

    match load(&complaints_options(&path)) {
        Err(LoadError::SheetNotFound { sheet, available }) => {
            assert_eq!(sheet, "base");
            assert_eq!(available, vec!["Hoja1"]);
        }
        other => panic!("expected SheetNotFound, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_reported_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dashboard.xlsx");

    match load(&complaints_options(&path)) {
        Err(LoadError::FileNotFound { path: reported }) => assert_eq!(reported, path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn test_rows_without_key_fields_follow_policy() {
    let rows = vec![
        text_row(&["Categoría", "Estado", "Gravedad"]),
        text_row(&["Entrega", "Abierto", "2"]),
        text_row(&["Calidad", "", "3"]),
        text_row(&["", "", ""]),
        text_row(&["Calidad", "Cerrado", "1"]),
    ];
    let (_dir, path) = common::write_workbook(
        "dashboard.xlsx",
        &[FixtureSheet { name: "Hoja1", rows }],
    );

    let dropped = load(&LoadOptions::new(&path, SchemaPreset::Status.schema())).unwrap();
    let kept_rows: Vec<usize> = dropped.records.iter().map(|r| r.row_number).collect();
    assert_eq!(kept_rows, vec![2, 5]);

    let strict = LoadOptions::new(&path, SchemaPreset::Status.schema())
        .with_missing_key_policy(DataPolicy::Fail);
    assert!(matches!(
        load(&strict),
        Err(LoadError::MissingKeyField { row: 3, .. })
    ));
}

#[test]
fn test_status_workbook_renders_full_page() {
    let (_dir, path) = common::write_workbook(
        "dashboard.xlsx",
        &[FixtureSheet {
            name: "Hoja1",
            rows: vec![
                text_row(&["Categoría", "Estado", "Gravedad"]),
                text_row(&["Entrega", "Abierto", "Alta"]),
                text_row(&["Entrega", "Cerrado", "Baja"]),
            ],
        }],
    );

    let dataset = load(&LoadOptions::new(&path, SchemaPreset::Status.schema())).unwrap();
    let dashboard = Dashboard::build(&dataset, &DashboardConfig::default());
    let html = render_page(&dashboard, 1);

    assert!(html.contains("<h1>Dashboard de No Conformidades</h1>"));
    assert!(html.contains("\"type\":\"pie\""));
    // Severity stored as words: category counts, not a histogram
    assert!(!html.contains("\"type\":\"histogram\""));
    assert!(!html.contains("<table>"));
}
