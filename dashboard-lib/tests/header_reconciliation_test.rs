use dashboard_lib::{
    CanonicalColumn, ColumnRole, LoadError, Schema, SchemaPreset, normalize, reconcile, validate,
};
use proptest::prelude::*;

mod common;

#[test]
fn test_description_spellings_share_one_key() {
    let spellings = [
        "descripcion-del-reclamo",
        "DESCRIPCION_DEL_RECLAMO",
        "Descripción del Reclamo",
        "  descripción   del reclamo ",
        "Descripcion - del - reclamo",
    ];

    let canonical = normalize("Descripcion del reclamo");
    for spelling in spellings {
        assert_eq!(normalize(spelling), canonical, "spelling {spelling:?}");
    }
}

#[test]
fn test_every_accepted_variant_normalizes_like_its_canonical_name() {
    for preset in [SchemaPreset::Status, SchemaPreset::Complaints] {
        for column in preset.schema().columns() {
            for variant in &column.variants {
                // Variants may be different words ("Status" for "Estado"),
                // but each must reconcile to its own column
                let mapping = reconcile(&[variant.clone()], &preset.schema());
                assert_eq!(
                    mapping.get(variant),
                    Some(column.name.as_str()),
                    "variant {variant:?} of {:?}",
                    column.name
                );
            }
        }
    }
}

#[test]
fn test_reconcile_messy_complaint_headers() {
    let schema = SchemaPreset::Complaints.schema();
    let raw = common::labels(&[
        " id ",
        "CATEGORÍA",
        "supervisor",
        "Gravedad ",
        "DESCRIPCION_DEL_RECLAMO",
        "Observaciones",
    ]);

    let mapping = reconcile(&raw, &schema);

    assert_eq!(mapping.get(" id "), Some("ID"));
    assert_eq!(mapping.get("CATEGORÍA"), Some("Categoria"));
    assert_eq!(mapping.get("Gravedad "), Some("Gravedad"));
    assert_eq!(
        mapping.get("DESCRIPCION_DEL_RECLAMO"),
        Some("Descripcion del reclamo")
    );
    assert_eq!(mapping.get("Observaciones"), None);
    assert!(validate(&mapping, &schema.required_names()).is_ok());
}

#[test]
fn test_reconcile_is_idempotent_after_renaming() {
    let schema = SchemaPreset::Complaints.schema();
    let raw = common::labels(&[
        "Descripción del Reclamo",
        "gravedad",
        "SUPERVISOR",
        "categoria",
        "Id",
    ]);

    let first = reconcile(&raw, &schema);
    let renamed: Vec<String> = raw
        .iter()
        .map(|label| first.get(label).unwrap().to_string())
        .collect();

    let second = reconcile(&renamed, &schema);
    for name in &renamed {
        assert_eq!(second.get(name), Some(name.as_str()));
    }
}

#[test]
fn test_validate_fails_only_for_unmatched_required_columns() {
    let schema = Schema::new(vec![
        CanonicalColumn::new("Categoria", ColumnRole::Category, &[]),
        CanonicalColumn::new("Estado", ColumnRole::Status, &[]),
        CanonicalColumn::new("Gravedad", ColumnRole::Severity, &[]),
    ])
    .unwrap();

    let complete = reconcile(&common::labels(&["gravedad", "ESTADO", "Categoría"]), &schema);
    assert!(validate(&complete, &schema.required_names()).is_ok());

    let raw = common::labels(&["Categoria", "Fecha"]);
    let partial = reconcile(&raw, &schema);
    match validate(&partial, &schema.required_names()) {
        Err(LoadError::MissingColumns { missing, detected }) => {
            assert_eq!(missing, vec!["Estado", "Gravedad"]);
            assert_eq!(detected, raw);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn test_missing_columns_message_lists_both_sides() {
    let schema = SchemaPreset::Status.schema();
    let raw = common::labels(&["Categoria", "Fecha"]);
    let error = validate(&reconcile(&raw, &schema), &schema.required_names()).unwrap_err();

    let message = error.to_string();
    assert!(message.contains("Estado"), "{message}");
    assert!(message.contains("Gravedad"), "{message}");
    assert!(message.contains("Fecha"), "{message}");
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(label in "[a-zA-ZáéíóúÁÉÍÓÚñÑüÜ0-9 _\\-\t]{0,40}") {
        let once = normalize(&label);
        prop_assert_eq!(normalize(&once), once.clone());
    }

    #[test]
    fn prop_normalized_form_has_clean_spacing(label in "[a-zA-Záéíóú _\\-\t\n]{0,40}") {
        let normalized = normalize(&label);
        prop_assert!(!normalized.starts_with(' '));
        prop_assert!(!normalized.ends_with(' '));
        prop_assert!(!normalized.contains("  "));
        prop_assert!(!normalized.contains('_'));
        prop_assert!(!normalized.contains('-'));
        prop_assert!(normalized.chars().all(|c| !c.is_lowercase()));
    }

    #[test]
    fn prop_case_and_separator_variants_match(words in proptest::collection::vec("[a-z]{1,8}", 1..5)) {
        let spaced = words.join(" ");
        let hyphenated = words.join("-");
        let underscored = words.join("_").to_uppercase();
        prop_assert_eq!(normalize(&hyphenated), normalize(&spaced));
        prop_assert_eq!(normalize(&underscored), normalize(&spaced));
    }
}
