//! Header reconciliation: matching loosely formatted spreadsheet labels
//! against the canonical column names of a [`Schema`].

use std::collections::{HashMap, HashSet};

use crate::error::LoadError;
use crate::schema::Schema;
use crate::utils::{collapse_whitespace, strip_diacritics};

/// Canonical comparison key for a header label.
///
/// Trims and uppercases, strips diacritics, turns `_` and `-` into spaces and
/// collapses whitespace runs, so "descripcion-del-reclamo",
/// "DESCRIPCION_DEL_RECLAMO" and "Descripción del Reclamo" all compare equal.
pub fn normalize(label: &str) -> String {
    let upper = label.trim().to_uppercase();
    let unaccented = strip_diacritics(&upper);
    let separated: String = unaccented
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect();
    collapse_whitespace(&separated)
}

/// One raw spreadsheet column matched to a canonical column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedColumn {
    /// Label exactly as it appears in the spreadsheet
    pub raw: String,
    /// 0-based position in the header row
    pub index: usize,
    pub canonical: String,
}

/// Raw label → canonical label, built once per load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    matches: Vec<MatchedColumn>,
    shadowed: Vec<MatchedColumn>,
    seen: Vec<String>,
}

impl ColumnMapping {
    /// Canonical label for a raw label
    pub fn get(&self, raw: &str) -> Option<&str> {
        self.matches
            .iter()
            .find(|m| m.raw == raw)
            .map(|m| m.canonical.as_str())
    }

    /// Header position of the raw column selected for a canonical column
    pub fn index_of(&self, canonical: &str) -> Option<usize> {
        self.matches
            .iter()
            .find(|m| m.canonical == canonical)
            .map(|m| m.index)
    }

    pub fn contains_canonical(&self, canonical: &str) -> bool {
        self.index_of(canonical).is_some()
    }

    /// Selected columns, in schema order
    pub fn matches(&self) -> &[MatchedColumn] {
        &self.matches
    }

    /// Raw columns that also matched a canonical column but lost to an earlier one
    pub fn shadowed(&self) -> &[MatchedColumn] {
        &self.shadowed
    }

    /// Every raw column label read from the header row
    pub fn seen(&self) -> &[String] {
        &self.seen
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        self.matches
            .iter()
            .map(|m| (m.raw.clone(), m.canonical.clone()))
            .collect()
    }
}

/// Precomputed comparison keys for every canonical column of a schema
pub struct HeaderReconciler {
    accepted: Vec<(String, HashSet<String>)>,
}

impl HeaderReconciler {
    pub fn new(schema: &Schema) -> Self {
        let accepted = schema
            .columns()
            .iter()
            .map(|column| (column.name.clone(), column.accepted_keys()))
            .collect();
        HeaderReconciler { accepted }
    }

    /// Match raw labels to canonical columns.
    ///
    /// For each canonical column the first raw column whose normalized form is
    /// an accepted key wins. Later matches are kept in [`ColumnMapping::shadowed`].
    /// A raw column claimed by an earlier canonical column is not reused, and a
    /// label repeated literally only maps at its first position. Canonical
    /// columns without a match are left out.
    pub fn reconcile(&self, raw_columns: &[String]) -> ColumnMapping {
        let keys: Vec<String> = raw_columns.iter().map(|raw| normalize(raw)).collect();
        let mut claimed = vec![false; raw_columns.len()];
        let mut matches: Vec<MatchedColumn> = Vec::new();
        let mut shadowed: Vec<MatchedColumn> = Vec::new();

        for (canonical, accepted) in &self.accepted {
            let mut selected = false;

            for (index, key) in keys.iter().enumerate() {
                if claimed[index] || !accepted.contains(key) {
                    continue;
                }

                let candidate = MatchedColumn {
                    raw: raw_columns[index].clone(),
                    index,
                    canonical: canonical.clone(),
                };

                let label_taken = matches.iter().any(|m| m.raw == candidate.raw);
                if selected || label_taken {
                    shadowed.push(candidate);
                } else {
                    claimed[index] = true;
                    selected = true;
                    matches.push(candidate);
                }
            }
        }

        ColumnMapping {
            matches,
            shadowed,
            seen: raw_columns.to_vec(),
        }
    }
}

/// Reconcile raw header labels against a schema. See [`HeaderReconciler::reconcile`].
pub fn reconcile(raw_columns: &[String], schema: &Schema) -> ColumnMapping {
    HeaderReconciler::new(schema).reconcile(raw_columns)
}

/// Fail with [`LoadError::MissingColumns`] when a required canonical name has no
/// matching raw column. Missing names keep the order of `required`.
pub fn validate(mapping: &ColumnMapping, required: &[String]) -> Result<(), LoadError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !mapping.contains_canonical(name))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingColumns {
            missing,
            detected: mapping.seen().to_vec(),
        })
    }
}
