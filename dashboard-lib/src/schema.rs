use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::reconciler::normalize;

/// What a canonical column means to the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Id,
    Category,
    Status,
    Supervisor,
    Severity,
    Description,
    #[default]
    Other,
}

/// A fixed column name together with the raw spellings accepted for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalColumn {
    pub name: String,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub role: ColumnRole,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl CanonicalColumn {
    pub fn new(name: &str, role: ColumnRole, variants: &[&str]) -> Self {
        CanonicalColumn {
            name: name.to_string(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
            role,
            required: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Normalized comparison keys for the name and every accepted variant
    pub fn accepted_keys(&self) -> HashSet<String> {
        std::iter::once(&self.name)
            .chain(self.variants.iter())
            .map(|label| normalize(label))
            .filter(|key| !key.is_empty())
            .collect()
    }
}

/// Ordered list of the canonical columns a spreadsheet must provide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<CanonicalColumn>,
}

impl Schema {
    pub fn new(columns: Vec<CanonicalColumn>) -> Result<Self, ConfigError> {
        if columns.is_empty() {
            return Err(ConfigError::EmptySchema);
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(normalize(&column.name)) {
                return Err(ConfigError::DuplicateCanonicalName(column.name.clone()));
            }
        }

        Ok(Schema { columns })
    }

    /// Parse a schema from TOML:
    ///
    /// ```toml
    /// [[columns]]
    /// name = "Categoria"
    /// role = "category"
    /// variants = ["Categoría", "Category"]
    /// ```
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let parsed: Schema = toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: origin.to_path_buf(),
            source,
        })?;
        Schema::new(parsed.columns)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    pub fn columns(&self) -> &[CanonicalColumn] {
        &self.columns
    }

    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Names of the required columns, in schema order
    pub fn required_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.required)
            .map(|c| c.name.clone())
            .collect()
    }

    /// First column carrying the given role
    pub fn column_for_role(&self, role: ColumnRole) -> Option<&CanonicalColumn> {
        self.columns.iter().find(|c| c.role == role)
    }

    pub fn has_role(&self, role: ColumnRole) -> bool {
        self.column_for_role(role).is_some()
    }
}

/// The two column layouts observed in the complaint spreadsheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaPreset {
    /// Category, status and severity
    #[default]
    Status,
    /// ID, category, supervisor, severity and complaint description
    Complaints,
}

impl SchemaPreset {
    pub fn schema(self) -> Schema {
        let columns = match self {
            SchemaPreset::Status => vec![
                CanonicalColumn::new("Categoría", ColumnRole::Category, &["Categoria", "Category"]),
                CanonicalColumn::new("Estado", ColumnRole::Status, &["Status"]),
                CanonicalColumn::new("Gravedad", ColumnRole::Severity, &["Severity"]),
            ],
            SchemaPreset::Complaints => vec![
                CanonicalColumn::new("ID", ColumnRole::Id, &["Id reclamo", "Identificador"]),
                CanonicalColumn::new("Categoria", ColumnRole::Category, &["Categoría", "Category"]),
                CanonicalColumn::new("Supervisor", ColumnRole::Supervisor, &["Supervisora"]),
                CanonicalColumn::new("Gravedad", ColumnRole::Severity, &["Severity"]),
                CanonicalColumn::new(
                    "Descripcion del reclamo",
                    ColumnRole::Description,
                    &[
                        "Descripcion-del-reclamo",
                        "Descripcion_del_reclamo",
                        "Descripción del reclamo",
                        "Descripcion reclamo",
                    ],
                ),
            ],
        };
        Schema { columns }
    }
}

impl fmt::Display for SchemaPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaPreset::Status => write!(f, "status"),
            SchemaPreset::Complaints => write!(f, "complaints"),
        }
    }
}

impl FromStr for SchemaPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "status" => Ok(SchemaPreset::Status),
            "complaints" => Ok(SchemaPreset::Complaints),
            other => Err(format!(
                "unknown schema preset '{other}', expected 'status' or 'complaints'"
            )),
        }
    }
}
