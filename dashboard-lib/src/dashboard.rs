use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::dataset::Dataset;
use crate::schema::ColumnRole;

const COUNT_AXIS_LABEL: &str = "Registros";

/// Presentation settings for the dashboard page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    /// Bars in the supervisor chart
    pub top_supervisors: usize,
    /// Records shown in the table, taken from the end of the sheet
    pub recent_records: usize,
    pub page_size: usize,
    /// Force the table on or off; by default it is shown when the schema
    /// has an ID or description column
    pub show_table: Option<bool>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            title: "Dashboard de No Conformidades".to_string(),
            top_supervisors: 15,
            recent_records: 25,
            page_size: 10,
            show_table: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Chart {
    Bar {
        title: String,
        x_label: String,
        labels: Vec<String>,
        values: Vec<usize>,
    },
    Pie {
        title: String,
        labels: Vec<String>,
        values: Vec<usize>,
    },
    Histogram {
        title: String,
        x_label: String,
        values: Vec<f64>,
    },
}

impl Chart {
    fn bar(title: &str, x_label: &str, counts: Vec<(String, usize)>) -> Self {
        let (labels, values) = counts.into_iter().unzip();
        Chart::Bar {
            title: title.to_string(),
            x_label: x_label.to_string(),
            labels,
            values,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Chart::Bar { title, .. } | Chart::Pie { title, .. } | Chart::Histogram { title, .. } => {
                title
            }
        }
    }

    /// Plotly figure: `{"data": [...], "layout": {...}}`
    pub fn to_plotly(&self) -> Value {
        match self {
            Chart::Bar {
                title,
                x_label,
                labels,
                values,
            } => json!({
                "data": [{ "type": "bar", "x": labels, "y": values }],
                "layout": {
                    "title": { "text": title },
                    "xaxis": { "title": { "text": x_label } },
                    "yaxis": { "title": { "text": COUNT_AXIS_LABEL } },
                },
            }),
            Chart::Pie {
                title,
                labels,
                values,
            } => json!({
                "data": [{ "type": "pie", "labels": labels, "values": values }],
                "layout": { "title": { "text": title } },
            }),
            Chart::Histogram {
                title,
                x_label,
                values,
            } => json!({
                "data": [{ "type": "histogram", "x": values }],
                "layout": {
                    "title": { "text": title },
                    "xaxis": { "title": { "text": x_label } },
                    "yaxis": { "title": { "text": COUNT_AXIS_LABEL } },
                },
            }),
        }
    }
}

/// The most recent records, split into pages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub page_size: usize,
}

/// One page of a [`RecordTable`]. `number` is 1-based.
#[derive(Debug, PartialEq)]
pub struct TablePage<'a> {
    pub number: usize,
    pub total_pages: usize,
    pub rows: &'a [Vec<String>],
}

impl RecordTable {
    pub fn total_pages(&self) -> usize {
        self.rows.len().div_ceil(self.page_size.max(1)).max(1)
    }

    /// Page `number` (1-based), clamped into the valid range
    pub fn page(&self, number: usize) -> TablePage<'_> {
        let page_size = self.page_size.max(1);
        let total_pages = self.total_pages();
        let number = number.clamp(1, total_pages);
        let start = ((number - 1) * page_size).min(self.rows.len());
        let end = (start + page_size).min(self.rows.len());
        TablePage {
            number,
            total_pages,
            rows: &self.rows[start..end],
        }
    }
}

/// Charts and table computed once from a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub charts: Vec<Chart>,
    pub table: Option<RecordTable>,
}

impl Dashboard {
    pub fn build(dataset: &Dataset, config: &DashboardConfig) -> Self {
        let schema = &dataset.schema;
        let mut charts = Vec::new();

        if let Some(category) = schema.column_for_role(ColumnRole::Category) {
            charts.push(Chart::bar(
                "No conformidades por categoría",
                &category.name,
                dataset.value_counts(ColumnRole::Category),
            ));
        }

        if schema.has_role(ColumnRole::Status) {
            let (labels, values) = dataset.value_counts(ColumnRole::Status).into_iter().unzip();
            charts.push(Chart::Pie {
                title: "Distribución por estado".to_string(),
                labels,
                values,
            });
        } else if let Some(supervisor) = schema.column_for_role(ColumnRole::Supervisor) {
            charts.push(Chart::bar(
                &format!("Top {} supervisores", config.top_supervisors),
                &supervisor.name,
                dataset.top_values(ColumnRole::Supervisor, config.top_supervisors),
            ));
        }

        if let Some(severity) = schema.column_for_role(ColumnRole::Severity) {
            let title = "Distribución por gravedad";
            if dataset.severity_is_numeric() {
                charts.push(Chart::Histogram {
                    title: title.to_string(),
                    x_label: severity.name.clone(),
                    values: dataset.numeric_severities(),
                });
            } else {
                charts.push(Chart::bar(
                    title,
                    &severity.name,
                    dataset.value_counts(ColumnRole::Severity),
                ));
            }
        }

        let show_table = config.show_table.unwrap_or_else(|| {
            schema.has_role(ColumnRole::Id) || schema.has_role(ColumnRole::Description)
        });
        let table = show_table.then(|| {
            let columns = schema.names();
            let rows = dataset
                .recent(config.recent_records)
                .iter()
                .map(|record| {
                    columns
                        .iter()
                        .map(|column| record.get(column).unwrap_or_default().to_string())
                        .collect()
                })
                .collect();
            RecordTable {
                columns,
                rows,
                page_size: config.page_size,
            }
        });

        tracing::info!(charts = charts.len(), table = table.is_some(), "dashboard built");

        Dashboard {
            title: config.title.clone(),
            charts,
            table,
        }
    }
}
