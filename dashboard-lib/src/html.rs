//! Single-page HTML rendering of a [`Dashboard`].

use std::fmt::Write;

use crate::dashboard::{Chart, Dashboard, RecordTable};
use crate::utils::escape_html;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = "body{font-family:sans-serif;margin:0}\
main{max-width:1100px;margin:0 auto;padding:20px}\
h1{text-align:center}\
table{border-collapse:collapse;width:100%;margin-top:16px}\
th,td{border:1px solid #ddd;padding:6px 8px;text-align:left;vertical-align:top}\
th{background:#f3f3f3}\
nav.pager{margin:12px 0;display:flex;gap:12px;align-items:center}";

/// Render the page, showing the given 1-based table page
pub fn render_page(dashboard: &Dashboard, page: usize) -> String {
    let title = escape_html(&dashboard.title);
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<script src=\"{PLOTLY_CDN}\"></script>\n\
         <style>{STYLE}</style>\n</head>\n<body>\n<main>\n<h1>{title}</h1>\n"
    );

    for (index, chart) in dashboard.charts.iter().enumerate() {
        render_chart(&mut html, index, chart);
    }

    if let Some(table) = &dashboard.table {
        render_table(&mut html, table, page);
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_chart(html: &mut String, index: usize, chart: &Chart) {
    let figure = script_safe_json(&chart.to_plotly().to_string());
    let _ = write!(
        html,
        "<section class=\"chart\" aria-label=\"{label}\">\n<div id=\"chart-{index}\"></div>\n\
         <script>(function(){{var f={figure};\
         Plotly.newPlot(\"chart-{index}\",f.data,f.layout,{{responsive:true}});}})();</script>\n</section>\n",
        label = escape_html(chart.title()),
    );
}

fn render_table(html: &mut String, table: &RecordTable, page: usize) {
    let current = table.page(page);

    html.push_str("<section class=\"records\">\n<h2>Últimos registros</h2>\n<table>\n<thead><tr>");
    for column in &table.columns {
        let _ = write!(html, "<th>{}</th>", escape_html(column));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in current.rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape_html(cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");

    if current.total_pages > 1 {
        html.push_str("<nav class=\"pager\">");
        if current.number > 1 {
            let _ = write!(html, "<a href=\"?page={}\">&laquo; Anterior</a>", current.number - 1);
        }
        let _ = write!(
            html,
            "<span>Página {} de {}</span>",
            current.number, current.total_pages
        );
        if current.number < current.total_pages {
            let _ = write!(html, "<a href=\"?page={}\">Siguiente &raquo;</a>", current.number + 1);
        }
        html.push_str("</nav>\n");
    }

    html.push_str("</section>\n");
}

/// JSON is embedded in a <script> element, so "</" must not close it early
fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}
