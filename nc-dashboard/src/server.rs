use actix_web::{
    dev::Server, get, http::header::ContentType, web, App, HttpResponse, HttpServer, Responder,
};
use dashboard_lib::{render_page, Dashboard, RecordTable};
use serde::Deserialize;

/// Every table page rendered up front; the data never changes while serving
pub struct DashboardState {
    pages: Vec<String>,
}

impl DashboardState {
    pub fn new(dashboard: &Dashboard) -> Self {
        let total_pages = dashboard
            .table
            .as_ref()
            .map_or(1, RecordTable::total_pages);
        let pages = (1..=total_pages)
            .map(|page| render_page(dashboard, page))
            .collect();
        DashboardState { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 1-based; out of range requests get the nearest page
    pub fn page(&self, number: usize) -> &str {
        let slot = number.clamp(1, self.pages.len().max(1)) - 1;
        self.pages.get(slot).map(String::as_str).unwrap_or_default()
    }
}

/// `page` is kept as text so a malformed value falls back to the first page
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page_number(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|page| page.trim().parse().ok())
            .unwrap_or(1)
    }
}

#[get("/")]
async fn index(data: web::Data<DashboardState>, query: web::Query<PageQuery>) -> impl Responder {
    let page = query.page_number();
    tracing::debug!("Serving dashboard page {page}");
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(data.page(page).to_owned())
}

pub fn start_server(state: DashboardState, host: &str, port: u16) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || App::new().app_data(state.clone()).service(index))
        .bind((host, port))?
        .run();

    Ok(server)
}
