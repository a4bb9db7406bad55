// reset; cargo run -- --input ./data/dashboard.xlsx
// reset; cargo run -- --input ./data/reclamos.xlsx --sheet base --schema complaints --header-row 0 --max-columns 5

mod cli;
mod config;
mod logging;
mod server;

use clap::Parser;
use dashboard_lib::{load, utils::write_error_to_log, Dashboard, ERRORS_LOG_FILE};

use crate::{cli::Args, config::AppConfig, server::DashboardState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let arguments = Args::parse();
    logging::init_logging(arguments.verbose)?;

    let config = match AppConfig::resolve(&arguments) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(2);
        }
    };
    let options = match config.load_options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("❌ Invalid schema: {e}");
            std::process::exit(2);
        }
    };

    tracing::info!("Loading {}", options.path.display());
    let dataset = match load(&options) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!("{e}");
            write_error_to_log(e.category(), &e.to_string());
            eprintln!("❌ Could not load the spreadsheet: {e}");
            eprintln!("❌ Check {} for details.", ERRORS_LOG_FILE);
            std::process::exit(1);
        }
    };
    println!(
        "✅ Loaded {} records from sheet '{}'",
        dataset.len(),
        dataset.sheet_name
    );

    let dashboard = Dashboard::build(&dataset, &config.dashboard);
    let state = DashboardState::new(&dashboard);
    tracing::debug!("Rendered {} table pages", state.page_count());

    let server = server::start_server(state, &config.host, config.port)?;
    println!("✅ Dashboard running at http://{}:{}/", config.host, config.port);
    server.await?;

    Ok(())
}
