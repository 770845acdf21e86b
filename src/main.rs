mod app;
mod color;
mod config;
mod data;
mod error;
mod sheets;
mod state;
mod ui;

use app::RentDeskApp;
use clap::Parser;
use eframe::egui;

use config::Config;
use data::provider::DemoProperties;
use sheets::client::SheetsClient;
use sheets::SheetLoader;
use state::{AppState, ListSection, PropertySection};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // A missing .env file is fine; only report one that fails to parse.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            log::warn!("Ignoring .env: {e}");
        }
    }

    let config = Config::parse();

    // Validate credentials once, up front. A bad key disables the list
    // section only; the rental view still runs.
    let loader = match config.service_account() {
        Ok(account) => {
            log::info!("Using service account {}", account.client_email());
            Ok(Box::new(SheetsClient::new(account, config.sheets_api.clone())) as Box<dyn SheetLoader>)
        }
        Err(e) => {
            log::warn!("Sheet credentials unusable: {}", error::error_chain(&e));
            Err(e)
        }
    };

    let list = ListSection::new(loader, config.sheet_url.clone(), config.sheet_name.clone());
    let properties = PropertySection::new(Box::new(DemoProperties));
    let state = AppState::new(list, properties);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "RentDesk – Rental Management",
        options,
        Box::new(|_cc| Ok(Box::new(RentDeskApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI failed: {e}"))
}
