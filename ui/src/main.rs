pub use app::App;

pub mod app;
mod data;
mod dialog;
mod extension;
mod page;
mod submitter;
mod toast;

use cli_log::*;
use client::client::Client;
use client::config;

use crate::submitter::Submitter;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    init_cli_log!("landing");
    color_eyre::install()?;
    let base_url = config::base_url()?;
    info!("authentication backend at {}", base_url);
    let submitter = Submitter::new(Client::new(base_url));
    let terminal = ratatui::init();
    let result = App::new(submitter).run(terminal);
    ratatui::restore();
    result
}
