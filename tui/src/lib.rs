// Forbid accidental stdout/stderr writes in the library portion of the TUI.
// The terminal is owned by ratatui; stray prints corrupt the frame.
#![deny(clippy::print_stdout, clippy::print_stderr)]

use std::sync::Arc;

use showcase_client::ProjectsClient;
use tokio::sync::mpsc::unbounded_channel;

mod app;
pub mod app_event;
pub mod app_event_sender;
mod cli;
pub mod config;
mod key_hint;
pub mod logging;
pub mod project_filter;
mod tui;

pub use cli::Cli;

use crate::app::App;
use crate::app_event_sender::AppEventSender;
use crate::project_filter::ProjectFilterView;
use crate::project_filter::spawn_loader;
use crate::tui::Tui;

pub async fn run_main(cli: Cli) -> color_eyre::Result<()> {
    let config = cli.config_loader().load()?;
    let _log_guard = logging::init(&config.log_dir())?;
    tracing::info!(
        endpoint = %config.endpoint,
        category = config.initial_category.as_str(),
        "starting project showcase"
    );

    let client = ProjectsClient::new(config.endpoint.as_str())?;
    let (app_event_tx, app_event_rx) = unbounded_channel();
    let app_event_tx = AppEventSender::new(app_event_tx);
    let loader = spawn_loader(Arc::new(client), app_event_tx.clone());
    let view = ProjectFilterView::new(
        config.categories.clone(),
        config.assets(),
        &config.initial_category,
        loader,
    );

    let mut tui = Tui::init()?;
    let result = app::run(&mut tui, App::new(view, app_event_tx), app_event_rx).await;
    drop(tui);
    result?;
    Ok(())
}
