use showcase_async_utils::RequestToken;
use tokio::sync::mpsc::UnboundedSender;

use crate::app_event::AppEvent;
use crate::project_filter::FetchOutcome;

#[derive(Clone, Debug)]
pub struct AppEventSender {
    app_event_tx: UnboundedSender<AppEvent>,
}

impl AppEventSender {
    pub fn new(app_event_tx: UnboundedSender<AppEvent>) -> Self {
        Self { app_event_tx }
    }

    /// Send an event to the app event channel. If it fails, we swallow the
    /// error and log it; the loop has already shut down.
    pub fn send(&self, event: AppEvent) {
        if let Err(e) = self.app_event_tx.send(event) {
            tracing::error!("failed to send event: {e}");
        }
    }

    pub fn send_projects_loaded(&self, token: RequestToken, outcome: FetchOutcome) {
        self.send(AppEvent::ProjectsLoaded { token, outcome });
    }

    pub fn request_redraw(&self) {
        self.send(AppEvent::RequestRedraw);
    }
}
