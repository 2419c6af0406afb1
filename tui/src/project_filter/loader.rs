use std::sync::Arc;

use showcase_async_utils::OrCancelExt;
use showcase_async_utils::RequestToken;
use showcase_client::ProjectSource;
use tokio_util::sync::CancellationToken;

use super::FetchOutcome;
use super::ProjectSummary;
use crate::app_event_sender::AppEventSender;

/// One listing fetch handed to the loader by the view.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub token: RequestToken,
    pub category: String,
    pub cancel: CancellationToken,
}

/// Starts a fetch in the background. Completion is reported through the
/// app event channel, never by return value.
pub type ProjectLoader = Arc<dyn Fn(LoadRequest) + Send + Sync>;

/// Loader that runs each request on the tokio runtime against `source`.
pub fn spawn_loader(source: Arc<dyn ProjectSource>, app_event_tx: AppEventSender) -> ProjectLoader {
    Arc::new(move |request: LoadRequest| {
        let source = Arc::clone(&source);
        let tx = app_event_tx.clone();
        tokio::spawn(async move {
            let LoadRequest {
                token,
                category,
                cancel,
            } = request;
            let outcome = load_projects(source.as_ref(), token, &category, &cancel).await;
            tx.send_projects_loaded(token, outcome);
            tx.request_redraw();
        });
    })
}

/// Fetch `category` and map the result onto a reducer outcome. Every
/// failure collapses to `FetchOutcome::Failed`; the cause is only logged.
pub async fn load_projects(
    source: &dyn ProjectSource,
    token: RequestToken,
    category: &str,
    cancel: &CancellationToken,
) -> FetchOutcome {
    tracing::info!(%token, category, "fetching projects");
    match source.list_projects(category).or_cancel(cancel).await {
        Err(_) => {
            tracing::debug!(%token, category, "fetch superseded before completion");
            FetchOutcome::Cancelled
        }
        Ok(Ok(records)) => {
            tracing::info!(%token, category, count = records.len(), "projects loaded");
            FetchOutcome::Loaded(records.into_iter().map(ProjectSummary::from).collect())
        }
        Ok(Err(err)) => {
            tracing::warn!(%token, category, error = %err, "project listing failed");
            FetchOutcome::Failed
        }
    }
}
