use showcase_async_utils::RequestToken;

use crate::project_filter::FetchOutcome;

#[derive(Debug)]
pub enum AppEvent {
    /// A background listing fetch finished. Routed through the view's
    /// reducer, which drops it unless `token` is still the latest request.
    ProjectsLoaded {
        token: RequestToken,
        outcome: FetchOutcome,
    },

    /// Request a redraw on the next loop iteration.
    RequestRedraw,

    /// Request to exit the application gracefully.
    ExitRequest,
}
