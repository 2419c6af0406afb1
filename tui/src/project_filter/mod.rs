//! Category-filterable project list.
//!
//! `ProjectFilterView` owns the category list, the current `ViewState` and
//! the cancellation handle of the outstanding fetch. All state changes go
//! through `ViewState::reduce`; the view only turns the returned fetch
//! requests into background loads.

mod loader;
mod render;
mod state;

pub use loader::LoadRequest;
pub use loader::ProjectLoader;
pub use loader::load_projects;
pub use loader::spawn_loader;
pub use state::Category;
pub use state::DEFAULT_CATEGORY;
pub use state::FETCH_FAILED_MESSAGE;
pub use state::FetchOutcome;
pub use state::FetchRequest;
pub use state::ProjectSummary;
pub use state::Transition;
pub use state::ViewEvent;
pub use state::ViewState;
pub use state::ViewStatus;

use showcase_async_utils::LatestRequest;
use showcase_async_utils::RequestToken;

/// Fixed external images referenced by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    pub logo_url: String,
    pub failure_image_url: String,
}

pub struct ProjectFilterView {
    categories: Vec<Category>,
    assets: Assets,
    state: ViewState,
    requests: LatestRequest,
    loader: ProjectLoader,
    scroll_top: usize,
}

impl ProjectFilterView {
    /// `initial_category` must be one of `categories`; otherwise the first
    /// category (or `ALL` for an empty list) is used.
    pub fn new(
        categories: Vec<Category>,
        assets: Assets,
        initial_category: &str,
        loader: ProjectLoader,
    ) -> Self {
        let category = if categories.iter().any(|c| c.id == initial_category) {
            initial_category.to_string()
        } else {
            let fallback = categories
                .first()
                .map_or(DEFAULT_CATEGORY, |c| c.id.as_str())
                .to_string();
            tracing::warn!(
                requested = initial_category,
                fallback = fallback.as_str(),
                "initial category is not in the category list"
            );
            fallback
        };
        Self {
            categories,
            assets,
            state: ViewState::new(category),
            requests: LatestRequest::new(),
            loader,
            scroll_top: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Token of the fetch currently allowed to update the view.
    pub fn latest_request(&self) -> Option<RequestToken> {
        self.requests.current()
    }

    pub fn mount(&mut self) {
        self.dispatch(ViewEvent::Mount);
    }

    pub fn select_category(&mut self, id: &str) {
        if !self.categories.iter().any(|c| c.id == id) {
            tracing::warn!(category = id, "ignoring unknown category");
            return;
        }
        self.dispatch(ViewEvent::SelectCategory(id.to_string()));
    }

    pub fn select_next_category(&mut self) {
        self.step_category(1);
    }

    pub fn select_previous_category(&mut self) {
        self.step_category(-1);
    }

    pub fn retry(&mut self) {
        self.dispatch(ViewEvent::Retry);
    }

    pub fn on_fetch_finished(&mut self, token: RequestToken, outcome: FetchOutcome) {
        self.requests.finish(token);
        self.dispatch(ViewEvent::FetchFinished { token, outcome });
    }

    pub fn scroll_down(&mut self) {
        let len = self.state.projects().len();
        if self.scroll_top + 1 < len {
            self.scroll_top += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_top = self.scroll_top.saturating_sub(1);
    }

    /// Stop waiting on the outstanding fetch, e.g. on shutdown.
    pub fn cancel_pending(&mut self) {
        self.requests.cancel();
    }

    fn step_category(&mut self, delta: isize) {
        if self.categories.is_empty() {
            return;
        }
        let len = self.categories.len() as isize;
        let current = self
            .categories
            .iter()
            .position(|c| c.id == self.state.category())
            .map_or(0, |idx| idx as isize);
        let next = (current + delta).rem_euclid(len) as usize;
        let id = self.categories[next].id.clone();
        self.select_category(&id);
    }

    fn dispatch(&mut self, event: ViewEvent) {
        let previous_pending = self.state.pending();
        let Transition { state, fetch } = std::mem::take(&mut self.state).reduce(event);
        if fetch.is_some() || state.pending() != previous_pending {
            self.scroll_top = 0;
        }
        self.state = state;

        if let Some(FetchRequest { token, category }) = fetch {
            let cancel = self.requests.supersede(token);
            (self.loader)(LoadRequest {
                token,
                category,
                cancel,
            });
        }
    }
}
