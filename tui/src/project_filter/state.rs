//! State machine behind the project filter view.
//!
//! Every transition consumes the previous `ViewState` and returns the next
//! one together with the fetch (if any) the caller must issue. Completions
//! are only applied when their token matches the request the state is
//! waiting on, so a slow response can never overwrite a newer one.

use serde::Deserialize;
use showcase_async_utils::RequestToken;
use showcase_client::ProjectRecord;

pub const DEFAULT_CATEGORY: &str = "ALL";

/// Shown for every fetch failure regardless of cause.
pub const FETCH_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";

/// A selectable filter value and its label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: String,
    pub display_text: String,
}

impl Category {
    pub fn new(id: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_text: display_text.into(),
        }
    }
}

/// Display-ready project. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}

impl From<ProjectRecord> for ProjectSummary {
    fn from(record: ProjectRecord) -> Self {
        let image_url = record
            .image_url
            .filter(|url| !url.trim().is_empty());
        Self {
            id: record.id,
            name: record.name,
            image_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    Error(String),
    Loaded(Vec<ProjectSummary>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded(Vec<ProjectSummary>),
    Failed,
    /// The worker observed its cancellation token before finishing.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Mount,
    SelectCategory(String),
    Retry,
    FetchFinished {
        token: RequestToken,
        outcome: FetchOutcome,
    },
}

/// A fetch the caller must start on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: RequestToken,
    pub category: String,
}

#[must_use]
#[derive(Debug)]
pub struct Transition {
    pub state: ViewState,
    pub fetch: Option<FetchRequest>,
}

impl Transition {
    fn unchanged(state: ViewState) -> Self {
        Self { state, fetch: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    category: String,
    status: ViewStatus,
    pending: Option<RequestToken>,
    last_issued: Option<RequestToken>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY)
    }
}

impl ViewState {
    /// State before mount: loading, nothing requested yet.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            status: ViewStatus::Loading,
            pending: None,
            last_issued: None,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    /// Token of the request whose result the state is waiting for.
    pub fn pending(&self) -> Option<RequestToken> {
        self.pending
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, ViewStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ViewStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Projects of the last successful fetch; empty in any other state.
    pub fn projects(&self) -> &[ProjectSummary] {
        match &self.status {
            ViewStatus::Loaded(projects) => projects,
            _ => &[],
        }
    }

    pub fn reduce(self, event: ViewEvent) -> Transition {
        match event {
            ViewEvent::Mount => self.fetch(),
            ViewEvent::SelectCategory(category) => {
                if category == self.category {
                    return Transition::unchanged(self);
                }
                Self { category, ..self }.fetch()
            }
            ViewEvent::Retry => {
                if matches!(self.status, ViewStatus::Error(_)) {
                    self.fetch()
                } else {
                    Transition::unchanged(self)
                }
            }
            ViewEvent::FetchFinished { token, outcome } => self.finish(token, outcome),
        }
    }

    fn fetch(mut self) -> Transition {
        let token = self
            .last_issued
            .map_or_else(RequestToken::first, RequestToken::next);
        self.last_issued = Some(token);
        self.pending = Some(token);
        self.status = ViewStatus::Loading;
        let fetch = FetchRequest {
            token,
            category: self.category.clone(),
        };
        Transition {
            state: self,
            fetch: Some(fetch),
        }
    }

    fn finish(mut self, token: RequestToken, outcome: FetchOutcome) -> Transition {
        if self.pending != Some(token) {
            tracing::debug!(%token, pending = ?self.pending, "dropping stale fetch result");
            return Transition::unchanged(self);
        }
        match outcome {
            FetchOutcome::Cancelled => {
                tracing::debug!(%token, "fetch cancelled");
                return Transition::unchanged(self);
            }
            FetchOutcome::Loaded(projects) => {
                self.status = ViewStatus::Loaded(projects);
            }
            FetchOutcome::Failed => {
                self.status = ViewStatus::Error(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        self.pending = None;
        Transition::unchanged(self)
    }
}
