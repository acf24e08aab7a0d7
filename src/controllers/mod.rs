//! Stateful page controllers.
//!
//! Each page owns one controller: the view layer renders the
//! controller's state and dispatches intents (set a field, submit,
//! confirm a delete), never mutating state directly. Every gateway
//! call is an await point; while one is outstanding the controller is
//! in a well-defined loading or submitting state that the view uses to
//! show spinners and disable re-entrant actions.

pub mod dashboard;
pub mod detail;
pub mod form;
pub mod list;
pub mod search;

pub use dashboard::DashboardController;
pub use detail::{EvaluationDetailController, PatientDetailController};
pub use form::{EvaluationFormController, PatientFormController};
pub use list::{EvaluationListController, PatientListController};
pub use search::SearchController;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lifecycle of a form instance.
///
/// Construction puts the form straight into `Editing`; a failed
/// submission returns to `Editing` with a submit-scoped error, and a
/// successful one parks the form in `Saved` until it is dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
    Saved,
}

/// What a submit attempt did, for the embedding view to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Persisted. Reload the owning list and close the form.
    Saved,
    /// Validation failed; field errors are set and the form stays open.
    Invalid,
    /// The backend rejected the write; the submit error is set and the
    /// form stays open.
    Failed,
    /// The form was not in an editable phase; nothing was sent.
    Ignored,
}

/// Cooperative cancellation handle for in-flight loads.
///
/// A controller load checks the token after each await and discards
/// the result instead of applying it to state once the owning view is
/// gone. The request itself is not aborted.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
