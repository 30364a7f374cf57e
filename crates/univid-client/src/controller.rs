//! Caller-side state for a single analysis at a time.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::{debug, error};
use univid_models::{ModelError, VideoRecord};

use crate::analyzer::Analyzer;
use crate::traits::{MetadataSource, PlatformClassifier};

pub const UNRECOGNIZED_MESSAGE: &str =
    "Could not identify the video platform from the URL. Please check the URL and try again.";
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "An error occurred while analyzing the URL. Please try again later.";

/// What a front end should currently show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    /// Single-line error banner
    Failed(String),
    /// Result card
    Ready(VideoRecord),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// Result of [`AnalysisController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submission ran to completion and left the controller in this state
    Settled(ViewState),
    /// Another analysis was already in flight; nothing changed
    Busy,
}

/// Owns the in-flight flag and the last result.
///
/// At most one analysis runs at a time. A submit issued while another is
/// in flight is rejected rather than queued; there is no cancellation.
pub struct AnalysisController<C, M> {
    analyzer: Analyzer<C, M>,
    busy: AtomicBool,
    state: watch::Sender<ViewState>,
}

impl<C, M> AnalysisController<C, M>
where
    C: PlatformClassifier,
    M: MetadataSource,
{
    pub fn new(analyzer: Analyzer<C, M>) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            analyzer,
            busy: AtomicBool::new(false),
            state,
        }
    }

    /// Current view state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Watch state transitions (Loading, then Failed or Ready).
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Run one analysis and publish its outcome.
    pub async fn submit(&self, url: &str) -> SubmitOutcome {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Analysis already in flight, ignoring submit");
            return SubmitOutcome::Busy;
        }
        let _busy = scopeguard::guard(&self.busy, |busy| busy.store(false, Ordering::Release));

        if url.trim().is_empty() {
            return SubmitOutcome::Settled(self.publish(ViewState::Failed(
                ModelError::EmptyUrl.to_string(),
            )));
        }

        self.state.send_replace(ViewState::Loading);

        let next = match self.analyzer.analyze(url).await {
            Ok(record) if record.is_displayable() => ViewState::Ready(record),
            Ok(_) => ViewState::Failed(UNRECOGNIZED_MESSAGE.to_string()),
            Err(e) => {
                error!("Analysis failed: {}", e);
                ViewState::Failed(ANALYSIS_FAILED_MESSAGE.to_string())
            }
        };

        SubmitOutcome::Settled(self.publish(next))
    }

    fn publish(&self, next: ViewState) -> ViewState {
        self.state.send_replace(next.clone());
        next
    }
}
