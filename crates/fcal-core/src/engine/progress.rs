use std::sync::Arc;

/// Progress events emitted during detector construction.
#[derive(Debug, Clone)]
pub enum Progress {
    /// A named construction phase has started.
    PhaseStart { name: &'static str },
    /// The current phase has finished.
    PhaseFinish,
    /// Module placement is about to begin with a known total.
    ModulesStart { total: usize },
    /// One module has been assembled and placed.
    ModulePlaced,
    /// A free-form status message.
    Message(String),
}

type Callback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Reports construction progress to an optional observer.
///
/// Workflows emit events through a reporter; callers that do not care pass
/// [`ProgressReporter::default`], which discards everything.
#[derive(Clone, Default)]
pub struct ProgressReporter {
    callback: Option<Callback>,
}

impl ProgressReporter {
    pub fn new<F: Fn(Progress) + Send + Sync + 'static>(callback: F) -> Self {
        Self {
            callback: Some(Arc::new(callback)),
        }
    }

    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    pub fn phase(&self, name: &'static str) {
        self.report(Progress::PhaseStart { name });
    }

    pub fn finish_phase(&self) {
        self.report(Progress::PhaseFinish);
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("observed", &self.callback.is_some())
            .finish()
    }
}
