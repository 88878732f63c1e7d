use crate::resolver::Resolver;
use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::info;
use track_primitives::{
    ResolutionFailure, ResolutionResult, ResolvedEntry, TrackRequest, UnresolvedEntry,
};

/// Kept low on purpose: being blocked by the provider costs more than speed
pub const DEFAULT_WORKERS: usize = 3;

/// Progress notification emitted after every finished resolution
#[derive(Debug, Clone, Copy)]
pub struct ResolutionProgress<'a> {
    pub processed: usize,
    pub total: usize,
    pub result: &'a ResolutionResult,
}

/// Outcome of a whole resolution batch, in completion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub resolved: Vec<ResolvedEntry>,
    pub unresolved: Vec<UnresolvedEntry>,
    /// Unresolved because the batch was cancelled rather than by the provider
    pub cancelled: usize,
}

impl ResolutionReport {
    pub fn total(&self) -> usize {
        self.resolved.len() + self.unresolved.len()
    }

    fn record(&mut self, result: ResolutionResult) {
        if result.failure == Some(ResolutionFailure::Cancelled) {
            self.cancelled += 1;
        }
        match result.into_entry() {
            Ok(found) => self.resolved.push(found),
            Err(missing) => self.unresolved.push(missing),
        }
    }
}

impl Resolver {
    /// Resolve every request with at most `workers` searches in flight
    ///
    /// Each request produces exactly one outcome, in completion order. The
    /// calling task owns the report; resolutions only hand back values.
    ///
    /// There is no overall timeout: a provider call that never returns
    /// holds up the whole batch.
    pub async fn resolve_all<F>(
        &self,
        requests: Vec<TrackRequest>,
        workers: usize,
        cancel: &CancellationToken,
        mut on_progress: F,
    ) -> ResolutionReport
    where
        F: FnMut(ResolutionProgress<'_>),
    {
        let total = requests.len();
        let workers = workers.max(1);
        info!("Resolving {} tracks with {} workers", total, workers);

        let mut completions = std::pin::pin!(stream::iter(requests)
            .map(move |request| async move { self.resolve(&request, cancel).await })
            .buffer_unordered(workers));

        let mut report = ResolutionReport::default();
        let mut processed = 0;

        while let Some(result) = completions.next().await {
            processed += 1;
            on_progress(ResolutionProgress {
                processed,
                total,
                result: &result,
            });
            report.record(result);
        }

        info!(
            "Resolution finished: {} found, {} not found",
            report.resolved.len(),
            report.unresolved.len()
        );
        report
    }
}
