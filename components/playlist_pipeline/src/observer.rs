use crate::error::PipelineError;
use media_downloader::AcquisitionProgress;
use std::fmt;
use std::path::Path;
use track_resolver::ResolutionProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolution,
    Acquisition,
    PostProcessing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Resolution => write!(f, "resolution"),
            Stage::Acquisition => write!(f, "acquisition"),
            Stage::PostProcessing => write!(f, "post-processing"),
        }
    }
}

/// Progress hooks for a pipeline run
///
/// Every hook is called from the task driving the pipeline, so
/// implementations need no synchronisation.
pub trait PipelineObserver {
    fn stage_started(&mut self, _stage: Stage, _total: usize) {}

    fn resolved(&mut self, _progress: ResolutionProgress<'_>) {}

    fn acquired(&mut self, _progress: AcquisitionProgress<'_>) {}

    fn post_processed(&mut self, _file: &Path, _result: Result<(), &PipelineError>) {}
}

/// Ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}
