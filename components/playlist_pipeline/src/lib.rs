//! Playlist → manifests → audio files
//!
//! Each stage can run on its own against the manifest files
//! (`resolve_playlist`, `acquire_manifest`, `post_process_manifest`), or
//! all together through `Pipeline::run_all`. Per-track problems are
//! counted in the reports; only infrastructure failures surface as
//! `PipelineError`.

mod error;
mod observer;
mod paths;
mod pipeline;
mod post_process;

pub use error::PipelineError;
pub use observer::{NoopObserver, PipelineObserver, Stage};
pub use paths::{
    PipelinePaths, DEFAULT_DESTINATION, DEFAULT_FOUND, DEFAULT_NOT_FOUND, DEFAULT_PLAYLIST,
};
pub use pipeline::{
    acquire_manifest, post_process_manifest, resolve_playlist, Pipeline, PipelineSummary,
};
pub use post_process::{PostProcessReport, PostProcessor};
