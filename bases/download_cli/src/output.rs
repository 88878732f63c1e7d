// bases/download_cli/src/output.rs
use media_downloader::{AcquisitionProgress, AcquisitionReport, DownloadStatus};
use playlist_pipeline::{
    PipelineError, PipelineObserver, PipelinePaths, PipelineSummary, PostProcessReport, Stage,
};
use std::path::Path;
use track_resolver::{ResolutionProgress, ResolutionReport};

pub struct OutputHandler {
    verbose: bool,
}

impl OutputHandler {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn print_resolution_complete(&self, report: &ResolutionReport, paths: &PipelinePaths) {
        println!(
            "Found {} of {} tracks",
            report.resolved.len(),
            report.total()
        );
        println!("  found list:     {}", paths.found.display());
        println!("  not found list: {}", paths.not_found.display());
        if report.cancelled > 0 {
            println!("  {} tracks were not searched (interrupted)", report.cancelled);
        }
    }

    pub fn print_acquisition_complete(&self, report: &AcquisitionReport, destination: &Path) {
        println!(
            "Downloaded {} of {} tracks to {} ({} new, {} already present, {} failed)",
            report.success_count(),
            report.total(),
            destination.display(),
            report.downloaded_count(),
            report.skipped_count(),
            report.failed_count()
        );
    }

    pub fn print_post_process_complete(&self, report: &PostProcessReport) {
        println!("Tagged {} files", report.succeeded);
        if report.failed > 0 {
            println!("  {} could not be tagged", report.failed);
        }
        if report.missing > 0 {
            println!("  {} listed tracks have no file yet", report.missing);
        }
    }

    pub fn print_summary(&self, summary: &PipelineSummary, paths: &PipelinePaths) {
        self.print_resolution_complete(&summary.resolution, paths);
        self.print_acquisition_complete(&summary.acquisition, &paths.destination);
        if let Some(post) = &summary.post_processing {
            self.print_post_process_complete(post);
        }
    }

    pub fn print_interrupted(&self) {
        println!("Interrupted; run the same command again to pick up where this left off");
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        eprintln!("Error: {}", error);

        if self.verbose {
            eprintln!("\nError details:");
            error.chain().skip(1).for_each(|cause| {
                eprintln!("  caused by: {}", cause);
            });
        }
    }
}

impl PipelineObserver for OutputHandler {
    fn stage_started(&mut self, stage: Stage, total: usize) {
        println!("Starting {} of {} tracks", stage, total);
    }

    fn resolved(&mut self, progress: ResolutionProgress<'_>) {
        let result = progress.result;
        let position = format!("[{}/{}]", progress.processed, progress.total);

        match (&result.url, &result.failure) {
            (Some(url), _) => {
                println!("{} FOUND: {}", position, result.name);
                if self.verbose {
                    let title = result.title.as_deref().unwrap_or_default();
                    println!("        {} ({})", url, title);
                }
            }
            (None, Some(failure)) => println!("{} FAILED: {} ({})", position, result.name, failure),
            (None, None) => println!("{} FAILED: {}", position, result.name),
        }
    }

    fn acquired(&mut self, progress: AcquisitionProgress<'_>) {
        let position = format!("[{}/{}]", progress.index, progress.total);

        match &progress.outcome.status {
            DownloadStatus::Downloaded { path } => {
                println!("{} DONE: {}", position, progress.name);
                if self.verbose {
                    println!("        {}", path.display());
                }
            }
            DownloadStatus::Skipped { .. } => println!("{} SKIP: {}", position, progress.name),
            DownloadStatus::Failed(failure) => {
                println!("{} ERROR: {}: {}", position, progress.name, failure)
            }
        }
    }

    fn post_processed(&mut self, file: &Path, result: Result<(), &PipelineError>) {
        match result {
            Ok(()) if self.verbose => println!("Tagged {}", file.display()),
            Ok(()) => {}
            Err(e) => println!("Tagging failed: {}", e),
        }
    }
}
