// bases/download_cli/src/app.rs
use crate::config::{Config, Mode};
use crate::output::OutputHandler;
use color_eyre::Result;
use media_downloader::{MediaDownloader, YtDlp};
use playlist_pipeline::{
    acquire_manifest, post_process_manifest, resolve_playlist, Pipeline, PostProcessor,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use track_resolver::{Resolver, YtDlpSearch};
use track_tagger::TagWriter;

pub struct App {
    config: Config,
    output: OutputHandler,
}

impl App {
    pub fn new(config: Config) -> Self {
        let output = OutputHandler::new(config.verbose);
        Self { config, output }
    }

    pub async fn run(&mut self, cancel: &CancellationToken) -> Result<()> {
        let config = &self.config;
        let paths = &config.paths;

        match config.mode {
            Mode::Search => {
                YtDlpSearch::check_available()?;
                let resolver = Resolver::new(config.resolver.clone());

                let report =
                    resolve_playlist(&resolver, paths, config.workers, cancel, &mut self.output)
                        .await?;
                self.output.print_resolution_complete(&report, paths);
            }
            Mode::Download => {
                let downloader = self.downloader().await?;

                let report =
                    acquire_manifest(&downloader, &paths.found, cancel, &mut self.output).await?;
                self.output
                    .print_acquisition_complete(&report, downloader.download_path());

                if config.tag {
                    self.tag(cancel).await?;
                }
            }
            Mode::All => {
                YtDlpSearch::check_available()?;
                let mut pipeline =
                    Pipeline::new(Resolver::new(config.resolver.clone()), Arc::new(YtDlp))
                        .with_settings(config.transcode.clone());
                if config.tag {
                    pipeline = pipeline.with_post_processor(Arc::new(TagWriter));
                }

                let summary = pipeline
                    .run_all(paths, config.workers, cancel, &mut self.output)
                    .await?;
                self.output.print_summary(&summary, paths);
            }
            Mode::Tag => self.tag(cancel).await?,
        }

        if cancel.is_cancelled() {
            self.output.print_interrupted();
        }
        Ok(())
    }

    async fn downloader(&self) -> Result<MediaDownloader> {
        let downloader = MediaDownloader::new(&self.config.paths.destination)
            .await?
            .with_settings(self.config.transcode.clone());
        Ok(downloader)
    }

    async fn tag(&mut self, cancel: &CancellationToken) -> Result<()> {
        let tagger: &(dyn PostProcessor + Send + Sync) = &TagWriter;
        let report = post_process_manifest(
            tagger,
            &self.config.paths.found,
            &self.config.paths.destination,
            &self.config.transcode,
            cancel,
            &mut self.output,
        )
        .await?;
        self.output.print_post_process_complete(&report);
        Ok(())
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        self.output.print_error(error);
    }
}
