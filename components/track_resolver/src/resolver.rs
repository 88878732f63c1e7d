use crate::delay::{Delay, TokioDelay};
use crate::provider::{ErrorClass, ProviderError, SearchProvider};
use crate::ytdlp::YtDlpSearch;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use track_primitives::{ResolutionFailure, ResolutionResult, TrackRequest};

/// Retry and pacing knobs for a single resolution
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Total search attempts, rate-limited ones included
    pub max_attempts: u32,
    /// Lower bound of the random pause before every attempt
    pub jitter_min: Duration,
    /// Upper bound of the random pause before every attempt
    pub jitter_max: Duration,
    /// Fixed pause after the provider reports a rate limit
    pub rate_limit_cooldown: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            jitter_min: Duration::from_secs(1),
            jitter_max: Duration::from_secs(3),
            rate_limit_cooldown: Duration::from_secs(20),
        }
    }
}

/// Where one resolution currently stands
///
/// ```text
/// Attempting ──ok──────────────▶ Succeeded
///     │ ├──429──▶ Cooldown ──▶ Attempting (or Failed when out of attempts)
///     │ ├──sign-in / empty ────▶ Failed
///     │ └──other, last attempt─▶ Failed
///     └──other──────────────────▶ Attempting
/// ```
#[derive(Debug)]
enum AttemptState {
    Attempting { attempt: u32 },
    Cooldown { attempt: u32, last_error: String },
    Succeeded { url: String, title: String },
    Failed(ResolutionFailure),
}

/// Maps track names to source URLs through a search provider
#[derive(Clone)]
pub struct Resolver {
    provider: Arc<dyn SearchProvider + Send + Sync>,
    delay: Arc<dyn Delay + Send + Sync>,
    config: ResolverConfig,
}

impl Resolver {
    /// Resolver backed by `yt-dlp` and real sleeps
    pub fn new(config: ResolverConfig) -> Self {
        Self::new_with_provider(Arc::new(YtDlpSearch), Arc::new(TokioDelay), config)
    }

    pub fn new_with_provider(
        provider: Arc<dyn SearchProvider + Send + Sync>,
        delay: Arc<dyn Delay + Send + Sync>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            provider,
            delay,
            config,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve one track, never failing the caller
    ///
    /// Cancellation is observed before each attempt. An attempt already
    /// waiting on the provider runs to completion.
    pub async fn resolve(
        &self,
        request: &TrackRequest,
        cancel: &CancellationToken,
    ) -> ResolutionResult {
        let mut state = AttemptState::Attempting { attempt: 1 };

        loop {
            state = match state {
                AttemptState::Attempting { attempt } => {
                    if cancel.is_cancelled() {
                        AttemptState::Failed(ResolutionFailure::Cancelled)
                    } else {
                        self.attempt(request, attempt).await
                    }
                }
                AttemptState::Cooldown {
                    attempt,
                    last_error,
                } => {
                    warn!(
                        "Rate limited while resolving {:?}, sleeping {:?}",
                        request.name(),
                        self.config.rate_limit_cooldown
                    );
                    self.delay.sleep(self.config.rate_limit_cooldown).await;
                    self.next_attempt(attempt, last_error)
                }
                AttemptState::Succeeded { url, title } => {
                    return ResolutionResult::found(request, url, title);
                }
                AttemptState::Failed(failure) => {
                    return ResolutionResult::failed(request, failure);
                }
            };
        }
    }

    async fn attempt(&self, request: &TrackRequest, attempt: u32) -> AttemptState {
        let pause = self.jitter();
        self.delay.sleep(pause).await;

        debug!(
            "Attempt {}/{} for {:?}",
            attempt,
            self.config.max_attempts,
            request.name()
        );

        match self.provider.search(request.name()).await {
            Ok(response) => match response.candidate().and_then(|hit| {
                hit.canonical_url()
                    .map(|url| (url.to_string(), hit.display_title().to_string()))
            }) {
                Some((url, title)) => AttemptState::Succeeded { url, title },
                None => AttemptState::Failed(ResolutionFailure::NoResults),
            },
            Err(error) => self.after_error(request, attempt, error),
        }
    }

    fn after_error(
        &self,
        request: &TrackRequest,
        attempt: u32,
        error: ProviderError,
    ) -> AttemptState {
        let last_error = error.to_string();
        match error.class() {
            ErrorClass::RateLimited => AttemptState::Cooldown {
                attempt,
                last_error,
            },
            ErrorClass::AccessRestricted => {
                AttemptState::Failed(ResolutionFailure::AccessRestricted)
            }
            ErrorClass::Transient => {
                debug!(
                    "Attempt {} for {:?} failed: {}",
                    attempt,
                    request.name(),
                    last_error
                );
                self.next_attempt(attempt, last_error)
            }
        }
    }

    fn next_attempt(&self, attempt: u32, last_error: String) -> AttemptState {
        if attempt >= self.config.max_attempts {
            AttemptState::Failed(ResolutionFailure::Exhausted { last_error })
        } else {
            AttemptState::Attempting {
                attempt: attempt + 1,
            }
        }
    }

    fn jitter(&self) -> Duration {
        let min = self.config.jitter_min.as_secs_f64();
        let max = self.config.jitter_max.as_secs_f64();
        if max <= min {
            return self.config.jitter_min;
        }
        Duration::from_secs_f64(rand::thread_rng().gen_range(min..=max))
    }
}
