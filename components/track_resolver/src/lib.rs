//! Track name → source URL resolution
//!
//! A `Resolver` turns one playlist line into a `ResolutionResult`, retrying
//! through jitter, rate-limit cooldowns and transient provider errors.
//! `Resolver::resolve_all` fans a whole playlist out over a small, bounded
//! number of concurrent searches.

mod coordinator;
mod delay;
mod provider;
mod resolver;
mod ytdlp;

pub use coordinator::{ResolutionProgress, ResolutionReport, DEFAULT_WORKERS};
pub use delay::{Delay, TokioDelay};
pub use provider::{
    ErrorClass, ProviderError, SearchHit, SearchProvider, SearchResponse,
    ACCESS_RESTRICTED_MARKER, RATE_LIMIT_MARKER,
};
pub use resolver::{Resolver, ResolverConfig};
pub use ytdlp::YtDlpSearch;
