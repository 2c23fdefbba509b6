//! Resolves SVT Play provider payloads into playable stream URLs.
//!
//! A provider payload lists the video and subtitle references the backend
//! offers for a show. [`StreamResolver`] picks the playable HLS reference,
//! optionally narrows it to a bandwidth-bracketed variant from the master
//! playlist, and strips query parameters the target player cannot handle.

pub mod bandwidth;
pub mod config;
pub mod error;
pub mod formats;
pub mod http;
pub mod payload;
pub mod resolver;
pub mod urlutil;

pub use config::{BANDWIDTH_TIERS, ResolverConfig};
pub use error::ResolverError;
pub use formats::VideoFormat;
pub use payload::{ProviderPayload, ResolutionResult, SubtitleReference, VideoReference};
pub use resolver::StreamResolver;
