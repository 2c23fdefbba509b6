//! Bandwidth-bracketed variant selection from HLS master playlists.

use m3u8_rs::Playlist;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::config::next_tier;
use crate::error::ResolverError;

/// Fetches an HLS master playlist and picks the variant inside the bracket
/// configured by `low_bandwidth`.
///
/// Network failures are not caught here; they surface to the caller.
pub async fn select_for_bandwidth(
    client: &Client,
    manifest_url: &str,
    low_bandwidth: u32,
) -> Result<String, ResolverError> {
    let base = Url::parse(manifest_url).map_err(|e| ResolverError::InvalidUrl(e.to_string()))?;
    let body = client
        .get(manifest_url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    select_variant(&body, &base, low_bandwidth)
}

/// Returns the first variant whose advertised bandwidth in kbit/s lies
/// strictly inside `(low_bandwidth, next tier)`, with its URI resolved
/// against the manifest URL. The top tier has no upper bound.
pub fn select_variant(
    manifest: &[u8],
    base: &Url,
    low_bandwidth: u32,
) -> Result<String, ResolverError> {
    let high_bandwidth = next_tier(low_bandwidth)?;
    // A body the parser rejects advertises no variants, just like a media
    // playlist; only network failures abort resolution.
    let variants = match m3u8_rs::parse_playlist_res(manifest) {
        Ok(Playlist::MasterPlaylist(pl)) => pl.variants,
        Ok(Playlist::MediaPlaylist(_)) => Vec::new(),
        Err(e) => {
            debug!("manifest did not parse as a playlist: {e}");
            Vec::new()
        }
    };
    for variant in variants {
        let kbps = variant.bandwidth / 1000;
        let above = u64::from(low_bandwidth) < kbps;
        let below = high_bandwidth.is_none_or(|high| kbps < u64::from(high));
        if above && below {
            debug!("found variant with bandwidth {kbps} for selected bandwidth {low_bandwidth}");
            let resolved = base
                .join(&variant.uri)
                .map_err(|e| ResolverError::InvalidUrl(e.to_string()))?;
            debug!("returned stream url: {resolved}");
            return Ok(resolved.to_string());
        }
    }
    Err(ResolverError::NoStreamForBandwidth(low_bandwidth))
}
