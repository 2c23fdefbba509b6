//! Stateless URL helpers: artwork URL normalization, query-string cleaning
//! and parsing.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Size label substituted into thumbnail URLs.
pub const THUMB_SIZE: &str = "extralarge";
/// Size label substituted into fanart/backdrop URLs.
pub const FANART_SIZE: &str = "extralarge_imax";

// `extralarge_imax` is matched as a unit so that normalization is a fixed
// point on its own output.
static SIZE_LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{format\}|extralarge_imax|extralarge|small|medium|large").unwrap()
});

/// Normalizes an artwork URL and stamps the requested size label into it.
///
/// Protocol-relative URLs are given an `http` scheme, relative paths are
/// joined onto `base_url` when one is supplied, and `https` is downgraded to
/// `http`. The target player cannot fetch artwork over TLS. Finally the
/// `{format}` placeholder or any literal size name is replaced with
/// `size_label`. An empty input yields an empty string.
pub fn normalize_image_url(url: &str, base_url: &str, size_label: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    let mut url = if url.starts_with("//") {
        format!("http://{}", url.trim_start_matches('/'))
    } else if !(url.starts_with("http://") || url.starts_with("https://")) && !base_url.is_empty() {
        format!("{base_url}{url}")
    } else {
        url.to_string()
    };
    if let Some(rest) = url.strip_prefix("https://") {
        url = format!("http://{rest}");
    }
    SIZE_LABEL_REGEX.replace_all(&url, size_label).into_owned()
}

/// Returns a thumbnail URL sized [`THUMB_SIZE`].
pub fn prepare_thumb(url: &str, base_url: &str) -> String {
    normalize_image_url(url, base_url, THUMB_SIZE)
}

/// Returns a fanart URL sized [`FANART_SIZE`].
pub fn prepare_fanart(url: &str, base_url: &str) -> String {
    normalize_image_url(url, base_url, FANART_SIZE)
}

/// Strips playback-hostile query parameters from a video URL.
///
/// Parameters whose name starts with `cc1` (legacy iOS subtitle-track hints)
/// or `alt` (web-player-only hints) are dropped; everything else is kept in
/// order. A URL without a query string is returned unchanged, and a query
/// that loses all its parameters leaves a bare path.
pub fn clean_query(url: &str) -> String {
    let Some((path, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let kept: Vec<&str> = query
        .split('&')
        .filter(|para| !para.is_empty() && !para.starts_with("cc1") && !para.starts_with("alt"))
        .collect();
    if kept.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", kept.join("&"))
    }
}

/// Parses URL parameters from a raw query string into a map.
///
/// The input is percent-decoded first; everything after the first `?` (or
/// the whole string when there is none) is split on `&` and `=`. Only pairs
/// with exactly one `=` are kept, malformed pairs are silently dropped.
pub fn parse_query_parameters(raw: &str) -> HashMap<String, String> {
    let decoded = match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    };
    debug!("parse_query_parameters: {decoded}");
    if decoded.is_empty() {
        return HashMap::new();
    }
    let query = match decoded.split_once('?') {
        Some((_, query)) => query,
        None => decoded.as_str(),
    };
    let mut params = HashMap::new();
    for pair in query.split('&') {
        let split: Vec<&str> = pair.split('=').collect();
        if split.len() == 2 {
            params.insert(split[0].to_string(), split[1].to_string());
        }
    }
    params
}
