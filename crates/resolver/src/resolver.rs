use reqwest::Client;
use tracing::{debug, error, info};
use url::Url;

use crate::bandwidth::select_for_bandwidth;
use crate::config::ResolverConfig;
use crate::error::ResolverError;
use crate::formats::VideoFormat;
use crate::payload::{ProviderPayload, ResolutionResult};
use crate::urlutil::clean_query;

/// Resolves provider payloads into playable video and subtitle URLs,
/// honoring the configured bandwidth selection.
pub struct StreamResolver {
    client: Client,
    config: ResolverConfig,
}

impl StreamResolver {
    pub fn new(client: Client, config: ResolverConfig) -> Self {
        Self { client, config }
    }

    /// Resolves a payload. Without an `hls` video reference the result is
    /// empty and no subtitle, extension or bandwidth work is attempted.
    ///
    /// A bandwidth bracket with no matching variant degrades to an empty
    /// video URL; network failures abort resolution.
    pub async fn resolve(
        &self,
        payload: &ProviderPayload,
    ) -> Result<ResolutionResult, ResolverError> {
        let Some(selected) = select_video(payload) else {
            return Ok(ResolutionResult {
                video_url: None,
                subtitle_url: None,
            });
        };
        let mut video_url = Some(match alt_url(&selected) {
            Some(alt) => self.resolve_alt(&alt).await?,
            None => selected,
        });
        let subtitle_url = select_subtitle(payload);
        let extension = video_url.as_deref().and_then(VideoFormat::from_url);
        if extension == Some(VideoFormat::Hls) && self.config.bandwidth_select() {
            if let (Some(url), Some(low_bandwidth)) = (video_url.clone(), self.config.bandwidth()) {
                match select_for_bandwidth(&self.client, &url, low_bandwidth).await {
                    Ok(variant) => video_url = Some(variant),
                    Err(err @ ResolverError::NoStreamForBandwidth(_)) => {
                        error!("{err}");
                        video_url = None;
                    }
                    Err(err) => return Err(err),
                }
            }
        }
        Ok(ResolutionResult {
            video_url: video_url.map(|url| clean_query(&url)),
            subtitle_url,
        })
    }

    /// Follows an alternate URL to its final location after redirects.
    async fn resolve_alt(&self, alt: &str) -> Result<String, ResolverError> {
        let response = self.client.get(alt).send().await?.error_for_status()?;
        let resolved = response.url().to_string();
        debug!("resolved alternate url: {resolved}");
        Ok(resolved)
    }
}

/// Scans the video references for `hls` entries; the last one in list order
/// wins.
fn select_video(payload: &ProviderPayload) -> Option<String> {
    let mut video_url = None;
    for video in &payload.video_references {
        if video.format == "hls" {
            video_url = Some(video.url.clone());
        }
    }
    video_url
}

/// Extracts the value of the `alt` query parameter, if the URL carries one.
fn alt_url(video_url: &str) -> Option<String> {
    let parsed = Url::parse(video_url).ok()?;
    parsed
        .query_pairs()
        .find(|(name, _)| name == "alt")
        .map(|(_, value)| value.into_owned())
}

/// Scans the subtitle references; the last `.wsrt` URL in list order wins.
/// Unknown non-empty formats are skipped with a diagnostic. An absent
/// `subtitleReferences` key means no subtitles were offered.
fn select_subtitle(payload: &ProviderPayload) -> Option<String> {
    let references = payload.subtitle_references.as_ref()?;
    let mut url = None;
    for subtitle in references {
        if subtitle.url.ends_with(".wsrt") {
            url = Some(subtitle.url.clone());
        } else if !subtitle.url.is_empty() {
            info!("skipping unknown subtitle: {}", subtitle.url);
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::ProviderPayload;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolver(config: ResolverConfig) -> StreamResolver {
        StreamResolver::new(Client::new(), config)
    }

    #[tokio::test]
    async fn payloads_without_hls_references_resolve_to_nothing() {
        let payload = ProviderPayload::from_json(
            r#"{
                "videoReferences": [{"format": "dash", "url": "http://x/v.mpd"}],
                "subtitleReferences": [{"url": "http://x/sub.wsrt"}]
            }"#,
        )
        .unwrap();

        let result = resolver(ResolverConfig::default())
            .resolve(&payload)
            .await
            .unwrap();
        assert_eq!(result.video_url, None);
        assert_eq!(result.subtitle_url, None);
    }

    #[tokio::test]
    async fn the_last_hls_reference_wins() {
        let payload = ProviderPayload::from_json(
            r#"{
                "videoReferences": [
                    {"format": "hls", "url": "http://x/first.m3u8"},
                    {"format": "dash", "url": "http://x/v.mpd"},
                    {"format": "hls", "url": "http://x/second.m3u8"}
                ]
            }"#,
        )
        .unwrap();

        let result = resolver(ResolverConfig::default())
            .resolve(&payload)
            .await
            .unwrap();
        assert_eq!(result.video_url.as_deref(), Some("http://x/second.m3u8"));
    }

    #[tokio::test]
    async fn the_last_wsrt_subtitle_wins_and_unknowns_are_skipped() {
        let payload = ProviderPayload::from_json(
            r#"{
                "videoReferences": [{"format": "hls", "url": "http://x/v.m3u8"}],
                "subtitleReferences": [
                    {"url": "http://x/a.wsrt"},
                    {"url": "http://x/b.vtt"},
                    {"url": ""},
                    {"url": "http://x/c.wsrt"}
                ]
            }"#,
        )
        .unwrap();

        let result = resolver(ResolverConfig::default())
            .resolve(&payload)
            .await
            .unwrap();
        assert_eq!(result.subtitle_url.as_deref(), Some("http://x/c.wsrt"));
    }

    #[tokio::test]
    async fn the_video_url_is_cleaned_before_returning() {
        let payload = ProviderPayload::from_json(
            r#"{
                "videoReferences": [
                    {"format": "hls", "url": "http://x/v.m3u8?a=1&cc1_track=sv"}
                ],
                "subtitleReferences": [{"url": "http://x/sub.wsrt?cc1=keep"}]
            }"#,
        )
        .unwrap();

        let result = resolver(ResolverConfig::default())
            .resolve(&payload)
            .await
            .unwrap();
        assert_eq!(result.video_url.as_deref(), Some("http://x/v.m3u8?a=1"));
        // The subtitle URL is returned uncleaned.
        assert_eq!(
            result.subtitle_url.as_deref(),
            Some("http://x/sub.wsrt?cc1=keep")
        );
    }

    #[tokio::test]
    async fn alternate_urls_are_followed_to_their_final_location() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alt"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("location", format!("{}/final.m3u8", server.uri())),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/final.m3u8"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let payload = ProviderPayload::from_json(&format!(
            r#"{{
                "videoReferences": [
                    {{"format": "hls", "url": "http://x/v.m3u8?alt={}/alt"}}
                ]
            }}"#,
            server.uri()
        ))
        .unwrap();

        let result = resolver(ResolverConfig::default())
            .resolve(&payload)
            .await
            .unwrap();
        assert_eq!(
            result.video_url,
            Some(format!("{}/final.m3u8", server.uri()))
        );
    }

    #[tokio::test]
    async fn bandwidth_selection_replaces_the_master_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/master.m3u8"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=400000\nvariant400.m3u8\n",
            ))
            .mount(&server)
            .await;

        let payload = ProviderPayload::from_json(&format!(
            r#"{{"videoReferences": [{{"format": "hls", "url": "{}/master.m3u8"}}]}}"#,
            server.uri()
        ))
        .unwrap();

        let config = ResolverConfig::new(true, Some(300)).unwrap();
        let result = resolver(config).resolve(&payload).await.unwrap();
        assert_eq!(
            result.video_url,
            Some(format!("{}/variant400.m3u8", server.uri()))
        );
    }

    #[tokio::test]
    async fn an_empty_bracket_degrades_to_no_video_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/master.m3u8"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=2000000\nvariant2000.m3u8\n",
            ))
            .mount(&server)
            .await;

        let payload = ProviderPayload::from_json(&format!(
            r#"{{
                "videoReferences": [{{"format": "hls", "url": "{}/master.m3u8"}}],
                "subtitleReferences": [{{"url": "http://x/sub.wsrt"}}]
            }}"#,
            server.uri()
        ))
        .unwrap();

        let config = ResolverConfig::new(true, Some(300)).unwrap();
        let result = resolver(config).resolve(&payload).await.unwrap();
        assert_eq!(result.video_url, None);
        assert_eq!(result.subtitle_url.as_deref(), Some("http://x/sub.wsrt"));
    }

    #[tokio::test]
    async fn garbage_manifests_degrade_without_losing_the_subtitle() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/master.m3u8"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>moved</html>"))
            .mount(&server)
            .await;

        let payload = ProviderPayload::from_json(&format!(
            r#"{{
                "videoReferences": [{{"format": "hls", "url": "{}/master.m3u8"}}],
                "subtitleReferences": [{{"url": "http://x/sub.wsrt"}}]
            }}"#,
            server.uri()
        ))
        .unwrap();

        let config = ResolverConfig::new(true, Some(300)).unwrap();
        let result = resolver(config).resolve(&payload).await.unwrap();
        assert_eq!(result.video_url, None);
        assert_eq!(result.subtitle_url.as_deref(), Some("http://x/sub.wsrt"));
    }

    #[tokio::test]
    async fn manifest_fetch_failures_abort_resolution() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/master.m3u8"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let payload = ProviderPayload::from_json(&format!(
            r#"{{"videoReferences": [{{"format": "hls", "url": "{}/master.m3u8"}}]}}"#,
            server.uri()
        ))
        .unwrap();

        let config = ResolverConfig::new(true, Some(300)).unwrap();
        let err = resolver(config).resolve(&payload).await.unwrap_err();
        assert!(matches!(err, ResolverError::Http(_)));
    }

    #[tokio::test]
    async fn mp4_references_skip_bandwidth_selection() {
        // No mock server is running, so any manifest fetch would fail.
        let payload = ProviderPayload::from_json(
            r#"{"videoReferences": [{"format": "hls", "url": "http://x/v.mp4?b=2"}]}"#,
        )
        .unwrap();

        let config = ResolverConfig::new(true, Some(300)).unwrap();
        let result = resolver(config).resolve(&payload).await.unwrap();
        assert_eq!(result.video_url.as_deref(), Some("http://x/v.mp4?b=2"));
    }
}
