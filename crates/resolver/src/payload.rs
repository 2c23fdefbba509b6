use serde::{Deserialize, Serialize};

use crate::error::ResolverError;

/// One entry in the provider payload's video reference list.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoReference {
    pub format: String,
    pub url: String,
}

/// One entry in the provider payload's subtitle reference list.
#[derive(Debug, Clone, Deserialize)]
pub struct SubtitleReference {
    pub url: String,
}

/// The JSON document the backend returns for a show, reduced to the fields
/// resolution needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPayload {
    pub video_references: Vec<VideoReference>,
    /// `None` when the key is absent from the payload, which is distinct
    /// from an empty list.
    #[serde(default)]
    pub subtitle_references: Option<Vec<SubtitleReference>>,
}

impl ProviderPayload {
    pub fn from_json(raw: &str) -> Result<Self, ResolverError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// The playable URLs handed to the playback launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub video_url: Option<String>,
    pub subtitle_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_subtitle_key_deserializes_to_none() {
        let payload = ProviderPayload::from_json(r#"{"videoReferences": []}"#).unwrap();
        assert!(payload.subtitle_references.is_none());
    }

    #[test]
    fn empty_subtitle_list_is_not_none() {
        let payload =
            ProviderPayload::from_json(r#"{"videoReferences": [], "subtitleReferences": []}"#)
                .unwrap();
        assert_eq!(payload.subtitle_references.unwrap().len(), 0);
    }

    #[test]
    fn missing_video_references_is_a_json_error() {
        assert!(matches!(
            ProviderPayload::from_json("{}"),
            Err(ResolverError::Json(_))
        ));
    }
}
