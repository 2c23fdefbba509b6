use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bandwidth {0} is not a selectable tier")]
    UnknownBandwidthTier(u32),
    #[error("invalid {name} setting: {value}")]
    InvalidSetting { name: &'static str, value: String },
    #[error("missing {0} setting")]
    MissingSetting(&'static str),
    #[error("no stream found for bandwidth setting {0}")]
    NoStreamForBandwidth(u32),
}
