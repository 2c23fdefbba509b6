use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoFormat {
    Hls,
    Mp4,
}

impl VideoFormat {
    pub fn as_str(&self) -> &str {
        match self {
            VideoFormat::Hls => "HLS",
            VideoFormat::Mp4 => "MP4",
        }
    }

    /// Classifies a video URL by its file suffix, ignoring any query string.
    /// Unknown suffixes yield `None`.
    pub fn from_url(url: &str) -> Option<Self> {
        let path = match url.split_once('?') {
            Some((path, _)) => path,
            None => url,
        };
        if path.ends_with(".m3u8") {
            Some(VideoFormat::Hls)
        } else if path.ends_with(".mp4") {
            Some(VideoFormat::Mp4)
        } else {
            None
        }
    }
}

impl Display for VideoFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
