use serde::{Deserialize, Serialize};

pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";
pub const DEFAULT_IMAGE_QUALITY: &str = "standard";

/// Body of an `/images/generations` call. The reply is always a URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: String,
    pub quality: String,
    pub response_format: &'static str,
}

impl ImageRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            n: 1,
            size: DEFAULT_IMAGE_SIZE.to_string(),
            quality: DEFAULT_IMAGE_QUALITY.to_string(),
            response_format: "url",
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = quality.into();
        self
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImagesResponse {
    #[serde(default)]
    pub data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedImage {
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_ask_for_one_standard_square_url() {
        let body =
            serde_json::to_value(ImageRequest::new("dall-e-3", "a robot")).expect("serialize");
        assert_eq!(
            body,
            json!({
                "model": "dall-e-3",
                "prompt": "a robot",
                "n": 1,
                "size": "1024x1024",
                "quality": "standard",
                "response_format": "url"
            })
        );
    }

    #[test]
    fn size_and_quality_are_overridable() {
        let request = ImageRequest::new("dall-e-3", "x")
            .with_size("1792x1024")
            .with_quality("hd");
        assert_eq!(request.size, "1792x1024");
        assert_eq!(request.quality, "hd");
    }
}
