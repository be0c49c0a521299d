use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    assessment::entities::{GroundingUrl, InputType},
    common::entities::app_errors::CoreError,
};

#[derive(Debug, Clone)]
pub struct AssessIngredientsInput {
    pub text_input: Option<String>,
    pub image: Option<ImageInput>,
}

impl AssessIngredientsInput {
    pub fn from_text(text_input: impl Into<String>) -> Self {
        Self {
            text_input: Some(text_input.into()),
            image: None,
        }
    }

    /// Trimmed text input, `None` when blank.
    pub fn text(&self) -> Option<&str> {
        self.text_input
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn input_type(&self) -> InputType {
        if self.image.is_some() {
            InputType::Image
        } else {
            InputType::Text
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.text().is_none() && self.image.is_none() {
            return Err(CoreError::MissingInput);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub data: Bytes,
    pub format: ImageFormat,
}

impl ImageInput {
    /// Wraps raw upload bytes, rejecting encodings the model cannot read.
    pub fn from_bytes(data: Bytes) -> Result<Self, CoreError> {
        let format = ImageFormat::sniff(&data).ok_or(CoreError::UnsupportedImageFormat)?;
        Ok(Self { data, format })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
    Heic,
    Heif,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Heic => "image/heic",
            ImageFormat::Heif => "image/heif",
        }
    }

    /// Detects the encoding from the file signature.
    pub fn sniff(data: &[u8]) -> Option<ImageFormat> {
        if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            return Some(ImageFormat::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::Webp);
        }
        if data.len() >= 12 && &data[4..8] == b"ftyp" {
            return match &data[8..12] {
                b"heic" | b"heix" | b"hevc" | b"hevx" => Some(ImageFormat::Heic),
                b"mif1" | b"msf1" | b"heim" | b"heis" => Some(ImageFormat::Heif),
                _ => None,
            };
        }
        None
    }
}

/// Raw answer of the external model together with its web citations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LLMResponse {
    pub text: String,
    pub grounding_urls: Vec<GroundingUrl>,
}
