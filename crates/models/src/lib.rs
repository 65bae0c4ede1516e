use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One entry of the gallery listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub filename: String,
    pub url: String,
    /// Milliseconds since the Unix epoch
    pub uploaded_at: i64,
    pub file_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
}

/// Record layout of the blob store. The whole gallery is a JSON array of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    pub id: String,
    pub data_url: String,
    pub file_name: String,
    /// Older records were written without these two
    #[serde(default)]
    pub original_file_name: String,
    pub uploaded_at: i64,
    #[serde(default)]
    pub file_size: String,
}

/// Raw upload as received from a client
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub original_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl PhotoUpload {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            original_name: None,
            content_type: None,
            data: data.into(),
        }
    }

    pub fn with_original_name(mut self, name: impl Into<String>) -> Self {
        self.original_name = Some(name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Image bytes ready to be served
#[derive(Debug, Clone)]
pub struct PhotoContent {
    pub data: Bytes,
    pub content_type: String,
}
