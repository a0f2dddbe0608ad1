use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SaveUrlRequest {
    pub url: String,
    #[serde(default)]
    pub alias: Option<String>,
}

pub const STATUS_OK: &str = "OK";
pub const STATUS_ERROR: &str = "Error";

/// Envelope shared by every `/url` response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ApiResponse {
    pub fn saved(alias: impl Into<String>) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            error: None,
            alias: Some(alias.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            error: Some(message.into()),
            alias: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
