//! Trials API Boundary
//!
//! The collaborators answer with a `{ data, error }` envelope instead of
//! failing. [`ApiResponse::into_result`] turns a present `error` into an
//! [`ApiError`] so the view handles both failure paths the same way.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{SimulationConfig, SimulationRequest, SimulationResult, TrialPage, UploadFile};

/// Shown when a failure carries no usable message
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch trial data";

pub const TRIAL_DATA_PATH: &str = "/api/clinical-trials/data";
pub const DIGITAL_TWIN_PATH: &str = "/api/clinical-trials/digital-twin";

/// Multipart field carrying an uploaded trial file
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("{0}")]
    Transport(String),
    #[error("{context}: HTTP {status}")]
    Status { context: String, status: u16 },
    /// Non-2xx response whose body named the cause
    #[error("{0}")]
    Detail(String),
    #[error("{0}")]
    Decode(String),
    /// `error` field of the envelope
    #[error("{0}")]
    Remote(String),
    /// Failure with no message at all
    #[error("{}", FETCH_FALLBACK_MESSAGE)]
    Unknown,
}

impl ApiError {
    /// Text for the page-level error panel.
    ///
    /// Blank messages fall back to [`FETCH_FALLBACK_MESSAGE`] so the panel is
    /// never rendered empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FETCH_FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Result/error pair returned by both collaborator operations
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }

    /// An `error` wins over `data`; an envelope with neither is `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        match self.error {
            Some(message) => Err(ApiError::Remote(message)),
            None => Ok(self.data),
        }
    }
}

/// The remote collaborator behind the trials view
#[allow(async_fn_in_trait)]
pub trait TrialsApi {
    /// Demo data when `file` is `None`, otherwise the parsed upload
    async fn get_trial_data(&self, file: Option<UploadFile>) -> ApiResponse<TrialPage>;

    async fn run_digital_twin_simulation(
        &self,
        request: SimulationRequest,
    ) -> ApiResponse<SimulationResult>;
}

/// Where the collaborator lives and how simulations are configured
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin prefix for every endpoint; empty means same origin
    pub base_url: String,
    pub simulation: SimulationConfig,
}

impl ApiConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn trial_data_url(&self) -> String {
        self.join(TRIAL_DATA_PATH)
    }

    pub fn digital_twin_url(&self) -> String {
        self.join(DIGITAL_TWIN_PATH)
    }

    fn join(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Error for a non-2xx response, preferring the `detail` of a JSON body
pub fn status_error(context: &str, status: u16, body: &str) -> ApiError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|d| match d {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        })
        .filter(|d| !d.trim().is_empty());

    match detail {
        Some(detail) => ApiError::Detail(detail),
        None => ApiError::Status {
            context: context.to_string(),
            status,
        },
    }
}

/// Decode a 2xx body into `T`
pub fn decode_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(format!("Invalid response: {}", e)))
}
