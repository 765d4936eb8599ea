use serde::{Deserialize, Serialize};

use crate::model::heatmap::HeatmapImage;
use crate::model::history::HistoryEntry;
use crate::model::result::{AnalysisResult, FrameRecord};
use crate::prelude::{DataError, DataResult};

/// Envelope discriminator used by every backend response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

impl ApiStatus {
    pub fn is_success(self) -> bool {
        matches!(self, ApiStatus::Success)
    }
}

fn envelope_error(message: Option<String>) -> DataError {
    DataError::Backend(message.unwrap_or_else(|| "backend reported an error".into()))
}

/// `GET /api/results/:id` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub status: ApiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResultEnvelope {
    pub fn into_result(self) -> DataResult<AnalysisResult> {
        match (self.status, self.result) {
            (ApiStatus::Success, Some(result)) => Ok(result),
            (ApiStatus::Success, None) => {
                Err(DataError::Malformed("result field missing".into()))
            }
            (ApiStatus::Error, _) => Err(envelope_error(self.message)),
        }
    }
}

/// `GET /api/frame-analysis/:id` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FramesEnvelope {
    pub status: ApiStatus,
    #[serde(default)]
    pub frames: Vec<FrameRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FramesEnvelope {
    pub fn into_frames(self) -> DataResult<Vec<FrameRecord>> {
        if self.status.is_success() {
            Ok(self.frames)
        } else {
            Err(envelope_error(self.message))
        }
    }
}

/// `GET /api/heatmap/:id` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapEnvelope {
    pub status: ApiStatus,
    #[serde(default)]
    pub heatmap_images: Vec<HeatmapImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HeatmapEnvelope {
    pub fn into_images(self) -> DataResult<Vec<HeatmapImage>> {
        if self.status.is_success() {
            Ok(self.heatmap_images)
        } else {
            Err(envelope_error(self.message))
        }
    }
}

/// `GET /api/history` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEnvelope {
    pub status: ApiStatus,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HistoryEnvelope {
    pub fn into_history(self) -> DataResult<Vec<HistoryEntry>> {
        if self.status.is_success() {
            Ok(self.history)
        } else {
            Err(envelope_error(self.message))
        }
    }
}

/// `GET /api/health` response; shape is looser than the data envelopes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthEnvelope {
    pub status: String,
    pub model_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// `POST /api/auth` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Kinds of feedback a user can file against a verdict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Correct,
    Incorrect,
    Report,
}

impl FeedbackType {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackType::Correct => "correct",
            FeedbackType::Incorrect => "incorrect",
            FeedbackType::Report => "report",
        }
    }
}

/// `POST /api/feedback/submit` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub video_id: String,
    pub feedback_type: FeedbackType,
    #[serde(default)]
    pub notes: String,
}

/// Generic `{status, message}` acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckEnvelope {
    pub status: ApiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AckEnvelope {
    pub fn into_message(self) -> DataResult<String> {
        if self.status.is_success() {
            Ok(self.message.unwrap_or_else(|| "OK".into()))
        } else {
            Err(envelope_error(self.message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_maps_to_backend_error() {
        let envelope: ResultEnvelope =
            serde_json::from_str(r#"{"status":"error","message":"Results not found"}"#).unwrap();
        assert_eq!(
            envelope.into_result(),
            Err(DataError::Backend("Results not found".into()))
        );
    }

    #[test]
    fn success_envelope_without_payload_is_malformed() {
        let envelope: ResultEnvelope = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert!(matches!(
            envelope.into_result(),
            Err(DataError::Malformed(_))
        ));
    }

    #[test]
    fn feedback_type_round_trips_lowercase() {
        let parsed: FeedbackType = serde_json::from_str("\"incorrect\"").unwrap();
        assert_eq!(parsed, FeedbackType::Incorrect);
        assert!(serde_json::from_str::<FeedbackType>("\"spam\"").is_err());
    }
}
