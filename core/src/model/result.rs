use serde::{Deserialize, Serialize};

/// Classifier verdict label as emitted by the backend.
///
/// `Deepfake` and `Fake` are both manipulated verdicts; older backend builds
/// emit either spelling. Anything unrecognized lands on `Unknown` and renders
/// with the neutral theme instead of aborting the page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Prediction {
    Real,
    Deepfake,
    Fake,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Prediction {
    pub fn is_manipulated(self) -> bool {
        matches!(self, Prediction::Deepfake | Prediction::Fake)
    }

    pub fn label(self) -> &'static str {
        match self {
            Prediction::Real => "Real",
            Prediction::Deepfake => "Deepfake",
            Prediction::Fake => "Fake",
            Prediction::Unknown => "Unknown",
        }
    }

    /// Verdict copy shown under the prediction card.
    pub fn summary(self) -> &'static str {
        match self {
            Prediction::Real => "Our model has determined this video appears to be authentic.",
            Prediction::Deepfake | Prediction::Fake => {
                "Our model has detected signs of AI manipulation in this video."
            }
            Prediction::Unknown => "Analysis complete. Review the details below.",
        }
    }
}

/// Real/fake scores on the [0, 1] scale.
///
/// The two values are reported independently and are displayed that way;
/// they are never normalized even when they do not sum to 1.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Probabilities {
    pub real: f64,
    pub fake: f64,
}

/// Per-frame manipulation-likelihood score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameRecord {
    pub frame: usize,
    pub probability_fake: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

/// Complete analysis payload for one video.
///
/// Read-only once received; lives for a single screen load. Missing fields
/// deserialize to defaults so a sparse backend response still renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisResult {
    #[serde(alias = "video_id")]
    pub id: String,
    pub filename: String,
    /// Milliseconds since the epoch.
    pub timestamp: i64,
    /// Clip length in seconds.
    pub duration: f64,
    pub resolution: String,
    pub prediction: Prediction,
    pub confidence: f64,
    pub probabilities: Probabilities,
    pub max_fake_probability: f64,
    pub avg_fake_probability: f64,
    pub frame_analysis: Vec<FrameRecord>,
    pub frames_analyzed: usize,
    pub frame_rate: String,
    pub processing_time: String,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_parses_both_fake_spellings() {
        let deepfake: Prediction = serde_json::from_str("\"Deepfake\"").unwrap();
        let fake: Prediction = serde_json::from_str("\"Fake\"").unwrap();
        assert!(deepfake.is_manipulated());
        assert!(fake.is_manipulated());
    }

    #[test]
    fn unrecognized_prediction_falls_back_to_unknown() {
        let parsed: Prediction = serde_json::from_str("\"Suspicious\"").unwrap();
        assert_eq!(parsed, Prediction::Unknown);
        assert!(!parsed.is_manipulated());
    }

    #[test]
    fn sparse_result_payload_still_deserializes() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"video_id":"abc","prediction":"Real"}"#).unwrap();
        assert_eq!(result.id, "abc");
        assert_eq!(result.prediction, Prediction::Real);
        assert!(result.frame_analysis.is_empty());
    }
}
