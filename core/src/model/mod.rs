pub mod envelope;
pub mod heatmap;
pub mod history;
pub mod result;

pub use envelope::{
    AckEnvelope, ApiStatus, AuthRequest, AuthResponse, FeedbackRequest, FeedbackType,
    FramesEnvelope, HealthEnvelope, HeatmapEnvelope, HistoryEnvelope, ResultEnvelope,
};
pub use heatmap::HeatmapImage;
pub use history::{HistoryEntry, HistoryVerdict};
pub use result::{AnalysisResult, FrameRecord, Prediction, Probabilities};
