use crate::model::{AnalysisResult, FrameRecord, HeatmapImage, HistoryEntry};

/// Common error type for data fetching and client-side media handling.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("http status {0}")]
    Http(u16),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("media load failure: {0}")]
    MediaLoad(String),
    #[error("trim failure: {0}")]
    Trim(String),
    #[error("local storage failure: {0}")]
    Storage(String),
}

pub type DataResult<T> = Result<T, DataError>;

/// Single data-fetching contract behind every results view.
///
/// The live API client and the demo fallback both produce these payloads, so
/// the rendering layer never cares where a response came from.
pub trait ResultsDataSource {
    fn analysis_result(&self, video_id: &str) -> DataResult<AnalysisResult>;
    fn frame_records(&self, video_id: &str) -> DataResult<Vec<FrameRecord>>;
    fn heatmap_images(&self, video_id: &str) -> DataResult<Vec<HeatmapImage>>;
    fn history(&self) -> DataResult<Vec<HistoryEntry>>;
}
