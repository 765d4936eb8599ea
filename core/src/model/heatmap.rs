use serde::{Deserialize, Serialize};

/// One heatmap gallery entry.
///
/// `image_data` is a data URI or URL handed straight to the image surface;
/// nothing here interprets the pixels.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeatmapImage {
    pub frame_index: usize,
    pub image_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability_fake: Option<f64>,
}
