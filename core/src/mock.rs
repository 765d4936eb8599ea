//! Deterministic demo data, standing in whenever the backend is unavailable.
//!
//! The same generators back the viewer's silent fallback and the demo
//! server, so both sides of a disconnected session agree on what they show.

use chrono::Utc;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::analysis;
use crate::dashboard::UserProfile;
use crate::model::{
    AnalysisResult, FrameRecord, HeatmapImage, HistoryEntry, HistoryVerdict, Prediction,
    Probabilities,
};
use crate::prelude::{DataResult, ResultsDataSource};

pub const MOCK_FRAME_COUNT: usize = 20;
const WAVE_BASELINE: f64 = 0.3;
const WAVE_AMPLITUDE: f64 = 0.4;
const WAVE_FREQUENCY: f64 = 0.5;

pub const DEMO_HISTORY_ENTRIES: usize = 25;
const DAY_MS: i64 = 86_400_000;

/// Fixed demo key shown in the API panel before any regeneration.
pub const DEMO_API_KEY: &str = "vs_5f8e9d2c3b4a5f6e7d8c9b0a1f2e3d4c";

const DEMO_FILENAMES: [&str; 10] = [
    "company_announcement.mp4",
    "ceo_interview.mp4",
    "product_demo.mp4",
    "conference_speech.mp4",
    "team_meeting.mp4",
    "customer_testimonial.mp4",
    "promo_video.mp4",
    "training_video.mp4",
    "social_media_clip.mp4",
    "webinar_recording.mp4",
];

/// Wave-pattern frame scores: `0.3 + 0.4 * sin(0.5 * i)` for `i in 0..20`,
/// frame numbers 1-based.
pub fn mock_frames() -> Vec<FrameRecord> {
    (0..MOCK_FRAME_COUNT)
        .map(|i| FrameRecord {
            frame: i + 1,
            probability_fake: WAVE_BASELINE + WAVE_AMPLITUDE * (WAVE_FREQUENCY * i as f64).sin(),
            timestamp: None,
        })
        .collect()
}

pub fn mock_result(video_id: &str) -> AnalysisResult {
    mock_result_at(video_id, Utc::now().timestamp_millis())
}

/// Timestamp-pinned variant of [`mock_result`] for reproducible output.
pub fn mock_result_at(video_id: &str, timestamp_ms: i64) -> AnalysisResult {
    let frames = mock_frames();
    let max = analysis::peak_probability(&frames);
    let avg = analysis::average_probability(&frames);
    let is_fake = max > 0.6;

    AnalysisResult {
        id: video_id.into(),
        filename: "sample_video.mp4".into(),
        timestamp: timestamp_ms,
        duration: 32.0,
        resolution: "1920x1080".into(),
        prediction: if is_fake {
            Prediction::Deepfake
        } else {
            Prediction::Real
        },
        confidence: if is_fake { max } else { 1.0 - max },
        probabilities: Probabilities {
            real: if is_fake { 1.0 - max } else { max },
            fake: if is_fake { max } else { 1.0 - max },
        },
        max_fake_probability: max,
        avg_fake_probability: avg,
        frames_analyzed: frames.len(),
        frame_rate: "30 fps".into(),
        processing_time: "1.45s".into(),
        model: "VisionShield ResNet50-LSTM".into(),
        frame_analysis: frames,
    }
}

fn heatmap_svg(label: &str, fill: &str) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='400' height='240' viewBox='0 0 400 240'>\
         <rect width='400' height='240' fill='{fill}'/>\
         <text x='200' y='120' font-family='Arial' font-size='24' fill='white' \
         text-anchor='middle' dominant-baseline='middle'>{label}</text></svg>"
    );
    // Minimal percent-encoding; the payload alphabet only needs these.
    let encoded = svg
        .replace('%', "%25")
        .replace('#', "%23")
        .replace('<', "%3C")
        .replace('>', "%3E")
        .replace('\'', "%27");
    format!("data:image/svg+xml;charset=utf-8,{encoded}")
}

/// Placeholder heatmap gallery: five frames sampled every fourth index.
pub fn mock_heatmap_images() -> Vec<HeatmapImage> {
    let frames = mock_frames();
    let palette = ["#4a00e0", "#8e2de2", "#ed64a6", "#f56565", "#ed8936"];
    (0..5)
        .map(|i| {
            let frame_index = i * 4;
            HeatmapImage {
                frame_index,
                image_data: heatmap_svg(&format!("Heatmap {}", i + 1), palette[i]),
                probability_fake: frames.get(frame_index).map(|frame| frame.probability_fake),
            }
        })
        .collect()
}

pub fn demo_history(seed: u64) -> Vec<HistoryEntry> {
    demo_history_with(seed, DEMO_HISTORY_ENTRIES, Utc::now().timestamp_millis())
}

/// Seeded demo history: 30% forced-fake rate, confidence uniform in
/// [75, 95), each entry one day older than the previous.
pub fn demo_history_with(seed: u64, count: usize, now_ms: i64) -> Vec<HistoryEntry> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let is_fake = rng.gen::<f64>() > 0.7;
            let confidence = 75.0 + rng.gen::<f64>() * 20.0;
            HistoryEntry {
                id: format!("analysis_{}", i + 1),
                filename: DEMO_FILENAMES[i % DEMO_FILENAMES.len()].into(),
                timestamp: now_ms - i as i64 * DAY_MS,
                result: HistoryVerdict {
                    prediction: if is_fake {
                        Prediction::Deepfake
                    } else {
                        Prediction::Real
                    },
                    confidence,
                    probabilities: Probabilities {
                        real: if is_fake { 100.0 - confidence } else { confidence },
                        fake: if is_fake { confidence } else { 100.0 - confidence },
                    },
                },
            }
        })
        .collect()
}

pub fn demo_profile() -> UserProfile {
    UserProfile {
        name: "John Smith".into(),
        email: "john@example.com".into(),
    }
}

/// Client-generated replacement key used when the backend regeneration call
/// fails: `vs_` plus 26 lowercase alphanumerics.
pub fn fallback_api_key(rng: &mut impl Rng) -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let suffix: String = (0..26)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("vs_{suffix}")
}

/// Fallback data source; succeeds with generated payloads for any id.
#[derive(Debug, Clone, Copy)]
pub struct MockDataSource {
    pub seed: u64,
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self { seed: 7 }
    }
}

impl ResultsDataSource for MockDataSource {
    fn analysis_result(&self, video_id: &str) -> DataResult<AnalysisResult> {
        Ok(mock_result(video_id))
    }

    fn frame_records(&self, _video_id: &str) -> DataResult<Vec<FrameRecord>> {
        Ok(mock_frames())
    }

    fn heatmap_images(&self, _video_id: &str) -> DataResult<Vec<HeatmapImage>> {
        Ok(mock_heatmap_images())
    }

    fn history(&self) -> DataResult<Vec<HistoryEntry>> {
        Ok(demo_history(self.seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{suspicious_count, SUSPICIOUS_THRESHOLD};

    #[test]
    fn mock_frames_follow_the_wave_formula() {
        let frames = mock_frames();
        assert_eq!(frames.len(), MOCK_FRAME_COUNT);
        for (i, frame) in frames.iter().enumerate() {
            let expected = 0.3 + 0.4 * (0.5 * i as f64).sin();
            assert_eq!(frame.frame, i + 1);
            assert!((frame.probability_fake - expected).abs() < 1e-12);
            assert!((-0.1..=0.7).contains(&frame.probability_fake));
        }
    }

    #[test]
    fn suspicious_count_matches_direct_recomputation() {
        let frames = mock_frames();
        let direct = frames
            .iter()
            .filter(|frame| frame.probability_fake > SUSPICIOUS_THRESHOLD)
            .count();
        assert_eq!(suspicious_count(&frames), direct);
    }

    #[test]
    fn mock_result_verdict_follows_peak_probability() {
        let result = mock_result_at("abc", 0);
        let max = analysis::peak_probability(&result.frame_analysis);
        let expect_fake = max > 0.6;
        assert_eq!(result.prediction.is_manipulated(), expect_fake);
        if expect_fake {
            assert!((result.confidence - max).abs() < 1e-12);
            assert!((result.probabilities.fake - max).abs() < 1e-12);
        } else {
            assert!((result.confidence - (1.0 - max)).abs() < 1e-12);
            assert!((result.probabilities.real - max).abs() < 1e-12);
        }
        assert_eq!(result.frames_analyzed, MOCK_FRAME_COUNT);
        assert_eq!(result.id, "abc");
    }

    #[test]
    fn demo_history_is_deterministic_and_sized() {
        let first = demo_history_with(42, DEMO_HISTORY_ENTRIES, 1_700_000_000_000);
        let second = demo_history_with(42, DEMO_HISTORY_ENTRIES, 1_700_000_000_000);
        assert_eq!(first, second);
        assert_eq!(first.len(), 25);
        // Newest first, one day apart.
        assert_eq!(first[0].timestamp - first[1].timestamp, DAY_MS);
        for entry in &first {
            assert!((75.0..95.0).contains(&entry.result.confidence));
        }
    }

    #[test]
    fn demo_history_fake_rate_is_roughly_thirty_percent() {
        let history = demo_history_with(11, 400, 0);
        let fakes = history
            .iter()
            .filter(|entry| entry.result.prediction.is_manipulated())
            .count();
        let rate = fakes as f64 / history.len() as f64;
        assert!((0.2..0.4).contains(&rate), "rate was {rate}");
    }

    #[test]
    fn mock_heatmap_covers_every_fourth_frame() {
        let images = mock_heatmap_images();
        assert_eq!(images.len(), 5);
        let indices: Vec<_> = images.iter().map(|image| image.frame_index).collect();
        assert_eq!(indices, vec![0, 4, 8, 12, 16]);
        for image in &images {
            assert!(image.image_data.starts_with("data:image/svg+xml"));
            assert!(image.probability_fake.is_some());
        }
    }

    #[test]
    fn fallback_api_key_has_the_expected_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let key = fallback_api_key(&mut rng);
        assert_eq!(key.len(), 29);
        assert!(key.starts_with("vs_"));
        assert!(key[3..]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn mock_source_serves_every_panel() {
        let source = MockDataSource::default();
        assert!(source.analysis_result("abc").is_ok());
        assert_eq!(source.frame_records("abc").unwrap().len(), MOCK_FRAME_COUNT);
        assert_eq!(source.heatmap_images("abc").unwrap().len(), 5);
        assert_eq!(source.history().unwrap().len(), DEMO_HISTORY_ENTRIES);
    }
}
