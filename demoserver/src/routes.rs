use crate::config::DemoConfig;
use chrono::Utc;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shieldcore::mock::{self, MockDataSource};
use shieldcore::model::{
    AckEnvelope, ApiStatus, FeedbackRequest, FramesEnvelope, HeatmapEnvelope, HistoryEntry,
    HistoryEnvelope, ResultEnvelope,
};
use shieldcore::prelude::ResultsDataSource;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn feedback_log_path() -> PathBuf {
    PathBuf::from("data/feedback_log.jsonl")
}

/// One stored feedback submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub video_id: String,
    pub feedback_type: String,
    pub notes: String,
    pub timestamp: i64,
}

#[derive(Debug)]
struct DemoState {
    config: DemoConfig,
    source: MockDataSource,
    history: Vec<HistoryEntry>,
    feedback: Vec<FeedbackRecord>,
}

/// Bridge that hosts the demo HTTP endpoints the viewer consumes.
///
/// Every payload comes from `shieldcore::mock`, so the server and the
/// viewer's offline fallback always agree on what a demo session looks like.
pub struct DemoBridge {
    state: Arc<RwLock<DemoState>>,
}

impl DemoBridge {
    pub fn new(config: DemoConfig) -> Self {
        let history = mock::demo_history_with(
            config.seed,
            config.history_entries,
            Utc::now().timestamp_millis(),
        );
        let bind_address = SocketAddr::from(([127, 0, 0, 1], config.port));
        let source = MockDataSource { seed: config.seed };
        let state = Arc::new(RwLock::new(DemoState {
            config,
            source,
            history,
            feedback: Vec::new(),
        }));

        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());

        let health_route = warp::path!("api" / "health").and(warp::get()).map(|| {
            warp::reply::json(&json!({
                "status": "ok",
                "model_loaded": true,
                "service": "visionshield-demoserver",
            }))
        });

        let results_route = warp::path!("api" / "results" / String)
            .and(warp::get())
            .and(state_filter.clone())
            .map(|video_id: String, state: Arc<RwLock<DemoState>>| {
                let guard = state.read().unwrap();
                match guard.source.analysis_result(&video_id) {
                    Ok(result) => warp::reply::json(&ResultEnvelope {
                        status: ApiStatus::Success,
                        result: Some(result),
                        message: None,
                    }),
                    Err(error) => warp::reply::json(&ResultEnvelope {
                        status: ApiStatus::Error,
                        result: None,
                        message: Some(error.to_string()),
                    }),
                }
            });

        let frames_route = warp::path!("api" / "frame-analysis" / String)
            .and(warp::get())
            .and(state_filter.clone())
            .map(|video_id: String, state: Arc<RwLock<DemoState>>| {
                let guard = state.read().unwrap();
                match guard.source.frame_records(&video_id) {
                    Ok(frames) => warp::reply::json(&FramesEnvelope {
                        status: ApiStatus::Success,
                        frames,
                        message: None,
                    }),
                    Err(error) => warp::reply::json(&FramesEnvelope {
                        status: ApiStatus::Error,
                        frames: Vec::new(),
                        message: Some(error.to_string()),
                    }),
                }
            });

        let heatmap_route = warp::path!("api" / "heatmap" / String)
            .and(warp::get())
            .and(state_filter.clone())
            .map(|video_id: String, state: Arc<RwLock<DemoState>>| {
                let guard = state.read().unwrap();
                match guard.source.heatmap_images(&video_id) {
                    Ok(heatmap_images) => warp::reply::json(&HeatmapEnvelope {
                        status: ApiStatus::Success,
                        heatmap_images,
                        message: None,
                    }),
                    Err(error) => warp::reply::json(&HeatmapEnvelope {
                        status: ApiStatus::Error,
                        heatmap_images: Vec::new(),
                        message: Some(error.to_string()),
                    }),
                }
            });

        let history_route = warp::path!("api" / "history")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<DemoState>>| {
                let guard = state.read().unwrap();
                warp::reply::json(&HistoryEnvelope {
                    status: ApiStatus::Success,
                    history: guard.history.clone(),
                    message: None,
                })
            });

        let auth_route = warp::path!("api" / "auth")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .map(
                |_credentials: serde_json::Value, state: Arc<RwLock<DemoState>>| {
                    let guard = state.read().unwrap();
                    warp::reply::json(&json!({
                        "token": demo_token(guard.config.seed),
                    }))
                },
            );

        let feedback_route = warp::path!("api" / "feedback" / "submit")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .map(
                |request: FeedbackRequest, state: Arc<RwLock<DemoState>>| {
                    if request.video_id.trim().is_empty() {
                        return warp::reply::with_status(
                            warp::reply::json(&AckEnvelope {
                                status: ApiStatus::Error,
                                message: Some("video_id is required".into()),
                            }),
                            StatusCode::BAD_REQUEST,
                        );
                    }
                    let record = FeedbackRecord {
                        video_id: request.video_id.clone(),
                        feedback_type: request.feedback_type.as_str().into(),
                        notes: request.notes.clone(),
                        timestamp: Utc::now().timestamp_millis(),
                    };
                    append_feedback_line(&record);
                    state.write().unwrap().feedback.push(record);
                    warp::reply::with_status(
                        warp::reply::json(&AckEnvelope {
                            status: ApiStatus::Success,
                            message: Some("Feedback recorded".into()),
                        }),
                        StatusCode::OK,
                    )
                },
            );

        let feedback_stats_route = warp::path!("api" / "feedback" / "stats")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<DemoState>>| {
                let guard = state.read().unwrap();
                let count_of = |kind: &str| {
                    guard
                        .feedback
                        .iter()
                        .filter(|record| record.feedback_type == kind)
                        .count()
                };
                warp::reply::json(&json!({
                    "status": "success",
                    "total": guard.feedback.len(),
                    "correct_count": count_of("correct"),
                    "incorrect_count": count_of("incorrect"),
                    "report_count": count_of("report"),
                }))
            });

        // Shapes-only server: streaming and PDF generation are not demoed.
        let video_route = warp::path!("api" / "video" / String)
            .and(warp::get())
            .map(|_video_id: String| {
                warp::reply::with_status(
                    warp::reply::json(&json!({
                        "status": "error",
                        "message": "Video not found",
                    })),
                    StatusCode::NOT_FOUND,
                )
            });

        let report_route = warp::path!("api" / "download-report" / String)
            .and(warp::get())
            .map(|_video_id: String| {
                warp::reply::with_status(
                    warp::reply::json(&json!({
                        "status": "error",
                        "message": "Report generation is not available in demo mode",
                    })),
                    StatusCode::NOT_FOUND,
                )
            });

        thread::spawn(move || {
            let routes = health_route
                .or(results_route)
                .or(frames_route)
                .or(heatmap_route)
                .or(history_route)
                .or(auth_route)
                .or(feedback_route)
                .or(feedback_stats_route)
                .or(video_route)
                .or(report_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(bind_address).await;
            });
        });

        Self { state }
    }

    /// Replaces the served history, e.g. after an offline regeneration pass.
    pub fn publish_history(&self, history: Vec<HistoryEntry>) {
        let mut guard = self.state.write().unwrap();
        log::info!("serving {} history entries", history.len());
        guard.history = history;
    }

    pub fn publish_status(&self, message: &str) {
        println!("[demoserver] {}", message);
    }

    #[cfg(test)]
    fn history_len(&self) -> usize {
        self.state.read().unwrap().history.len()
    }

    #[cfg(test)]
    fn record_feedback(&self, record: FeedbackRecord) {
        self.state.write().unwrap().feedback.push(record);
    }

    #[cfg(test)]
    fn feedback_len(&self) -> usize {
        self.state.read().unwrap().feedback.len()
    }
}

fn demo_token(seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let suffix: String = (0..32)
        .map(|_| {
            let value = rng.gen_range(0..16u8);
            char::from_digit(value as u32, 16).unwrap_or('0')
        })
        .collect();
    format!("vs_token_{suffix}")
}

fn append_feedback_line(record: &FeedbackRecord) {
    let path = feedback_log_path();
    if let Some(parent) = path.parent() {
        if let Err(error) = fs::create_dir_all(parent) {
            log::warn!("cannot create feedback directory: {error}");
            return;
        }
    }
    let line = match serde_json::to_string(record) {
        Ok(line) => line,
        Err(error) => {
            log::warn!("cannot serialize feedback record: {error}");
            return;
        }
    };
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(mut file) => {
            if let Err(error) = writeln!(file, "{line}") {
                log::warn!("cannot append feedback record: {error}");
            }
        }
        Err(error) => log::warn!("cannot open feedback log: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_serves_configured_history_size() {
        let bridge = DemoBridge::new(DemoConfig::from_args(5, 0));
        assert_eq!(bridge.history_len(), 25);
        bridge.publish_history(mock::demo_history_with(5, 10, 0));
        assert_eq!(bridge.history_len(), 10);
    }

    #[test]
    fn feedback_records_accumulate() {
        let bridge = DemoBridge::new(DemoConfig::from_args(6, 0));
        bridge.record_feedback(FeedbackRecord {
            video_id: "abc".into(),
            feedback_type: "correct".into(),
            notes: String::new(),
            timestamp: 0,
        });
        assert_eq!(bridge.feedback_len(), 1);
    }

    #[test]
    fn demo_token_is_stable_for_a_seed() {
        assert_eq!(demo_token(9), demo_token(9));
        assert_ne!(demo_token(9), demo_token(10));
        assert!(demo_token(9).starts_with("vs_token_"));
    }
}
