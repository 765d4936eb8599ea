use iced::widget::{button, column, row, scrollable, text, text_input, Row};
use iced::{time, Element, Length, Subscription, Task, Theme};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shieldcore::mock;
use shieldcore::model::{
    AnalysisResult, FeedbackRequest, FeedbackType, FrameRecord, HealthEnvelope, HeatmapImage,
    HistoryEntry,
};
use shieldcore::prelude::DataError;
use shieldcore::telemetry::{FetchMetrics, LogManager};
use shieldcore::trim;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

mod api;
mod charts;
mod screens;
mod style;

use api::ApiClient;
use screens::analyze::AnalyzeScreen;
use screens::dashboard::DashboardScreen;
use screens::frames::FramesScreen;
use screens::heatmap::HeatmapScreen;
use screens::results::ResultsScreen;
use screens::trimmer::{TrimmerScreen, TrimmerStage};

const API_BASE_URL: &str = "http://127.0.0.1:9000/api";
const TICK: Duration = Duration::from_millis(100);
/// Seed for the dashboard's demo-history fallback.
const DEMO_HISTORY_SEED: u64 = 7;

fn main() -> iced::Result {
    env_logger::init();
    iced::application(App::boot, App::update, App::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &App) -> String {
    "VisionShield".into()
}

fn application_subscription(app: &App) -> Subscription<Message> {
    if app.wants_ticks() {
        time::every(TICK).map(|_| Message::Tick)
    } else {
        Subscription::none()
    }
}

fn application_theme(_: &App) -> Theme {
    Theme::Dark
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Analyze,
    Results,
    Frames,
    Heatmap,
    Dashboard,
    Trimmer,
}

impl Tab {
    const ALL: [Tab; 6] = [
        Tab::Analyze,
        Tab::Results,
        Tab::Frames,
        Tab::Heatmap,
        Tab::Dashboard,
        Tab::Trimmer,
    ];

    fn label(self) -> &'static str {
        match self {
            Tab::Analyze => "Analyze",
            Tab::Results => "Results",
            Tab::Frames => "Frame Analysis",
            Tab::Heatmap => "Heatmap",
            Tab::Dashboard => "Dashboard",
            Tab::Trimmer => "Trimmer",
        }
    }
}

struct App {
    api: ApiClient,
    tab: Tab,
    video_id_input: String,
    loaded_video_id: Option<String>,
    health: Option<(bool, String)>,
    status: String,
    logger: LogManager,
    metrics: FetchMetrics,
    results: ResultsScreen,
    frames: FramesScreen,
    heatmap: HeatmapScreen,
    dashboard: DashboardScreen,
    trimmer: TrimmerScreen,
    analyze: AnalyzeScreen,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    TabSelected(Tab),
    VideoIdChanged(String),
    LoadResults,
    HealthChecked(Result<HealthEnvelope, DataError>),
    ResultFetched(Result<AnalysisResult, DataError>),
    FramesFetched(Result<Vec<FrameRecord>, DataError>),
    HeatmapFetched(Result<Vec<HeatmapImage>, DataError>),
    // Results actions
    DownloadReport,
    ReportSaved(Result<PathBuf, DataError>),
    ShareLink,
    FeedbackNotesChanged(String),
    SubmitFeedback(FeedbackType),
    FeedbackAcked(Result<String, DataError>),
    NewAnalysis,
    // Frame playback
    FramePlayToggled,
    FrameSelected(usize),
    // Heatmap
    HeatmapPlayToggled,
    HeatmapFrameSelected(usize),
    HeatmapOpacityChanged(f64),
    // Dashboard
    DashboardRefresh,
    HistoryFetched(Result<Vec<HistoryEntry>, DataError>),
    PagePrev,
    PageNext,
    ToggleKeyVisibility,
    CopyApiKey,
    RegenerateKey,
    RowReportRequested(String),
    LoginEmailChanged(String),
    LoginPasswordChanged(String),
    LoginSubmitted,
    AuthCompleted(Result<String, DataError>),
    Logout,
    // Analyze
    UploadPathChanged(String),
    UploadStarted,
    UploadFinished(Result<AnalysisResult, DataError>),
    ViewAnalyzed,
    // Trimmer
    TrimPathChanged(String),
    TrimDurationChanged(String),
    TrimOpen,
    TrimClose,
    TrimStartChanged(f64),
    TrimEndChanged(f64),
    TrimQuickSelect(u32),
    TrimRangeReset,
    TrimApply,
    TrimFinished(Result<(PathBuf, u64), DataError>),
}

impl App {
    fn boot() -> (Self, Task<Message>) {
        let api = ApiClient::new(API_BASE_URL);
        let app = App {
            api: api.clone(),
            tab: Tab::Results,
            video_id_input: String::new(),
            loaded_video_id: None,
            health: None,
            status: "Ready.".into(),
            logger: LogManager::new(),
            metrics: FetchMetrics::new(),
            results: ResultsScreen::default(),
            frames: FramesScreen::default(),
            heatmap: HeatmapScreen::default(),
            dashboard: DashboardScreen::default(),
            trimmer: TrimmerScreen::default(),
            analyze: AnalyzeScreen::default(),
        };
        let task = Task::batch([
            Task::perform(api.clone().health(), Message::HealthChecked),
            Task::perform(api.history(), Message::HistoryFetched),
        ]);
        (app, task)
    }

    fn wants_ticks(&self) -> bool {
        self.frames.is_playing
            || self.heatmap.is_playing
            || self.analyze.busy()
            || self.trimmer.stage == TrimmerStage::Trimming
    }

    /// Duration backing the frame timelines; the mock clip length when no
    /// real result is loaded.
    fn clip_duration(&self) -> f64 {
        self.results
            .result
            .as_ref()
            .map(|result| result.duration)
            .filter(|duration| *duration > 0.0)
            .unwrap_or(32.0)
    }

    /// Kicks off the results -> frames -> heatmap sequence for one video.
    fn start_load(&mut self, video_id: String) -> Task<Message> {
        self.loaded_video_id = Some(video_id.clone());
        self.results.begin_loading();
        self.frames.begin_loading();
        self.heatmap.begin_loading();
        self.status = format!("Fetching results for {video_id}...");
        self.metrics.record_request();
        Task::perform(
            self.api.clone().analysis_result(video_id),
            Message::ResultFetched,
        )
    }

    fn loaded_id(&self) -> String {
        self.loaded_video_id.clone().unwrap_or_default()
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                state.frames.tick(TICK.as_secs_f64());
                state.heatmap.tick(TICK.as_secs_f64());
                state.analyze.tick();
                state.trimmer.tick();
                Task::none()
            }
            Message::TabSelected(tab) => {
                state.tab = tab;
                Task::none()
            }
            Message::VideoIdChanged(value) => {
                state.video_id_input = value;
                Task::none()
            }
            Message::LoadResults => {
                let video_id = state.video_id_input.trim().to_string();
                if video_id.is_empty() {
                    state.status = "Enter a video ID first.".into();
                    return Task::none();
                }
                state.tab = Tab::Results;
                state.start_load(video_id)
            }
            Message::HealthChecked(Ok(envelope)) => {
                state.health = Some((envelope.status == "ok", envelope.status));
                Task::none()
            }
            Message::HealthChecked(Err(error)) => {
                state.logger.record(&format!("health check failed: {error}"));
                state.health = Some((false, "offline".into()));
                state.status = "API connection issue. Some features may be unavailable.".into();
                Task::none()
            }
            Message::ResultFetched(Ok(result)) => {
                state.results.apply(result, false, None);
                state.status = "Results loaded.".into();
                state.metrics.record_request();
                Task::perform(
                    state.api.clone().frame_records(state.loaded_id()),
                    Message::FramesFetched,
                )
            }
            Message::ResultFetched(Err(error)) => {
                // "Always show something": substitute the deterministic mock
                // result and its companion panels without further fetches.
                state.metrics.record_failure();
                state.metrics.record_fallback();
                state
                    .logger
                    .record_fallback("results", &error.to_string());
                let video_id = state.loaded_id();
                let reason = error.to_string();
                state
                    .results
                    .apply(mock::mock_result(&video_id), true, Some(reason.clone()));
                let duration = state.clip_duration();
                state
                    .frames
                    .apply(mock::mock_frames(), duration, true, Some(reason.clone()));
                state.heatmap.apply_frames(mock::mock_frames(), duration);
                state
                    .heatmap
                    .apply_images(mock::mock_heatmap_images(), true, Some(reason));
                state.status = "Backend unavailable: showing demo data.".into();
                Task::none()
            }
            Message::FramesFetched(Ok(frames)) => {
                let duration = state.clip_duration();
                state.frames.apply(frames.clone(), duration, false, None);
                state.heatmap.apply_frames(frames, duration);
                state.metrics.record_request();
                Task::perform(
                    state.api.clone().heatmap_images(state.loaded_id()),
                    Message::HeatmapFetched,
                )
            }
            Message::FramesFetched(Err(error)) => {
                state.metrics.record_failure();
                state.metrics.record_fallback();
                state
                    .logger
                    .record_fallback("frame analysis", &error.to_string());
                let duration = state.clip_duration();
                state.frames.apply(
                    mock::mock_frames(),
                    duration,
                    true,
                    Some(error.to_string()),
                );
                state.heatmap.apply_frames(mock::mock_frames(), duration);
                state.metrics.record_request();
                Task::perform(
                    state.api.clone().heatmap_images(state.loaded_id()),
                    Message::HeatmapFetched,
                )
            }
            Message::HeatmapFetched(Ok(images)) => {
                state.heatmap.apply_images(images, false, None);
                Task::none()
            }
            Message::HeatmapFetched(Err(error)) => {
                state.metrics.record_failure();
                state.metrics.record_fallback();
                state
                    .logger
                    .record_fallback("heatmap", &error.to_string());
                state.heatmap.apply_images(
                    mock::mock_heatmap_images(),
                    true,
                    Some(error.to_string()),
                );
                Task::none()
            }
            Message::DownloadReport => {
                let Some(video_id) = state.loaded_video_id.clone() else {
                    state.status = "Video ID not found. Cannot generate report.".into();
                    return Task::none();
                };
                if state.results.downloading_report {
                    return Task::none();
                }
                state.results.downloading_report = true;
                state.results.report_status = None;
                state.metrics.record_request();
                Task::perform(
                    state.api.clone().download_report(video_id),
                    Message::ReportSaved,
                )
            }
            Message::ReportSaved(outcome) => {
                state.results.downloading_report = false;
                match outcome {
                    Ok(path) => {
                        let note = format!("Saved {}", path.display());
                        state.results.report_status = Some(note.clone());
                        state.status = note;
                    }
                    Err(error) => {
                        state.metrics.record_failure();
                        state.logger.record(&format!("report download failed: {error}"));
                        state.results.report_status =
                            Some("Failed to download PDF report. Please try again.".into());
                    }
                }
                Task::none()
            }
            Message::ShareLink => {
                let Some(video_id) = &state.loaded_video_id else {
                    return Task::none();
                };
                let url = format!("https://visionshield.example/results/{video_id}");
                state.results.share_status = Some("Results link copied to clipboard!".into());
                iced::clipboard::write(url)
            }
            Message::FeedbackNotesChanged(notes) => {
                state.results.feedback_notes = notes;
                Task::none()
            }
            Message::SubmitFeedback(feedback_type) => {
                let Some(video_id) = state.loaded_video_id.clone() else {
                    state.results.feedback_status = Some("Video ID not found".into());
                    return Task::none();
                };
                let request = FeedbackRequest {
                    video_id,
                    feedback_type,
                    notes: state.results.feedback_notes.clone(),
                };
                state.metrics.record_request();
                Task::perform(
                    state.api.clone().submit_feedback(request),
                    Message::FeedbackAcked,
                )
            }
            Message::FeedbackAcked(Ok(_)) => {
                state.results.feedback_sent = true;
                state.results.feedback_status = None;
                Task::none()
            }
            Message::FeedbackAcked(Err(error)) => {
                state.metrics.record_failure();
                state.results.feedback_status =
                    Some(format!("Could not submit feedback: {error}"));
                Task::none()
            }
            Message::NewAnalysis => {
                state.results = ResultsScreen::default();
                state.frames = FramesScreen::default();
                state.heatmap = HeatmapScreen::default();
                state.analyze = AnalyzeScreen::default();
                state.video_id_input.clear();
                state.loaded_video_id = None;
                state.tab = Tab::Analyze;
                state.status = "Ready for a new analysis.".into();
                Task::none()
            }
            Message::FramePlayToggled => {
                state.frames.toggle();
                Task::none()
            }
            Message::FrameSelected(index) => {
                state.frames.seek(index);
                Task::none()
            }
            Message::HeatmapPlayToggled => {
                state.heatmap.toggle();
                Task::none()
            }
            Message::HeatmapFrameSelected(index) => {
                state.heatmap.select(index);
                Task::none()
            }
            Message::HeatmapOpacityChanged(opacity) => {
                state.heatmap.set_opacity(opacity);
                Task::none()
            }
            Message::DashboardRefresh => {
                state.dashboard.begin_loading();
                state.metrics.record_request();
                Task::perform(state.api.clone().history(), Message::HistoryFetched)
            }
            Message::HistoryFetched(Ok(history)) => {
                state.dashboard.apply_history(history, false, None);
                Task::none()
            }
            Message::HistoryFetched(Err(error)) => {
                state.metrics.record_failure();
                state.metrics.record_fallback();
                state
                    .logger
                    .record_fallback("dashboard history", &error.to_string());
                state.dashboard.apply_history(
                    mock::demo_history(DEMO_HISTORY_SEED),
                    true,
                    Some(error.to_string()),
                );
                Task::none()
            }
            Message::PagePrev => {
                state.dashboard.previous_page();
                Task::none()
            }
            Message::PageNext => {
                state.dashboard.next_page();
                Task::none()
            }
            Message::ToggleKeyVisibility => {
                state.dashboard.api_key_visible = !state.dashboard.api_key_visible;
                Task::none()
            }
            Message::CopyApiKey => {
                state.dashboard.api_key_visible = true;
                state.dashboard.key_status = Some("API key copied to clipboard".into());
                iced::clipboard::write(state.dashboard.api_key.clone())
            }
            Message::RegenerateKey => {
                // No backend endpoint exists for key rotation; this is the
                // client-side placeholder, not a secure key-issuance flow.
                let mut rng = StdRng::from_entropy();
                state.dashboard.api_key = mock::fallback_api_key(&mut rng);
                state.dashboard.api_key_visible = true;
                state.dashboard.key_status =
                    Some("API key regenerated (client-side placeholder)".into());
                Task::none()
            }
            Message::RowReportRequested(video_id) => {
                state.metrics.record_request();
                Task::perform(
                    state.api.clone().download_report(video_id),
                    Message::ReportSaved,
                )
            }
            Message::LoginEmailChanged(value) => {
                state.dashboard.login_email = value;
                Task::none()
            }
            Message::LoginPasswordChanged(value) => {
                state.dashboard.login_password = value;
                Task::none()
            }
            Message::LoginSubmitted => {
                if state.dashboard.login_email.trim().is_empty() {
                    state.dashboard.auth_status = Some("Email is required".into());
                    return Task::none();
                }
                state.dashboard.auth_status = None;
                state.metrics.record_request();
                Task::perform(
                    state.api.clone().authenticate(
                        state.dashboard.login_email.clone(),
                        state.dashboard.login_password.clone(),
                    ),
                    Message::AuthCompleted,
                )
            }
            Message::AuthCompleted(Ok(token)) => {
                match state.api.store_token(token) {
                    Ok(()) => {
                        state.dashboard.login_password.clear();
                        state.status = "Signed in.".into();
                    }
                    Err(error) => {
                        state.dashboard.auth_status =
                            Some(format!("Could not store token: {error}"));
                    }
                }
                Task::none()
            }
            Message::AuthCompleted(Err(error)) => {
                state.metrics.record_failure();
                state.dashboard.auth_status = Some(format!("Sign-in failed: {error}"));
                Task::none()
            }
            Message::Logout => {
                state.api.clear_token();
                state.status = "Signed out.".into();
                Task::none()
            }
            Message::UploadPathChanged(value) => {
                state.analyze.path_input = value;
                Task::none()
            }
            Message::UploadStarted => {
                let path = PathBuf::from(state.analyze.path_input.trim());
                if path.as_os_str().is_empty() {
                    state.analyze.error = Some("Enter a file path first".into());
                    return Task::none();
                }
                state.analyze.start();
                state.metrics.record_request();
                Task::perform(state.api.clone().analyze(path), Message::UploadFinished)
            }
            Message::UploadFinished(outcome) => {
                if outcome.is_err() {
                    state.metrics.record_failure();
                }
                state.analyze.uploaded(outcome);
                Task::none()
            }
            Message::ViewAnalyzed => {
                let Some(video_id) = state.analyze.completed_id() else {
                    return Task::none();
                };
                state.video_id_input = video_id.clone();
                state.tab = Tab::Results;
                state.start_load(video_id)
            }
            Message::TrimPathChanged(value) => {
                state.trimmer.path_input = value;
                Task::none()
            }
            Message::TrimDurationChanged(value) => {
                state.trimmer.duration_input = value;
                Task::none()
            }
            Message::TrimOpen => {
                if let Err(error) = state.trimmer.open() {
                    state.trimmer.error = Some(error.to_string());
                }
                Task::none()
            }
            Message::TrimClose => {
                state.trimmer.close();
                Task::none()
            }
            Message::TrimStartChanged(value) => {
                state.trimmer.set_start(value);
                Task::none()
            }
            Message::TrimEndChanged(value) => {
                state.trimmer.set_end(value);
                Task::none()
            }
            Message::TrimQuickSelect(seconds) => {
                state.trimmer.quick_select(seconds);
                Task::none()
            }
            Message::TrimRangeReset => {
                state.trimmer.reset_range();
                Task::none()
            }
            Message::TrimApply => {
                let (Some(clip), Some(range)) =
                    (state.trimmer.clip.clone(), state.trimmer.range)
                else {
                    return Task::none();
                };
                state.trimmer.begin_trim();
                // One in-memory pass over the whole file, as on the web: no
                // streaming, no chunking, no cancellation mid-read.
                Task::perform(
                    async move {
                        let buffer = fs::read(&clip.path)
                            .map_err(|error| DataError::MediaLoad(error.to_string()))?;
                        let trimmed = trim::trim_bytes(&buffer, &range, |_| {})?;
                        let output = clip.output_path();
                        fs::write(&output, &trimmed)
                            .map_err(|error| DataError::Storage(error.to_string()))?;
                        Ok::<_, DataError>((output, trimmed.len() as u64))
                    },
                    Message::TrimFinished,
                )
            }
            Message::TrimFinished(outcome) => {
                if let Err(error) = &outcome {
                    state.logger.record(&format!("trim failed: {error}"));
                }
                state.trimmer.finish(outcome);
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let health_badge: Element<'_, Message> = match &state.health {
            Some((true, status)) => text(format!("API: {status}"))
                .size(12)
                .color(style::GREEN)
                .into(),
            Some((false, status)) => text(format!("API: {status}"))
                .size(12)
                .color(style::RED)
                .into(),
            None => text("API: checking...").size(12).color(style::GRAY).into(),
        };

        let header = row![
            text("VisionShield").size(26),
            health_badge,
            iced::widget::space::horizontal(),
            text_input("Video ID", &state.video_id_input)
                .on_input(Message::VideoIdChanged)
                .on_submit(Message::LoadResults)
                .padding(6)
                .width(Length::Fixed(220.0)),
            button("Load").on_press(Message::LoadResults).padding(6),
            button("New Analysis")
                .on_press(Message::NewAnalysis)
                .padding(6),
        ]
        .spacing(12)
        .padding(12)
        .align_y(iced::Alignment::Center);

        let mut tabs = Row::new().spacing(6);
        for tab in Tab::ALL {
            tabs = tabs.push(
                button(text(tab.label()).size(13))
                    .style(style::tab_button(state.tab == tab))
                    .on_press(Message::TabSelected(tab))
                    .padding(8),
            );
        }

        let content: Element<'_, Message> = match state.tab {
            Tab::Analyze => screens::analyze::view(&state.analyze),
            Tab::Results => screens::results::view(
                &state.results,
                state.loaded_video_id.as_deref(),
                state
                    .loaded_video_id
                    .as_deref()
                    .map(|video_id| state.api.video_url(video_id)),
            ),
            Tab::Frames => screens::frames::view(&state.frames),
            Tab::Heatmap => screens::heatmap::view(&state.heatmap),
            Tab::Dashboard => screens::dashboard::view(&state.dashboard, state.api.has_token()),
            Tab::Trimmer => screens::trimmer::view(&state.trimmer),
        };

        let (requests, failures, fallbacks) = state.metrics.snapshot();
        let status_bar = row![
            text(&state.status).size(12).color(style::GRAY),
            iced::widget::space::horizontal(),
            text(format!(
                "requests {requests} · failures {failures} · fallbacks {fallbacks}"
            ))
            .size(12)
            .color(style::GRAY),
        ]
        .padding(8);

        column![
            header,
            row![tabs].padding([0.0, 12.0]),
            scrollable(content).height(Length::Fill),
            status_bar,
        ]
        .into()
    }
}
