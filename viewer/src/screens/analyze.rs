use iced::widget::{button, column, container, progress_bar, row, text, text_input, Column};
use iced::{Element, Length};
use shieldcore::model::AnalysisResult;
use shieldcore::prelude::DataError;

use crate::style;
use crate::Message;

/// Upload lifecycle. The processing stretch is simulated client-side (the
/// request already returned) so the user sees the same uploading ->
/// processing -> complete progression the web client showed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Uploading,
    Processing,
    Complete,
    Failed,
}

#[derive(Default)]
pub struct AnalyzeScreen {
    pub path_input: String,
    pub phase: UploadPhase,
    pub processing_progress: f32,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
}

impl AnalyzeScreen {
    pub fn start(&mut self) {
        self.phase = UploadPhase::Uploading;
        self.processing_progress = 0.0;
        self.result = None;
        self.error = None;
    }

    pub fn uploaded(&mut self, outcome: Result<AnalysisResult, DataError>) {
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.phase = UploadPhase::Processing;
                self.processing_progress = 50.0;
            }
            Err(error) => {
                self.phase = UploadPhase::Failed;
                self.error = Some(error.to_string());
            }
        }
    }

    pub fn tick(&mut self) {
        if self.phase == UploadPhase::Processing {
            self.processing_progress += 2.5;
            if self.processing_progress >= 100.0 {
                self.processing_progress = 100.0;
                self.phase = UploadPhase::Complete;
            }
        }
    }

    pub fn busy(&self) -> bool {
        matches!(self.phase, UploadPhase::Uploading | UploadPhase::Processing)
    }

    pub fn completed_id(&self) -> Option<String> {
        (self.phase == UploadPhase::Complete)
            .then(|| self.result.as_ref().map(|result| result.id.clone()))
            .flatten()
    }
}

pub fn view(screen: &AnalyzeScreen) -> Element<'_, Message> {
    let mut page = Column::new().spacing(14).padding(16);

    page = page.push(text("Analyze a Video").size(22));
    page = page.push(
        text("Upload a clip for deepfake analysis. Large files can be trimmed first.")
            .size(13)
            .color(style::GRAY),
    );

    page = page.push(
        container(
            column![
                text_input("Path to video file", &screen.path_input)
                    .on_input(Message::UploadPathChanged)
                    .padding(6),
                button(text(if screen.busy() { "Working..." } else { "Analyze" }))
                    .on_press_maybe((!screen.busy()).then_some(Message::UploadStarted))
                    .padding(8),
            ]
            .spacing(8),
        )
        .style(style::panel)
        .padding(12)
        .width(Length::Fixed(420.0)),
    );

    match screen.phase {
        UploadPhase::Idle => {}
        UploadPhase::Uploading => {
            page = page.push(
                column![
                    text("Uploading...").size(13),
                    progress_bar(0.0..=100.0, 25.0).style(style::colored_bar(style::ACCENT)),
                ]
                .spacing(4),
            );
        }
        UploadPhase::Processing => {
            page = page.push(
                column![
                    text("Processing...").size(13),
                    progress_bar(0.0..=100.0, screen.processing_progress)
                        .style(style::colored_bar(style::ACCENT)),
                ]
                .spacing(4),
            );
        }
        UploadPhase::Complete => {
            let summary = screen
                .result
                .as_ref()
                .map(|result| {
                    format!(
                        "Analysis complete: {} ({})",
                        result.prediction.label(),
                        shieldcore::format::percent(result.confidence)
                    )
                })
                .unwrap_or_else(|| "Analysis complete".into());
            page = page.push(
                row![
                    text(summary).size(14).color(style::GREEN),
                    button("View results").on_press(Message::ViewAnalyzed).padding(6),
                ]
                .spacing(12)
                .align_y(iced::Alignment::Center),
            );
        }
        UploadPhase::Failed => {
            let reason = screen.error.as_deref().unwrap_or("upload failed");
            page = page.push(text(reason).size(13).color(style::RED));
        }
    }

    page.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_progression_runs_fifty_to_hundred() {
        let mut screen = AnalyzeScreen::default();
        screen.start();
        assert_eq!(screen.phase, UploadPhase::Uploading);
        screen.uploaded(Ok(AnalysisResult {
            id: "vid_1".into(),
            ..AnalysisResult::default()
        }));
        assert_eq!(screen.phase, UploadPhase::Processing);
        assert_eq!(screen.processing_progress, 50.0);
        while screen.phase == UploadPhase::Processing {
            screen.tick();
        }
        assert_eq!(screen.phase, UploadPhase::Complete);
        assert_eq!(screen.completed_id().as_deref(), Some("vid_1"));
    }

    #[test]
    fn upload_failure_surfaces_the_error() {
        let mut screen = AnalyzeScreen::default();
        screen.start();
        screen.uploaded(Err(DataError::Network("refused".into())));
        assert_eq!(screen.phase, UploadPhase::Failed);
        assert!(screen.error.as_ref().unwrap().contains("refused"));
        assert!(screen.completed_id().is_none());
    }
}
