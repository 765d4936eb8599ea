use iced::widget::{button, column, container, progress_bar, row, scrollable, text, Column};
use iced::{Element, Font, Length};
use shieldcore::analysis;
use shieldcore::format;
use shieldcore::model::{AnalysisResult, FeedbackType};

use crate::style;
use crate::Message;

/// Results tab state; replaces the web client's page-global
/// `currentVideoId`/`isDownloadingPDF` pair with explicit fields.
#[derive(Default)]
pub struct ResultsScreen {
    pub result: Option<AnalysisResult>,
    pub demo: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub downloading_report: bool,
    pub report_status: Option<String>,
    pub feedback_notes: String,
    pub feedback_sent: bool,
    pub feedback_status: Option<String>,
    pub share_status: Option<String>,
}

impl ResultsScreen {
    pub fn begin_loading(&mut self) {
        *self = Self {
            loading: true,
            ..Self::default()
        };
    }

    pub fn apply(&mut self, result: AnalysisResult, demo: bool, error: Option<String>) {
        self.result = Some(result);
        self.demo = demo;
        self.error = error;
        self.loading = false;
    }
}

fn metric<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    container(
        column![
            text(label).size(12).color(style::GRAY),
            text(value).size(20),
        ]
        .spacing(4),
    )
    .style(style::panel)
    .padding(10)
    .width(Length::Fill)
    .into()
}

fn probability_bar<'a>(label: &'a str, value: f64, color: iced::Color) -> Element<'a, Message> {
    column![
        row![
            text(label).size(13),
            iced::widget::space::horizontal(),
            text(format::percent(value)).size(13),
        ],
        progress_bar(0.0..=100.0, (value * 100.0) as f32).style(style::colored_bar(color)),
    ]
    .spacing(4)
    .into()
}

pub fn view<'a>(
    screen: &'a ResultsScreen,
    video_id: Option<&'a str>,
    video_url: Option<String>,
) -> Element<'a, Message> {
    if screen.loading {
        return container(
            column![
                text("Analyzing...").size(24),
                text("Please wait").size(14).color(style::GRAY),
            ]
            .spacing(8),
        )
        .padding(30)
        .into();
    }

    let Some(result) = &screen.result else {
        return container(
            text("Enter a video ID above and press Load to fetch its analysis.").size(16),
        )
        .padding(30)
        .into();
    };

    let verdict_color = style::verdict_color(result.prediction);
    let mut page = Column::new().spacing(14).padding(16);

    if screen.demo {
        let reason = screen
            .error
            .as_deref()
            .unwrap_or("backend unavailable");
        page = page.push(
            container(
                text(format!("Demo data: {reason}"))
                    .size(13)
                    .color(iced::Color::BLACK),
            )
            .style(style::tinted(style::YELLOW))
            .padding(8)
            .width(Length::Fill),
        );
    }

    let verdict_card = container(
        column![
            text(result.prediction.label()).size(34),
            text(format!("{} Confidence", format::percent(result.confidence))).size(16),
            text(result.prediction.summary()).size(13),
        ]
        .spacing(6),
    )
    .style(style::tinted(verdict_color))
    .padding(16)
    .width(Length::Fill);
    page = page.push(verdict_card);

    let info_line = text(format!(
        "{}  |  {}  |  {}  |  analyzed {}",
        result.filename,
        result.resolution,
        format::clock(result.duration),
        format::short_date(result.timestamp),
    ))
    .size(13)
    .color(style::GRAY);
    page = page.push(info_line);

    if let Some(url) = video_url {
        page = page.push(
            text(format!("Preview stream: {url}"))
                .size(12)
                .color(style::GRAY),
        );
    }

    page = page.push(
        container(
            column![
                text("Probability Distribution").size(15),
                probability_bar("Real", result.probabilities.real, style::GREEN),
                probability_bar("Deepfake", result.probabilities.fake, style::RED),
            ]
            .spacing(10),
        )
        .style(style::panel)
        .padding(12)
        .width(Length::Fill),
    );

    let frames = &result.frame_analysis;
    let suspicious = analysis::suspicious_count(frames);
    page = page.push(row![
        metric("Peak Detection", format::percent(result.max_fake_probability)),
        metric("Average", format::percent(result.avg_fake_probability)),
        metric("Suspicious Frames", format!("{suspicious}/{}", frames.len())),
        metric("Processing Time", result.processing_time.clone()),
    ]
    .spacing(10));

    page = page.push(
        text(format!(
            "Frames analyzed: {}   Frame rate: {}   Model: {}",
            result.frames_analyzed, result.frame_rate, result.model,
        ))
        .size(13)
        .color(style::GRAY),
    );

    let report_button = button(text(if screen.downloading_report {
        "Generating PDF..."
    } else {
        "Download Report"
    }))
    .on_press_maybe(
        (!screen.downloading_report && video_id.is_some()).then_some(Message::DownloadReport),
    )
    .padding(8);

    let mut actions = row![
        report_button,
        button("Share Link").on_press(Message::ShareLink).padding(8),
    ]
    .spacing(10);
    if let Some(status) = &screen.report_status {
        actions = actions.push(text(status).size(13).color(style::GRAY));
    }
    if let Some(status) = &screen.share_status {
        actions = actions.push(text(status).size(13).color(style::GRAY));
    }
    page = page.push(actions);

    let feedback: Element<'a, Message> = if screen.feedback_sent {
        text("Thank you for your feedback.")
            .size(13)
            .color(style::GREEN)
            .into()
    } else {
        let mut block = column![
            text("Was this verdict correct?").size(14),
            row![
                button("Correct")
                    .on_press(Message::SubmitFeedback(FeedbackType::Correct))
                    .padding(6),
                button("Incorrect")
                    .on_press(Message::SubmitFeedback(FeedbackType::Incorrect))
                    .padding(6),
                button("Report Issue")
                    .on_press(Message::SubmitFeedback(FeedbackType::Report))
                    .padding(6),
            ]
            .spacing(8),
            iced::widget::text_input("Notes (optional)", &screen.feedback_notes)
                .on_input(Message::FeedbackNotesChanged)
                .padding(6),
        ]
        .spacing(8);
        if let Some(status) = &screen.feedback_status {
            block = block.push(text(status).size(13).color(style::RED));
        }
        container(block)
            .style(style::panel)
            .padding(12)
            .width(Length::Fill)
            .into()
    };
    page = page.push(feedback);

    let technical = serde_json::to_string_pretty(result)
        .unwrap_or_else(|error| format!("technical dump unavailable: {error}"));
    page = page.push(
        container(
            column![
                text("Technical Details").size(15),
                scrollable(text(technical).size(12).font(Font::MONOSPACE))
                    .height(Length::Fixed(220.0)),
            ]
            .spacing(8),
        )
        .style(style::panel)
        .padding(12)
        .width(Length::Fill),
    );

    page.into()
}
