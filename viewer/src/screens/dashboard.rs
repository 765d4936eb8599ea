use iced::widget::{button, canvas::Canvas, column, container, row, text, text_input, Column};
use iced::{Element, Length};
use shieldcore::dashboard::{self, DashboardStats, UserProfile};
use shieldcore::format;
use shieldcore::mock;
use shieldcore::model::HistoryEntry;

use crate::charts::{DonutChart, LineChart, Series};
use crate::style;
use crate::Message;

/// Dashboard tab: profile, aggregate stats, charts, history tables, and the
/// API-key panel.
pub struct DashboardScreen {
    pub profile: UserProfile,
    pub profile_demo: bool,
    pub stats: Option<DashboardStats>,
    pub history: Vec<HistoryEntry>,
    pub demo: bool,
    pub error: Option<String>,
    pub loading: bool,
    pub page: usize,
    pub api_key_visible: bool,
    pub api_key: String,
    pub key_status: Option<String>,
    pub login_email: String,
    pub login_password: String,
    pub auth_status: Option<String>,
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self {
            // The backend exposes no profile endpoint; the demo identity is
            // all there is, exactly like the web dashboard's fallback.
            profile: mock::demo_profile(),
            profile_demo: true,
            stats: None,
            history: Vec::new(),
            demo: false,
            error: None,
            loading: false,
            page: 0,
            api_key_visible: false,
            api_key: mock::DEMO_API_KEY.into(),
            key_status: None,
            login_email: String::new(),
            login_password: String::new(),
            auth_status: None,
        }
    }
}

impl DashboardScreen {
    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn apply_history(&mut self, history: Vec<HistoryEntry>, demo: bool, error: Option<String>) {
        self.stats = Some(dashboard::compute_stats(&history));
        self.history = history;
        self.demo = demo;
        self.error = error;
        self.loading = false;
        self.page = 0;
    }

    pub fn next_page(&mut self) {
        if self.page + 1 < dashboard::page_count(self.history.len()) {
            self.page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }
}

fn stat_tile<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    container(
        column![
            text(label).size(12).color(style::GRAY),
            text(value).size(22),
        ]
        .spacing(4),
    )
    .style(style::panel)
    .padding(12)
    .width(Length::Fill)
    .into()
}

fn prediction_pill(entry: &HistoryEntry) -> Element<'_, Message> {
    let color = style::verdict_color(entry.result.prediction);
    container(text(entry.result.prediction.label()).size(11))
        .style(style::tinted(color))
        .padding(4)
        .into()
}

fn history_row<'a>(entry: &'a HistoryEntry) -> Element<'a, Message> {
    container(
        row![
            text(&entry.filename).size(13).width(Length::FillPortion(3)),
            text(format::short_date(entry.timestamp))
                .size(13)
                .color(style::GRAY)
                .width(Length::FillPortion(2)),
            prediction_pill(entry),
            text(format::percent_scaled(entry.result.confidence))
                .size(13)
                .width(Length::FillPortion(1)),
            button(text("Report").size(12))
                .on_press(Message::RowReportRequested(entry.id.clone()))
                .padding(4),
        ]
        .spacing(10)
        .align_y(iced::Alignment::Center),
    )
    .style(style::panel)
    .padding(8)
    .width(Length::Fill)
    .into()
}

pub fn view<'a>(screen: &'a DashboardScreen, signed_in: bool) -> Element<'a, Message> {
    let mut page = Column::new().spacing(14).padding(16);

    // Profile card.
    let mut profile_line = row![
        container(text(screen.profile.initials()).size(16))
            .style(style::tinted(style::ACCENT))
            .padding(10),
        column![
            text(&screen.profile.name).size(16),
            text(&screen.profile.email).size(13).color(style::GRAY),
        ]
        .spacing(2),
    ]
    .spacing(12)
    .align_y(iced::Alignment::Center);
    if screen.profile_demo {
        profile_line = profile_line.push(text("demo profile").size(12).color(style::GRAY));
    }
    profile_line = profile_line.push(iced::widget::space::horizontal());
    profile_line = profile_line.push(
        button("Refresh")
            .on_press(Message::DashboardRefresh)
            .padding(6),
    );
    page = page.push(profile_line);

    if screen.demo {
        let reason = screen.error.as_deref().unwrap_or("backend unavailable");
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

    if screen.loading {
        page = page.push(text("Loading dashboard...").size(14).color(style::GRAY));
    }

    if let Some(stats) = &screen.stats {
        page = page.push(row![
            stat_tile("Total Analyses", stats.total_analyses.to_string()),
            stat_tile("Fakes Detected", stats.fakes_detected.to_string()),
            stat_tile(
                "Detection Rate",
                format::percent_scaled(stats.detection_rate)
            ),
            stat_tile("API Usage", stats.api_usage.to_string()),
        ]
        .spacing(10));
    }

    if !screen.history.is_empty() {
        let series = dashboard::monthly_series(&screen.history);
        let chart = LineChart {
            series: vec![
                Series {
                    label: "Total Analyses".into(),
                    color: style::INDIGO,
                    points: series.totals.iter().map(|&value| value as f32).collect(),
                },
                Series {
                    label: "Deepfakes Detected".into(),
                    color: style::PINK,
                    points: series.fakes.iter().map(|&value| value as f32).collect(),
                },
            ],
            y_max: series
                .totals
                .iter()
                .copied()
                .max()
                .unwrap_or(1)
                .max(1) as f32,
        };
        let (real, fake) = dashboard::distribution(&screen.history);
        let donut = DonutChart {
            slices: vec![(style::GREEN, real as f32), (style::PINK, fake as f32)],
        };
        page = page.push(
            row![
                column![
                    text("Analyses Over Time").size(14),
                    Canvas::new(chart)
                        .width(Length::Fill)
                        .height(Length::Fixed(180.0)),
                ]
                .spacing(6)
                .width(Length::FillPortion(2)),
                column![
                    text("Detection Distribution").size(14),
                    Canvas::new(donut)
                        .width(Length::Fill)
                        .height(Length::Fixed(180.0)),
                    text(format!("Real Videos: {real}   Deepfakes: {fake}"))
                        .size(12)
                        .color(style::GRAY),
                ]
                .spacing(6)
                .width(Length::FillPortion(1)),
            ]
            .spacing(14),
        );

        // Recent analyses.
        page = page.push(text("Recent Analyses").size(15));
        let mut recent = Column::new().spacing(6);
        for entry in dashboard::recent(&screen.history) {
            recent = recent.push(history_row(entry));
        }
        page = page.push(recent);

        // Paginated full history.
        page = page.push(text("Analysis History").size(15));
        let mut table = Column::new().spacing(6);
        for entry in dashboard::page_slice(&screen.history, screen.page) {
            table = table.push(history_row(entry));
        }
        page = page.push(table);

        let (start, end) = dashboard::page_window(screen.history.len(), screen.page);
        let last_page = dashboard::page_count(screen.history.len()) - 1;
        page = page.push(
            row![
                text(format!(
                    "Showing {start} to {end} of {} entries",
                    screen.history.len()
                ))
                .size(13)
                .color(style::GRAY),
                iced::widget::space::horizontal(),
                button("Previous")
                    .on_press_maybe((screen.page > 0).then_some(Message::PagePrev))
                    .padding(6),
                button("Next")
                    .on_press_maybe((screen.page < last_page).then_some(Message::PageNext))
                    .padding(6),
            ]
            .spacing(10)
            .align_y(iced::Alignment::Center),
        );
    }

    // API key panel.
    let shown_key = if screen.api_key_visible {
        screen.api_key.clone()
    } else {
        dashboard::MASKED_KEY.into()
    };
    let mut key_block = column![
        text("API Key").size(15),
        row![
            container(text(shown_key).size(13).font(iced::Font::MONOSPACE))
                .style(style::panel)
                .padding(8)
                .width(Length::Fill),
            button(text(if screen.api_key_visible { "Hide" } else { "Show" }).size(13))
                .on_press(Message::ToggleKeyVisibility)
                .padding(6),
            button(text("Copy").size(13))
                .on_press(Message::CopyApiKey)
                .padding(6),
            button(text("Regenerate").size(13))
                .on_press(Message::RegenerateKey)
                .padding(6),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center),
    ]
    .spacing(8);
    if let Some(status) = &screen.key_status {
        key_block = key_block.push(text(status).size(12).color(style::GRAY));
    }
    page = page.push(
        container(key_block)
            .style(style::panel)
            .padding(12)
            .width(Length::Fill),
    );

    // Account panel.
    let account: Element<'a, Message> = if signed_in {
        row![
            text("Signed in").size(14).color(style::GREEN),
            button("Log out").on_press(Message::Logout).padding(6),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center)
        .into()
    } else {
        let mut block = column![
            text("Account").size(15),
            text_input("Email", &screen.login_email)
                .on_input(Message::LoginEmailChanged)
                .padding(6),
            text_input("Password", &screen.login_password)
                .on_input(Message::LoginPasswordChanged)
                .secure(true)
                .padding(6),
            button("Sign in").on_press(Message::LoginSubmitted).padding(6),
        ]
        .spacing(8);
        if let Some(status) = &screen.auth_status {
            block = block.push(text(status).size(12).color(style::RED));
        }
        container(block)
            .style(style::panel)
            .padding(12)
            .width(Length::Fixed(320.0))
            .into()
    };
    page = page.push(account);

    page.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_fallback_paginates_to_three_pages() {
        let mut screen = DashboardScreen::default();
        screen.apply_history(mock::demo_history_with(7, 25, 0), true, None);
        assert_eq!(screen.history.len(), 25);
        assert_eq!(dashboard::recent(&screen.history).len(), 5);
        assert_eq!(dashboard::page_slice(&screen.history, 0).len(), 10);

        screen.next_page();
        screen.next_page();
        assert_eq!(screen.page, 2);
        screen.next_page();
        assert_eq!(screen.page, 2);
        screen.previous_page();
        assert_eq!(screen.page, 1);
    }

    #[test]
    fn default_screen_carries_the_demo_identity() {
        let screen = DashboardScreen::default();
        assert_eq!(screen.profile.initials(), "JS");
        assert!(screen.api_key.starts_with("vs_"));
        assert!(!screen.api_key_visible);
    }
}
