use iced::widget::{button, canvas::Canvas, column, container, row, slider, text, Column, Row};
use iced::{Element, Length};
use shieldcore::analysis::{self, ThreatBand};
use shieldcore::format;
use shieldcore::model::{FrameRecord, HeatmapImage};
use shieldcore::overlay::{self, OverlayVariant};

use crate::charts::HeatmapGlow;
use crate::style;
use crate::Message;

const GALLERY_COLUMNS: usize = 8;

/// Heatmap tab: centered demo glow synced to playback, an intensity slider,
/// and the gallery of backend-provided heatmap entries.
pub struct HeatmapScreen {
    pub images: Vec<HeatmapImage>,
    pub frames: Vec<FrameRecord>,
    pub demo: bool,
    pub error: Option<String>,
    pub loading: bool,
    pub active: usize,
    pub opacity: f64,
    pub is_playing: bool,
    pub playhead: f64,
    pub duration: f64,
}

impl Default for HeatmapScreen {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            frames: Vec::new(),
            demo: false,
            error: None,
            loading: false,
            active: 0,
            opacity: 0.7,
            is_playing: false,
            playhead: 0.0,
            duration: 0.0,
        }
    }
}

impl HeatmapScreen {
    pub fn begin_loading(&mut self) {
        let opacity = self.opacity;
        *self = Self {
            loading: true,
            opacity,
            ..Self::default()
        };
    }

    pub fn apply_frames(&mut self, frames: Vec<FrameRecord>, duration: f64) {
        self.frames = frames;
        self.duration = if duration > 0.0 {
            duration
        } else {
            self.frames.len().max(1) as f64
        };
        self.active = 0;
        self.playhead = 0.0;
    }

    pub fn apply_images(&mut self, images: Vec<HeatmapImage>, demo: bool, error: Option<String>) {
        self.images = images;
        self.demo = demo;
        self.error = error;
        self.loading = false;
    }

    fn frame_duration(&self) -> f64 {
        self.duration / self.frames.len().max(1) as f64
    }

    pub fn toggle(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        if !self.is_playing && self.playhead >= self.duration {
            self.playhead = 0.0;
            self.active = 0;
        }
        self.is_playing = !self.is_playing;
    }

    pub fn select(&mut self, index: usize) {
        if index >= self.frames.len() {
            return;
        }
        self.active = index;
        self.playhead = self.frame_duration() * index as f64;
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Playback sync: the active frame follows the playhead, one update per
    /// tick while playing.
    pub fn tick(&mut self, elapsed: f64) {
        if !self.is_playing {
            return;
        }
        self.playhead += elapsed;
        if self.playhead >= self.duration {
            self.playhead = self.duration;
            self.is_playing = false;
        }
        let frame_duration = self.frame_duration();
        if frame_duration > 0.0 {
            self.active = ((self.playhead / frame_duration) as usize)
                .min(self.frames.len().saturating_sub(1));
        }
    }

    fn active_probability(&self) -> f64 {
        self.frames
            .get(self.active)
            .map(|frame| frame.probability_fake)
            .unwrap_or(0.0)
    }
}

fn key_frame_gallery(frames: &[FrameRecord], active: usize) -> Element<'_, Message> {
    let mut gallery = Column::new().spacing(6);
    for (row_index, chunk) in frames.chunks(GALLERY_COLUMNS).enumerate() {
        let mut gallery_row = Row::new().spacing(6);
        for (col_index, frame) in chunk.iter().enumerate() {
            let index = row_index * GALLERY_COLUMNS + col_index;
            let band = ThreatBand::of(frame.probability_fake);
            let marker = if index == active { "▶ " } else { "" };
            gallery_row = gallery_row.push(
                button(text(format!("{marker}{}", index + 1)).size(12))
                    .style(style::band_button(band))
                    .on_press(Message::HeatmapFrameSelected(index))
                    .padding(6),
            );
        }
        gallery = gallery.push(gallery_row);
    }
    gallery.into()
}

pub fn view(screen: &HeatmapScreen) -> Element<'_, Message> {
    if screen.loading {
        return container(text("Loading manipulation heatmap...").size(16))
            .padding(30)
            .into();
    }
    if screen.frames.is_empty() && screen.images.is_empty() {
        return container(text("Heatmap unavailable").size(16))
            .padding(30)
            .into();
    }

    let mut page = Column::new().spacing(14).padding(16);

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

    let probability = screen.active_probability();
    let glow = overlay::demo_placement(
        OverlayVariant::Heatmap,
        screen.active,
        probability,
        screen.opacity,
    );
    let caption = match &glow {
        Some(_) => format!(
            "Demo overlay. Manipulation Probability: {}",
            format::percent(probability)
        ),
        None => "Demo overlay inactive: below display threshold".into(),
    };
    page = page.push(
        Canvas::new(HeatmapGlow {
            intensity: glow.map(|placement| placement.intensity as f32).unwrap_or(0.0),
            caption,
        })
        .width(Length::Fill)
        .height(Length::Fixed(240.0)),
    );

    page = page.push(
        row![
            button(text(if screen.is_playing { "Pause" } else { "Play" }))
                .on_press(Message::HeatmapPlayToggled)
                .padding(6),
            text(format!(
                "{} / {}",
                format::clock(screen.playhead),
                format::clock(screen.duration)
            ))
            .size(14),
        ]
        .spacing(12),
    );

    page = page.push(
        row![
            text("Heatmap Intensity:").size(14),
            slider(0.0..=1.0, screen.opacity, Message::HeatmapOpacityChanged).step(0.1),
            text(format!("{}%", (screen.opacity * 100.0).round() as i64)).size(14),
        ]
        .spacing(12),
    );

    if !screen.frames.is_empty() {
        page = page.push(text("Key Frames").size(15));
        page = page.push(key_frame_gallery(&screen.frames, screen.active));

        let peak = analysis::peak_probability(&screen.frames);
        let suspicious = analysis::suspicious_count(&screen.frames);
        page = page.push(
            row![
                container(
                    column![
                        text("Peak Manipulation").size(12).color(style::GRAY),
                        text(format::percent(peak)).size(20),
                    ]
                    .spacing(4)
                )
                .style(style::panel)
                .padding(10)
                .width(Length::Fill),
                container(
                    column![
                        text("Suspicious Frames").size(12).color(style::GRAY),
                        text(format!("{suspicious} of {}", screen.frames.len())).size(20),
                    ]
                    .spacing(4)
                )
                .style(style::panel)
                .padding(10)
                .width(Length::Fill),
            ]
            .spacing(10),
        );
    }

    if !screen.images.is_empty() {
        page = page.push(text("Heatmap Gallery").size(15));
        let mut gallery = Column::new().spacing(8);
        for image in &screen.images {
            let kind = if image.image_data.starts_with("data:") {
                "data URI"
            } else {
                "URL"
            };
            let probability = image
                .probability_fake
                .map(format::percent)
                .unwrap_or_else(|| "N/A".into());
            gallery = gallery.push(
                container(
                    row![
                        text(format!("Frame: {}", image.frame_index)).size(13),
                        text(format!("Probability: {probability}")).size(13),
                        text(format!("Source: {kind}")).size(12).color(style::GRAY),
                    ]
                    .spacing(20),
                )
                .style(style::panel)
                .padding(10)
                .width(Length::Fill),
            );
        }
        page = page.push(gallery);
    }

    page = page.push(
        text(
            "This overlay visualizes potentially manipulated regions. It is a \
             demo placeholder, not detector output.",
        )
        .size(12)
        .color(style::GRAY),
    );

    page.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(count: usize) -> Vec<FrameRecord> {
        (0..count)
            .map(|i| FrameRecord {
                frame: i + 1,
                probability_fake: 0.5,
                timestamp: None,
            })
            .collect()
    }

    #[test]
    fn playback_sync_tracks_the_playhead() {
        let mut screen = HeatmapScreen::default();
        screen.apply_frames(frames(10), 10.0);
        screen.toggle();
        screen.tick(4.5);
        assert_eq!(screen.active, 4);
        screen.tick(100.0);
        assert!(!screen.is_playing);
        assert_eq!(screen.active, 9);
    }

    #[test]
    fn select_moves_playhead_to_frame_start() {
        let mut screen = HeatmapScreen::default();
        screen.apply_frames(frames(10), 20.0);
        screen.select(5);
        assert_eq!(screen.playhead, 10.0);
        screen.select(50);
        assert_eq!(screen.active, 5);
    }

    #[test]
    fn opacity_is_clamped() {
        let mut screen = HeatmapScreen::default();
        screen.set_opacity(1.7);
        assert_eq!(screen.opacity, 1.0);
        screen.set_opacity(-0.2);
        assert_eq!(screen.opacity, 0.0);
    }
}
