use iced::widget::{button, canvas::Canvas, column, container, row, text, Column, Row};
use iced::{Element, Length};
use shieldcore::analysis::ThreatBand;
use shieldcore::format;
use shieldcore::model::FrameRecord;
use shieldcore::overlay::{self, OverlayVariant};

use crate::charts::{FrameOverlay, FrameTimeline, LineChart, OverlayShape, Series};
use crate::style;
use crate::Message;

const GRID_COLUMNS: usize = 6;

/// Frame-by-frame tab: probability chart, marker timeline, seekable grid,
/// and the demo overlay surface.
#[derive(Default)]
pub struct FramesScreen {
    pub frames: Vec<FrameRecord>,
    pub demo: bool,
    pub error: Option<String>,
    pub loading: bool,
    pub current: usize,
    pub is_playing: bool,
    pub playhead: f64,
    pub duration: f64,
}

impl FramesScreen {
    pub fn begin_loading(&mut self) {
        *self = Self {
            loading: true,
            ..Self::default()
        };
    }

    /// Installs a frame set and spreads timestamps evenly over the clip,
    /// the same mapping the web player used.
    pub fn apply(&mut self, mut frames: Vec<FrameRecord>, duration: f64, demo: bool, error: Option<String>) {
        let duration = if duration > 0.0 {
            duration
        } else {
            frames.len().max(1) as f64
        };
        let count = frames.len().max(1) as f64;
        for (index, frame) in frames.iter_mut().enumerate() {
            frame.timestamp = Some(duration / count * index as f64);
        }
        *self = Self {
            frames,
            demo,
            error,
            duration,
            ..Self::default()
        };
    }

    pub fn toggle(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        if !self.is_playing && self.playhead >= self.duration {
            self.playhead = 0.0;
            self.current = 0;
        }
        self.is_playing = !self.is_playing;
    }

    pub fn seek(&mut self, index: usize) {
        if index >= self.frames.len() {
            return;
        }
        self.current = index;
        self.playhead = self.frames[index].timestamp.unwrap_or(0.0);
    }

    /// One update per tick while playing; stops at the end of the clip.
    pub fn tick(&mut self, elapsed: f64) {
        if !self.is_playing {
            return;
        }
        self.playhead += elapsed;
        if self.playhead >= self.duration {
            self.playhead = self.duration;
            self.is_playing = false;
        }
        self.current = self
            .frames
            .iter()
            .rposition(|frame| frame.timestamp.unwrap_or(0.0) <= self.playhead)
            .unwrap_or(0);
    }

    fn current_frame(&self) -> Option<&FrameRecord> {
        self.frames.get(self.current)
    }
}

fn frame_grid(frames: &[FrameRecord]) -> Element<'_, Message> {
    let mut grid = Column::new().spacing(6);
    for (row_index, chunk) in frames.chunks(GRID_COLUMNS).enumerate() {
        let mut grid_row = Row::new().spacing(6);
        for (col_index, frame) in chunk.iter().enumerate() {
            let index = row_index * GRID_COLUMNS + col_index;
            let band = ThreatBand::of(frame.probability_fake);
            grid_row = grid_row.push(
                button(
                    column![
                        text(format!("Frame {}", index + 1)).size(12),
                        text(format::percent(frame.probability_fake)).size(11),
                    ]
                    .spacing(2),
                )
                .style(style::band_button(band))
                .on_press(Message::FrameSelected(index))
                .padding(6)
                .width(Length::Fill),
            );
        }
        grid = grid.push(grid_row);
    }
    grid.into()
}

pub fn view(screen: &FramesScreen) -> Element<'_, Message> {
    if screen.loading {
        return container(text("Loading frame analysis...").size(16))
            .padding(30)
            .into();
    }
    if screen.frames.is_empty() {
        return container(text("Frame analysis unavailable").size(16))
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

    let chart = LineChart {
        series: vec![Series {
            label: "Fake probability (%)".into(),
            color: style::RED,
            points: screen
                .frames
                .iter()
                .map(|frame| (frame.probability_fake * 100.0) as f32)
                .collect(),
        }],
        y_max: 100.0,
    };
    page = page.push(
        Canvas::new(chart)
            .width(Length::Fill)
            .height(Length::Fixed(200.0)),
    );

    let timeline = FrameTimeline {
        markers: screen
            .frames
            .iter()
            .map(|frame| {
                let fraction = (frame.timestamp.unwrap_or(0.0) / screen.duration) as f32;
                (fraction, style::band_color(ThreatBand::of(frame.probability_fake)))
            })
            .collect(),
        playhead: (screen.playhead / screen.duration) as f32,
    };
    page = page.push(
        Canvas::new(timeline)
            .width(Length::Fill)
            .height(Length::Fixed(36.0)),
    );

    let controls = row![
        button(text(if screen.is_playing { "Pause" } else { "Play" }))
            .on_press(Message::FramePlayToggled)
            .padding(6),
        text(format!(
            "{} / {}",
            format::clock(screen.playhead),
            format::clock(screen.duration)
        ))
        .size(14),
    ]
    .spacing(12);
    page = page.push(controls);

    if let Some(frame) = screen.current_frame() {
        let band = ThreatBand::of(frame.probability_fake);
        page = page.push(
            row![
                text(format!(
                    "Current Frame: {}/{}",
                    screen.current + 1,
                    screen.frames.len()
                ))
                .size(14),
                text(format!(
                    "Manipulation Probability: {}",
                    format::percent(frame.probability_fake)
                ))
                .size(14)
                .color(style::band_color(band)),
            ]
            .spacing(20),
        );

        let shape = overlay::demo_placement(
            OverlayVariant::Frame,
            screen.current,
            frame.probability_fake,
            1.0,
        )
        .map(|placement| OverlayShape {
            center_x: placement.center_x as f32,
            center_y: placement.center_y as f32,
            radius_x: placement.radius_x as f32,
            radius_y: placement.radius_y as f32,
            intensity: placement.intensity as f32,
        });
        let caption = if shape.is_some() {
            format!(
                "Demo overlay. Manipulation Probability: {}",
                format::percent(frame.probability_fake)
            )
        } else {
            "Demo overlay inactive: below display threshold".into()
        };
        page = page.push(
            Canvas::new(FrameOverlay { shape, caption })
                .width(Length::Fill)
                .height(Length::Fixed(220.0)),
        );
    }

    page = page.push(frame_grid(&screen.frames));

    page.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_with(count: usize, duration: f64) -> FramesScreen {
        let frames = (0..count)
            .map(|i| FrameRecord {
                frame: i + 1,
                probability_fake: 0.5,
                timestamp: None,
            })
            .collect();
        let mut screen = FramesScreen::default();
        screen.apply(frames, duration, false, None);
        screen
    }

    #[test]
    fn apply_spreads_timestamps_over_the_clip() {
        let screen = screen_with(4, 8.0);
        let stamps: Vec<f64> = screen
            .frames
            .iter()
            .map(|frame| frame.timestamp.unwrap())
            .collect();
        assert_eq!(stamps, vec![0.0, 2.0, 4.0, 6.0]);
    }

    #[test]
    fn playback_stops_at_the_end() {
        let mut screen = screen_with(4, 1.0);
        screen.toggle();
        for _ in 0..20 {
            screen.tick(0.1);
        }
        assert!(!screen.is_playing);
        assert_eq!(screen.playhead, 1.0);
        assert_eq!(screen.current, 3);
    }

    #[test]
    fn seek_jumps_to_the_frame_timestamp() {
        let mut screen = screen_with(4, 8.0);
        screen.seek(2);
        assert_eq!(screen.current, 2);
        assert_eq!(screen.playhead, 4.0);
        screen.seek(99);
        assert_eq!(screen.current, 2);
    }
}
