use iced::widget::{button, canvas::Canvas, column, container, progress_bar, row, text, text_input, Column};
use iced::{Element, Length};
use shieldcore::format;
use shieldcore::prelude::DataError;
use shieldcore::trim::{TrimRange, TRIM_STEPS};
use std::fs;
use std::path::PathBuf;

use crate::charts::SelectionBar;
use crate::style;
use crate::Message;

/// Quick-select windows, in seconds.
pub const QUICK_SELECTS: [u32; 4] = [30, 60, 120, 180];

const MAX_UPLOAD_BYTES: u64 = 500 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct LoadedClip {
    pub path: PathBuf,
    pub size: u64,
}

impl LoadedClip {
    /// Output path beside the source: `clip.mp4` -> `clip_trimmed.mp4`.
    pub fn output_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "clip".into());
        let extension = self
            .path
            .extension()
            .map(|extension| extension.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mp4".into());
        self.path
            .with_file_name(format!("{stem}_trimmed.{extension}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrimmerStage {
    #[default]
    Closed,
    Open,
    Trimming,
}

/// Trimmer tab.
///
/// The native client cannot probe media duration without a decoder, so the
/// clip duration is entered alongside the path; everything downstream
/// (range clamping, size estimate, byte slice) runs off those two numbers.
#[derive(Default)]
pub struct TrimmerScreen {
    pub path_input: String,
    pub duration_input: String,
    pub clip: Option<LoadedClip>,
    pub range: Option<TrimRange>,
    pub stage: TrimmerStage,
    pub progress_index: usize,
    pub error: Option<String>,
    pub output: Option<(PathBuf, u64)>,
}

impl TrimmerScreen {
    /// `Closed -> Open`: captures file size and duration, full range
    /// selected.
    pub fn open(&mut self) -> Result<(), DataError> {
        let duration: f64 = self
            .duration_input
            .trim()
            .parse()
            .map_err(|_| DataError::MediaLoad("duration must be a number of seconds".into()))?;
        if duration <= 0.0 {
            return Err(DataError::MediaLoad("duration must be positive".into()));
        }
        let path = PathBuf::from(self.path_input.trim());
        let metadata =
            fs::metadata(&path).map_err(|error| DataError::MediaLoad(error.to_string()))?;
        if !metadata.is_file() {
            return Err(DataError::MediaLoad("not a regular file".into()));
        }

        self.clip = Some(LoadedClip {
            path,
            size: metadata.len(),
        });
        self.range = Some(TrimRange::new(duration));
        self.stage = TrimmerStage::Open;
        self.error = None;
        self.output = None;
        Ok(())
    }

    /// Cancel or finish: back to `Closed`, selection dropped.
    pub fn close(&mut self) {
        let path_input = std::mem::take(&mut self.path_input);
        let duration_input = std::mem::take(&mut self.duration_input);
        *self = Self {
            path_input,
            duration_input,
            ..Self::default()
        };
    }

    pub fn set_start(&mut self, value: f64) {
        if let Some(range) = &mut self.range {
            range.set_start(value);
        }
    }

    pub fn set_end(&mut self, value: f64) {
        if let Some(range) = &mut self.range {
            range.set_end(value);
        }
    }

    pub fn quick_select(&mut self, seconds: u32) {
        if let Some(range) = &mut self.range {
            range.quick_select(seconds as f64);
        }
    }

    pub fn reset_range(&mut self) {
        if let Some(range) = &mut self.range {
            range.reset();
        }
    }

    pub fn begin_trim(&mut self) {
        self.stage = TrimmerStage::Trimming;
        self.progress_index = 0;
        self.error = None;
        self.output = None;
    }

    /// Walks the displayed milestone forward once per tick while trimming;
    /// the final step is reserved for completion.
    pub fn tick(&mut self) {
        if self.stage == TrimmerStage::Trimming && self.progress_index < TRIM_STEPS.len() - 2 {
            self.progress_index += 1;
        }
    }

    pub fn finish(&mut self, outcome: Result<(PathBuf, u64), DataError>) {
        self.stage = TrimmerStage::Open;
        match outcome {
            Ok(output) => {
                self.progress_index = TRIM_STEPS.len() - 1;
                self.output = Some(output);
            }
            Err(error) => {
                self.progress_index = 0;
                self.error = Some(format!(
                    "Failed to trim video: {error}. Try again or use a different file."
                ));
            }
        }
    }
}

pub fn view(screen: &TrimmerScreen) -> Element<'_, Message> {
    let mut page = Column::new().spacing(14).padding(16);

    page = page.push(text("Trim Video").size(22));
    page = page.push(
        text("Trim a clip that exceeds the upload limit before analyzing it.")
            .size(13)
            .color(style::GRAY),
    );

    if screen.stage == TrimmerStage::Closed {
        page = page.push(
            container(
                column![
                    text_input("Path to video file", &screen.path_input)
                        .on_input(Message::TrimPathChanged)
                        .padding(6),
                    text_input("Clip duration in seconds", &screen.duration_input)
                        .on_input(Message::TrimDurationChanged)
                        .padding(6),
                    button("Load").on_press(Message::TrimOpen).padding(8),
                ]
                .spacing(8),
            )
            .style(style::panel)
            .padding(12)
            .width(Length::Fixed(420.0)),
        );
        if let Some(error) = &screen.error {
            page = page.push(text(error).size(13).color(style::RED));
        }
        return page.into();
    }

    let (Some(clip), Some(range)) = (&screen.clip, &screen.range) else {
        return page.push(text("No clip loaded").size(14)).into();
    };

    let over_limit = clip.size > MAX_UPLOAD_BYTES;
    let mut info = format!(
        "File size: {}  |  Duration: {}  |  Maximum allowed: 500 MB",
        format::megabytes(clip.size as f64),
        format::clock(range.video_duration()),
    );
    if over_limit {
        info.push_str(". Too large: trim before uploading");
    }
    page = page.push(
        container(text(info).size(13).color(iced::Color::BLACK))
            .style(style::tinted(style::YELLOW))
            .padding(8)
            .width(Length::Fill),
    );

    page = page.push(text("Select Trim Range").size(16));
    page = page.push(
        row![
            text(format!("Start: {}", format::clock(range.start_time()))).size(13),
            text(format!("End: {}", format::clock(range.end_time()))).size(13),
            text(format!(
                "Trimmed Duration: {}",
                format::clock(range.selected_duration())
            ))
            .size(13)
            .color(style::GREEN),
        ]
        .spacing(24),
    );

    let (left, width) = range.selection_fractions();
    page = page.push(
        Canvas::new(SelectionBar {
            left: left as f32,
            width: width as f32,
        })
        .width(Length::Fill)
        .height(Length::Fixed(8.0)),
    );

    page = page.push(
        column![
            text("Start Time").size(12).color(style::GRAY),
            iced::widget::slider(
                0.0..=range.video_duration(),
                range.start_time(),
                Message::TrimStartChanged
            )
            .step(0.1),
            text("End Time").size(12).color(style::GRAY),
            iced::widget::slider(
                0.0..=range.video_duration(),
                range.end_time(),
                Message::TrimEndChanged
            )
            .step(0.1),
        ]
        .spacing(6),
    );

    let mut quick_row = iced::widget::Row::new().spacing(8);
    for seconds in QUICK_SELECTS {
        let label = if seconds < 60 {
            format!("First {seconds}s")
        } else {
            format!("First {} min", seconds / 60)
        };
        quick_row = quick_row.push(
            button(text(label).size(12))
                .on_press(Message::TrimQuickSelect(seconds))
                .padding(6),
        );
    }
    quick_row = quick_row.push(
        button(text("Reset").size(12))
            .on_press(Message::TrimRangeReset)
            .padding(6),
    );
    page = page.push(quick_row);

    page = page.push(
        container(
            column![
                text(format!(
                    "Estimated trimmed size: {}",
                    format::megabytes(range.estimated_bytes(clip.size))
                ))
                .size(14),
                text(
                    "Constant-bitrate approximation; actual size varies. The output \
                     is a raw byte slice and generally not a valid standalone media \
                     file. Real trimming belongs in a media pipeline."
                )
                .size(11)
                .color(style::GRAY),
            ]
            .spacing(4),
        )
        .style(style::panel)
        .padding(10)
        .width(Length::Fill),
    );

    if screen.stage == TrimmerStage::Trimming {
        let step = TRIM_STEPS[screen.progress_index.min(TRIM_STEPS.len() - 1)];
        page = page.push(
            column![
                row![
                    text(step.label).size(13),
                    iced::widget::space::horizontal(),
                    text(format!("{}%", step.percent)).size(13),
                ],
                progress_bar(0.0..=100.0, step.percent as f32)
                    .style(style::colored_bar(style::ACCENT)),
            ]
            .spacing(4),
        );
    }

    page = page.push(
        row![
            button("Cancel").on_press(Message::TrimClose).padding(8),
            button("Apply Trim")
                .on_press_maybe(
                    (screen.stage != TrimmerStage::Trimming).then_some(Message::TrimApply)
                )
                .padding(8),
        ]
        .spacing(10),
    );

    if let Some((path, bytes)) = &screen.output {
        page = page.push(
            text(format!(
                "Wrote {} to {}",
                format::megabytes(*bytes as f64),
                path.display()
            ))
            .size(13)
            .color(style::GREEN),
        );
    }
    if let Some(error) = &screen.error {
        page = page.push(text(error).size(13).color(style::RED));
    }

    page.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn open_requires_a_parsable_positive_duration() {
        let mut screen = TrimmerScreen {
            path_input: "/nonexistent".into(),
            duration_input: "abc".into(),
            ..TrimmerScreen::default()
        };
        assert!(matches!(screen.open(), Err(DataError::MediaLoad(_))));
        screen.duration_input = "-3".into();
        assert!(matches!(screen.open(), Err(DataError::MediaLoad(_))));
    }

    #[test]
    fn open_walks_the_state_machine_and_close_resets_it() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 2048]).unwrap();

        let mut screen = TrimmerScreen {
            path_input: file.path().to_string_lossy().into_owned(),
            duration_input: "60".into(),
            ..TrimmerScreen::default()
        };
        screen.open().unwrap();
        assert_eq!(screen.stage, TrimmerStage::Open);
        assert_eq!(screen.clip.as_ref().unwrap().size, 2048);
        let range = screen.range.unwrap();
        assert_eq!(range.video_duration(), 60.0);

        screen.begin_trim();
        assert_eq!(screen.stage, TrimmerStage::Trimming);
        screen.finish(Err(DataError::Trim("boom".into())));
        assert_eq!(screen.stage, TrimmerStage::Open);
        assert!(screen.error.is_some());

        screen.close();
        assert_eq!(screen.stage, TrimmerStage::Closed);
        assert!(screen.clip.is_none());
    }

    #[test]
    fn slider_edits_keep_the_clamp_invariant() {
        let mut screen = TrimmerScreen {
            range: Some(TrimRange::new(100.0)),
            stage: TrimmerStage::Open,
            ..TrimmerScreen::default()
        };
        screen.set_end(10.0);
        screen.set_start(50.0);
        let range = screen.range.unwrap();
        assert!(range.start_time() < range.end_time());
        assert!(range.end_time() <= range.video_duration());
    }

    #[test]
    fn progress_ticks_hold_back_the_final_step() {
        let mut screen = TrimmerScreen::default();
        screen.begin_trim();
        for _ in 0..20 {
            screen.tick();
        }
        assert_eq!(screen.progress_index, TRIM_STEPS.len() - 2);
        screen.finish(Ok((PathBuf::from("out.mp4"), 10)));
        assert_eq!(screen.progress_index, TRIM_STEPS.len() - 1);
    }

    #[test]
    fn output_path_gets_the_trimmed_suffix() {
        let clip = LoadedClip {
            path: PathBuf::from("/videos/clip.mp4"),
            size: 1,
        };
        assert_eq!(clip.output_path(), PathBuf::from("/videos/clip_trimmed.mp4"));
    }
}
