use iced::widget::{button, container, progress_bar};
use iced::{border, Color, Theme};
use shieldcore::analysis::ThreatBand;
use shieldcore::model::Prediction;

pub const GREEN: Color = Color::from_rgb(0.06, 0.73, 0.51);
pub const RED: Color = Color::from_rgb(0.94, 0.27, 0.27);
pub const YELLOW: Color = Color::from_rgb(0.92, 0.70, 0.13);
pub const GRAY: Color = Color::from_rgb(0.42, 0.45, 0.50);
pub const ACCENT: Color = Color::from_rgb(0.56, 0.18, 0.89);
pub const INDIGO: Color = Color::from_rgb(0.40, 0.49, 0.92);
pub const PINK: Color = Color::from_rgb(0.93, 0.39, 0.65);
pub const PANEL: Color = Color::from_rgb(0.09, 0.09, 0.12);
pub const TRACK: Color = Color::from_rgb(0.25, 0.25, 0.30);

pub fn band_color(band: ThreatBand) -> Color {
    match band {
        ThreatBand::High => RED,
        ThreatBand::Elevated => YELLOW,
        ThreatBand::Low => GREEN,
    }
}

/// Deepfake/Fake verdicts get the red theme, Real the green one, anything
/// unrecognized the neutral gray.
pub fn verdict_color(prediction: Prediction) -> Color {
    if prediction.is_manipulated() {
        RED
    } else if prediction == Prediction::Real {
        GREEN
    } else {
        GRAY
    }
}

pub fn panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(PANEL.into()),
        border: border::rounded(8),
        ..container::Style::default()
    }
}

/// Solid color card, used for the verdict banner and prediction pills.
pub fn tinted(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(color.into()),
        border: border::rounded(8),
        text_color: Some(Color::WHITE),
        ..container::Style::default()
    }
}

pub fn band_button(band: ThreatBand) -> impl Fn(&Theme, button::Status) -> button::Style {
    let color = band_color(band);
    move |_theme, status| {
        let background = if matches!(status, button::Status::Hovered) {
            Color { a: 0.8, ..color }
        } else {
            color
        };
        button::Style {
            background: Some(background.into()),
            text_color: Color::WHITE,
            border: border::rounded(6),
            ..button::Style::default()
        }
    }
}

pub fn tab_button(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let background = if active {
            ACCENT
        } else if matches!(status, button::Status::Hovered) {
            TRACK
        } else {
            PANEL
        };
        button::Style {
            background: Some(background.into()),
            text_color: Color::WHITE,
            border: border::rounded(6),
            ..button::Style::default()
        }
    }
}

pub fn colored_bar(color: Color) -> impl Fn(&Theme) -> progress_bar::Style {
    move |_theme| progress_bar::Style {
        background: TRACK.into(),
        bar: color.into(),
        border: border::rounded(4),
    }
}
