//! Canvas programs shared by the results, frame, heatmap, and dashboard
//! screens. These draw from plain data; no program fetches anything.

use iced::widget::canvas::{self, path, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Pixels, Point, Radians, Rectangle, Renderer, Theme};
use std::f32::consts::PI;

use crate::style;

const BACKGROUND: Color = Color::from_rgb(0.04, 0.04, 0.06);
const GRID: Color = Color::from_rgb(0.22, 0.22, 0.28);

fn caption(frame: &mut Frame, content: String, position: Point, size: f32, color: Color) {
    frame.fill_text(canvas::Text {
        content,
        position,
        color,
        size: Pixels(size),
        ..canvas::Text::default()
    });
}

#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub color: Color,
    pub points: Vec<f32>,
}

/// Multi-series line chart with a fixed y range and a light grid.
#[derive(Debug, Clone)]
pub struct LineChart {
    pub series: Vec<Series>,
    pub y_max: f32,
}

impl<Message> canvas::Program<Message> for LineChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND);

        let y_max = self.y_max.max(1.0);
        for grid_line in 0..=4 {
            let y = bounds.height * (grid_line as f32 / 4.0);
            let line = Path::new(|builder| {
                builder.move_to(Point::new(0.0, y));
                builder.line_to(Point::new(bounds.width, y));
            });
            frame.stroke(&line, Stroke::default().with_color(GRID));
        }
        caption(
            &mut frame,
            format!("{y_max:.0}"),
            Point::new(4.0, 2.0),
            11.0,
            GRID,
        );

        for series in &self.series {
            if series.points.len() < 2 {
                continue;
            }
            let step = bounds.width / (series.points.len() as f32 - 1.0);
            let line = Path::new(|builder| {
                for (i, value) in series.points.iter().enumerate() {
                    let x = i as f32 * step;
                    let normalized = (value / y_max).clamp(0.0, 1.0);
                    let y = bounds.height - normalized * bounds.height;
                    if i == 0 {
                        builder.move_to(Point::new(x, y));
                    } else {
                        builder.line_to(Point::new(x, y));
                    }
                }
            });
            frame.stroke(
                &line,
                Stroke::default().with_width(2.0).with_color(series.color),
            );
        }

        // Legend swatches along the top edge.
        let mut legend_x = 36.0;
        for series in &self.series {
            frame.fill_rectangle(Point::new(legend_x, 6.0), iced::Size::new(10.0, 10.0), series.color);
            caption(
                &mut frame,
                series.label.clone(),
                Point::new(legend_x + 14.0, 4.0),
                11.0,
                Color::WHITE,
            );
            legend_x += 14.0 + 7.0 * series.label.len() as f32 + 16.0;
        }

        vec![frame.into_geometry()]
    }
}

/// Doughnut distribution chart drawn as thick stroked arcs.
#[derive(Debug, Clone)]
pub struct DonutChart {
    pub slices: Vec<(Color, f32)>,
}

impl<Message> canvas::Program<Message> for DonutChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND);

        let total: f32 = self.slices.iter().map(|(_, value)| value).sum();
        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let radius = bounds.width.min(bounds.height) / 2.0 - 14.0;
        let thickness = (radius * 0.35).max(8.0);

        if total <= 0.0 || radius <= 0.0 {
            caption(
                &mut frame,
                "No data".into(),
                Point::new(center.x - 22.0, center.y - 8.0),
                12.0,
                GRID,
            );
            return vec![frame.into_geometry()];
        }

        let mut angle = -PI / 2.0;
        for (color, value) in &self.slices {
            if *value <= 0.0 {
                continue;
            }
            let span = value / total * 2.0 * PI;
            let arc = Path::new(|builder| {
                builder.arc(path::Arc {
                    center,
                    radius,
                    start_angle: Radians(angle),
                    end_angle: Radians(angle + span),
                });
            });
            frame.stroke(
                &arc,
                Stroke::default().with_width(thickness).with_color(*color),
            );
            angle += span;
        }

        vec![frame.into_geometry()]
    }
}

/// Timeline of frame markers colored by threat band with a playhead dot.
#[derive(Debug, Clone)]
pub struct FrameTimeline {
    /// `(timeline fraction, marker color)` per frame.
    pub markers: Vec<(f32, Color)>,
    /// Playhead position as a fraction of the timeline.
    pub playhead: f32,
}

impl<Message> canvas::Program<Message> for FrameTimeline {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND);

        let mid = bounds.height / 2.0;
        frame.fill_rectangle(
            Point::new(0.0, mid - 2.0),
            iced::Size::new(bounds.width, 4.0),
            style::TRACK,
        );

        for (fraction, color) in &self.markers {
            let x = fraction.clamp(0.0, 1.0) * bounds.width;
            frame.fill_rectangle(
                Point::new(x - 1.5, mid - 8.0),
                iced::Size::new(3.0, 16.0),
                *color,
            );
        }

        let playhead_x = self.playhead.clamp(0.0, 1.0) * bounds.width;
        let dot = Path::new(|builder| builder.circle(Point::new(playhead_x, mid), 5.0));
        frame.fill(&dot, Color::WHITE);

        vec![frame.into_geometry()]
    }
}

/// Proportional highlight of the selected trim range.
#[derive(Debug, Clone, Copy)]
pub struct SelectionBar {
    pub left: f32,
    pub width: f32,
}

impl<Message> canvas::Program<Message> for SelectionBar {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), style::TRACK);

        let left = self.left.clamp(0.0, 1.0) * bounds.width;
        let width = self.width.clamp(0.0, 1.0) * bounds.width;
        frame.fill_rectangle(
            Point::new(left, 0.0),
            iced::Size::new(width.min(bounds.width - left), bounds.height),
            style::ACCENT,
        );

        vec![frame.into_geometry()]
    }
}

/// Overlay placement converted to canvas-friendly f32 fractions.
#[derive(Debug, Clone, Copy)]
pub struct OverlayShape {
    pub center_x: f32,
    pub center_y: f32,
    pub radius_x: f32,
    pub radius_y: f32,
    pub intensity: f32,
}

/// Demo ellipse overlay for the frame view. Drawn over a dark stand-in for
/// the video surface; the shape is cosmetic placeholder output.
#[derive(Debug, Clone)]
pub struct FrameOverlay {
    pub shape: Option<OverlayShape>,
    pub caption: String,
}

impl<Message> canvas::Program<Message> for FrameOverlay {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND);

        if let Some(shape) = &self.shape {
            let center = Point::new(shape.center_x * bounds.width, shape.center_y * bounds.height);
            // Ellipse approximated by a circle on the mean radius; the
            // placement is cosmetic either way.
            let radius = (shape.radius_x * bounds.width + shape.radius_y * bounds.height) / 2.0;
            let blob = Path::new(|builder| builder.circle(center, radius));
            frame.fill(
                &blob,
                Color {
                    a: shape.intensity,
                    ..style::RED
                },
            );
        }

        caption(
            &mut frame,
            self.caption.clone(),
            Point::new(12.0, 10.0),
            14.0,
            Color::WHITE,
        );

        vec![frame.into_geometry()]
    }
}

/// Centered radial glow for the heatmap view, red fading through orange to
/// nothing, approximated with concentric rings.
#[derive(Debug, Clone)]
pub struct HeatmapGlow {
    pub intensity: f32,
    pub caption: String,
}

impl<Message> canvas::Program<Message> for HeatmapGlow {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND);

        if self.intensity > 0.0 {
            let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
            let outer = bounds.width / 2.0;
            let rings = 24;
            for ring in 0..rings {
                let t = ring as f32 / rings as f32;
                let radius = outer * (1.0 - t);
                // Red core shading toward orange at the rim, fading out.
                let green = 0.65 * (1.0 - t);
                let alpha = self.intensity * t.powi(2);
                let ring_path = Path::new(|builder| builder.circle(center, radius));
                frame.stroke(
                    &ring_path,
                    Stroke::default()
                        .with_width(outer / rings as f32 + 1.0)
                        .with_color(Color {
                            r: 1.0,
                            g: green,
                            b: 0.0,
                            a: alpha.clamp(0.0, 1.0),
                        }),
                );
            }
        }

        caption(
            &mut frame,
            self.caption.clone(),
            Point::new(12.0, 10.0),
            14.0,
            Color::WHITE,
        );

        vec![frame.into_geometry()]
    }
}
