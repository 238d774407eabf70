// SPDX-License-Identifier: MPL-2.0
//! Animated spinner widget drawn on a Canvas.
//!
//! The widget is stateless: the caller owns the rotation angle and advances
//! it on each tick.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::PI;

/// Number of line segments approximating the arc.
const ARC_SEGMENTS: usize = 30;

/// Width of both the track and the arc.
const STROKE_WIDTH: f32 = 3.0;

/// Alpha of the full-circle track behind the arc.
const TRACK_ALPHA: f32 = 0.25;

/// Spinner made of a faint circular track and a half-circle arc.
pub struct AnimatedSpinner {
    cache: Cache,
    /// Rotation angle in radians.
    rotation: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
            size: sizing::ICON_XL,
        }
    }

    /// Overrides the default diameter.
    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

/// Points along a circular arc of `sweep` radians starting at `start`.
///
/// Angle zero is the top of the circle; angles grow clockwise.
fn arc_points(center: Point, radius: f32, start: f32, sweep: f32) -> Vec<Point> {
    // Screen coordinates point down, so a -90° offset puts zero at the top.
    let offset = start - PI / 2.0;

    (0..=ARC_SEGMENTS)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f32 / ARC_SEGMENTS as f32;
            let angle = offset + sweep * t;
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let radius = frame.width().min(frame.height()) / 2.0 - STROKE_WIDTH - 1.0;

                frame.stroke(
                    &Path::circle(center, radius),
                    Stroke::default().with_width(STROKE_WIDTH).with_color(Color {
                        a: TRACK_ALPHA,
                        ..self.color
                    }),
                );

                let points = arc_points(center, radius, self.rotation, PI);
                let arc = Path::new(|builder| {
                    let mut points = points.iter();
                    if let Some(first) = points.next() {
                        builder.move_to(*first);
                    }
                    for point in points {
                        builder.line_to(*point);
                    }
                });

                frame.stroke(
                    &arc,
                    Stroke::default()
                        .with_width(STROKE_WIDTH)
                        .with_color(self.color)
                        .with_line_cap(canvas::LineCap::Round),
                );
            });

        vec![geometry]
    }
}
