// SPDX-License-Identifier: MPL-2.0
//! Animated loading spinner drawn on a Canvas.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::PI;

/// Sweep of the rotating arc (three quarters of a turn).
const ARC_SWEEP: f32 = 1.5 * PI;
const STROKE_WIDTH: f32 = 3.5;
const ARC_SEGMENTS: usize = 24;

/// Indeterminate spinner; the caller advances `rotation` on a timer.
pub struct AnimatedSpinner {
    cache: Cache,
    rotation: f32, // Rotation angle in radians
    color: Color,
    diameter: f32,
}

impl AnimatedSpinner {
    /// Creates a spinner with the given color and rotation angle.
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
            diameter: sizing::SPINNER,
        }
    }

    /// Updates the rotation angle and invalidates the cache.
    #[must_use]
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self.cache.clear();
        self
    }

    /// Creates a Canvas widget from this spinner.
    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let diameter = self.diameter;
        Canvas::new(self)
            .width(Length::Fixed(diameter))
            .height(Length::Fixed(diameter))
            .into()
    }
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
                let radius = frame.width().min(frame.height()) / 2.0 - 4.0;

                // Faint full ring underneath the moving arc
                let ring = Path::circle(center, radius);
                frame.stroke(
                    &ring,
                    Stroke::default().with_width(STROKE_WIDTH).with_color(Color {
                        a: 0.2,
                        ..self.color
                    }),
                );

                // Arc starts at the top and sweeps clockwise
                let start_angle = self.rotation - PI / 2.0;

                let mut arc_path = canvas::path::Builder::new();
                arc_path.move_to(Point::new(
                    center.x + radius * start_angle.cos(),
                    center.y + radius * start_angle.sin(),
                ));

                // Approximate the arc with short line segments
                #[allow(clippy::cast_precision_loss)]
                for i in 1..=ARC_SEGMENTS {
                    let angle = start_angle + ARC_SWEEP * (i as f32 / ARC_SEGMENTS as f32);
                    arc_path.line_to(Point::new(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    ));
                }

                frame.stroke(
                    &arc_path.build(),
                    Stroke::default()
                        .with_width(STROKE_WIDTH)
                        .with_color(self.color)
                        .with_line_cap(canvas::LineCap::Round),
                );
            });

        vec![geometry]
    }
}
