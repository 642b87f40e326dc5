//! Rendering primitives and the backend interface.
//!
//! These types are backend-agnostic. The chart engine fills a [`RenderList`]
//! each frame and a backend (such as the GPUI backend) replays it.

use serde::{Deserialize, Serialize};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::series::Sample;
use crate::transform::AffineTransform;

/// RGBA color.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Scale the alpha channel by an opacity in `0..=1`.
    pub fn faded(self, opacity: f64) -> Self {
        Self {
            a: self.a * opacity.clamp(0.0, 1.0) as f32,
            ..self
        }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Filled circular marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Fill color.
    pub color: Color,
    /// Radius in pixels.
    pub radius: f32,
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
}

/// A single draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Start clipping to a rectangle.
    ClipRect(ScreenRect),
    /// End clipping.
    ClipEnd,
    /// Polyline through data-space samples, positioned by the frame transform.
    Polyline {
        /// Samples in time order.
        points: Vec<Sample>,
        /// Stroke styling.
        style: LineStyle,
    },
    /// Filled marker at a device position.
    Point {
        /// Marker center.
        center: ScreenPoint,
        /// Marker styling.
        style: MarkerStyle,
    },
    /// Straight line between device positions.
    Line {
        /// Line start.
        from: ScreenPoint,
        /// Line end.
        to: ScreenPoint,
        /// Stroke styling.
        style: LineStyle,
    },
    /// Text anchored at its top-left corner.
    Text {
        /// Text position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Receiver of replayed draw commands.
pub trait RenderBackend {
    /// Set the transform used for subsequent polylines.
    fn set_transform(&mut self, transform: &AffineTransform);
    /// Stroke a polyline through data-space samples.
    fn draw_polyline(&mut self, points: &[Sample], style: LineStyle);
    /// Fill a marker at a device position.
    fn draw_point(&mut self, center: ScreenPoint, style: MarkerStyle);
    /// Stroke a line between device positions.
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, style: LineStyle);
    /// Draw a text label. Backends without text support may ignore it.
    fn draw_text(&mut self, _position: ScreenPoint, _text: &str, _style: TextStyle) {}
    /// Push a clip rectangle.
    fn push_clip(&mut self, _rect: ScreenRect) {}
    /// Pop the last clip rectangle.
    fn pop_clip(&mut self) {}
}

/// Commands for one frame plus the data-to-device transform.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderList {
    transform: AffineTransform,
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty render list using the given transform.
    pub fn with_transform(transform: AffineTransform) -> Self {
        Self {
            transform,
            commands: Vec::new(),
        }
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Access the frame transform.
    pub fn transform(&self) -> &AffineTransform {
        &self.transform
    }

    /// Whether the list draws nothing.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay every command into a backend, in order.
    pub fn replay(&self, backend: &mut impl RenderBackend) {
        backend.set_transform(&self.transform);
        for command in &self.commands {
            match command {
                RenderCommand::ClipRect(rect) => backend.push_clip(*rect),
                RenderCommand::ClipEnd => backend.pop_clip(),
                RenderCommand::Polyline { points, style } => backend.draw_polyline(points, *style),
                RenderCommand::Point { center, style } => backend.draw_point(*center, *style),
                RenderCommand::Line { from, to, style } => backend.draw_line(*from, *to, *style),
                RenderCommand::Text {
                    position,
                    text,
                    style,
                } => backend.draw_text(*position, text, *style),
            }
        }
    }
}

/// Project data-space samples into device space.
///
/// Used by backends that cannot apply an affine transform themselves.
pub fn project_polyline(points: &[Sample], transform: &AffineTransform, out: &mut Vec<ScreenPoint>) {
    out.clear();
    out.extend(
        points
            .iter()
            .map(|sample| transform.apply(sample.time, sample.value)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        projected: Vec<ScreenPoint>,
        transform: AffineTransform,
    }

    impl RenderBackend for Recorder {
        fn set_transform(&mut self, transform: &AffineTransform) {
            self.transform = *transform;
            self.calls.push("transform");
        }

        fn draw_polyline(&mut self, points: &[Sample], _style: LineStyle) {
            project_polyline(points, &self.transform, &mut self.projected);
            self.calls.push("polyline");
        }

        fn draw_point(&mut self, _center: ScreenPoint, _style: MarkerStyle) {
            self.calls.push("point");
        }

        fn draw_line(&mut self, _from: ScreenPoint, _to: ScreenPoint, _style: LineStyle) {
            self.calls.push("line");
        }

        fn push_clip(&mut self, _rect: ScreenRect) {
            self.calls.push("clip");
        }

        fn pop_clip(&mut self) {
            self.calls.push("unclip");
        }
    }

    #[test]
    fn replay_preserves_order_and_applies_transform() {
        let transform = AffineTransform {
            a: 2.0,
            d: -1.0,
            ty: 10.0,
            ..AffineTransform::IDENTITY
        };
        let mut list = RenderList::with_transform(transform);
        let rect = ScreenRect::from_origin_size(0.0, 0.0, 10.0, 10.0);
        list.push(RenderCommand::ClipRect(rect));
        list.push(RenderCommand::Polyline {
            points: vec![Sample::new(1, 2.0), Sample::new(3, 4.0)],
            style: LineStyle::default(),
        });
        list.push(RenderCommand::ClipEnd);
        list.push(RenderCommand::Line {
            from: ScreenPoint::new(0.0, 0.0),
            to: ScreenPoint::new(1.0, 1.0),
            style: LineStyle::default(),
        });

        let mut recorder = Recorder::default();
        list.replay(&mut recorder);
        assert_eq!(
            recorder.calls,
            ["transform", "clip", "polyline", "unclip", "line"]
        );
        assert_eq!(
            recorder.projected,
            [ScreenPoint::new(2.0, 8.0), ScreenPoint::new(6.0, 6.0)]
        );
    }

    #[test]
    fn faded_scales_alpha() {
        let color = Color::new(1.0, 0.5, 0.0, 0.8).faded(0.5);
        assert!((color.a - 0.4).abs() < 1e-6);
        assert_eq!(Color::WHITE.faded(2.0).a, 1.0);
    }
}
