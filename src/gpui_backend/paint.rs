use gpui::{
    App, BorderStyle, Bounds, ContentMask, Corners, Edges, PathBuilder, Pixels, TextRun, Window,
    font, point, px, quad,
};
use tracing::warn;

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{
    Color, LineStyle, MarkerStyle, RenderBackend, RenderList, TextStyle, project_polyline,
};
use crate::series::Sample;
use crate::transform::AffineTransform;

pub(crate) fn paint_list(list: &RenderList, window: &mut Window, cx: &mut App) {
    let mut painter = WindowPainter {
        window,
        cx,
        transform: AffineTransform::IDENTITY,
        clip_stack: Vec::new(),
        scratch: Vec::new(),
    };
    list.replay(&mut painter);
}

struct WindowPainter<'a> {
    window: &'a mut Window,
    cx: &'a mut App,
    transform: AffineTransform,
    clip_stack: Vec<ContentMask<Pixels>>,
    scratch: Vec<ScreenPoint>,
}

impl RenderBackend for WindowPainter<'_> {
    fn set_transform(&mut self, transform: &AffineTransform) {
        self.transform = *transform;
    }

    fn draw_polyline(&mut self, points: &[Sample], style: LineStyle) {
        project_polyline(points, &self.transform, &mut self.scratch);
        with_clip(self.window, &self.clip_stack, |window| {
            paint_polyline(window, &self.scratch, style);
        });
    }

    fn draw_point(&mut self, center: ScreenPoint, style: MarkerStyle) {
        with_clip(self.window, &self.clip_stack, |window| {
            paint_circle(window, center, style);
        });
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, style: LineStyle) {
        with_clip(self.window, &self.clip_stack, |window| {
            paint_polyline(window, &[from, to], style);
        });
    }

    fn draw_text(&mut self, position: ScreenPoint, text: &str, style: TextStyle) {
        let cx = &mut *self.cx;
        with_clip(self.window, &self.clip_stack, |window| {
            paint_text(window, cx, position, text, &style);
        });
    }

    fn push_clip(&mut self, rect: ScreenRect) {
        self.clip_stack.push(ContentMask {
            bounds: to_bounds(rect),
        });
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }
}

fn paint_polyline(window: &mut Window, points: &[ScreenPoint], style: LineStyle) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    if rest.is_empty() {
        return;
    }
    let mut builder = PathBuilder::stroke(px(style.width.max(0.5)));
    builder.move_to(point(px(first.x), px(first.y)));
    for pt in rest {
        builder.line_to(point(px(pt.x), px(pt.y)));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_circle(window: &mut Window, center: ScreenPoint, style: MarkerStyle) {
    if style.radius <= 0.0 {
        return;
    }
    let radius = style.radius;
    let bounds = Bounds::from_corners(
        point(px(center.x - radius), px(center.y - radius)),
        point(px(center.x + radius), px(center.y + radius)),
    );
    window.paint_quad(quad(
        bounds,
        Corners::all(px(radius)),
        to_rgba(style.color),
        Edges::all(px(0.0)),
        to_rgba(style.color),
        BorderStyle::default(),
    ));
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    position: ScreenPoint,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }
    let run = TextRun {
        len: text.len(),
        font: font(".SystemUIFont"),
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), px(style.size), &[run], None);
    let line_height = shaped.ascent + shaped.descent;
    let origin = point(px(position.x), px(position.y));
    if let Err(err) = shaped.paint(origin, line_height, window, cx) {
        warn!(%err, "failed to paint text");
    }
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(
        point(px(rect.min.x), px(rect.min.y)),
        point(px(rect.max.x), px(rect.max.y)),
    )
}

fn with_clip(window: &mut Window, stack: &[ContentMask<Pixels>], f: impl FnOnce(&mut Window)) {
    if let Some(mask) = stack.last() {
        window.with_content_mask(Some(mask.clone()), f);
    } else {
        f(window);
    }
}
