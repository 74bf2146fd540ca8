// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Geometry helpers shared by nodes and canvases.

use svgvalues::{Align, AspectRatio, ViewBox};
use tiny_skia::{Path, PathBuilder, Rect};

/// Cubic Bézier approximation factor for a quarter of a circle.
const KAPPA: f32 = 0.552_284_8;

pub(crate) fn to_transform(ts: svgvalues::Transform) -> tiny_skia::Transform {
    tiny_skia::Transform::from_row(
        ts.a as f32,
        ts.b as f32,
        ts.c as f32,
        ts.d as f32,
        ts.e as f32,
        ts.f as f32,
    )
}

/// Converts a `viewBox` into a transform that maps it onto a viewport of `size`.
pub(crate) fn view_box_to_transform(
    view_box: ViewBox,
    aspect: AspectRatio,
    size: (f64, f64),
) -> tiny_skia::Transform {
    let sx = size.0 / view_box.w;
    let sy = size.1 / view_box.h;

    let (sx, sy) = if aspect.align == Align::None {
        (sx, sy)
    } else {
        let s = if aspect.slice {
            sx.max(sy)
        } else {
            sx.min(sy)
        };

        (s, s)
    };

    let x = -view_box.x * sx;
    let y = -view_box.y * sy;
    let w = size.0 - view_box.w * sx;
    let h = size.1 - view_box.h * sy;

    let (tx, ty) = aligned_pos(aspect.align, x, y, w, h);
    tiny_skia::Transform::from_row(sx as f32, 0.0, 0.0, sy as f32, tx as f32, ty as f32)
}

fn aligned_pos(align: Align, x: f64, y: f64, w: f64, h: f64) -> (f64, f64) {
    match align {
        Align::None => (x, y),
        Align::XMinYMin => (x, y),
        Align::XMidYMin => (x + w / 2.0, y),
        Align::XMaxYMin => (x + w, y),
        Align::XMinYMid => (x, y + h / 2.0),
        Align::XMidYMid => (x + w / 2.0, y + h / 2.0),
        Align::XMaxYMid => (x + w, y + h / 2.0),
        Align::XMinYMax => (x, y + h),
        Align::XMidYMax => (x + w / 2.0, y + h),
        Align::XMaxYMax => (x + w, y + h),
    }
}

/// Builds a rectangle with elliptical corners.
///
/// Radii must be already clamped to the half of the rectangle size.
pub(crate) fn rrect_to_path(rect: Rect, rx: f32, ry: f32) -> Option<Path> {
    if rx <= 0.0 || ry <= 0.0 {
        return Some(PathBuilder::from_rect(rect));
    }

    let (x, y, w, h) = (rect.x(), rect.y(), rect.width(), rect.height());
    let kx = rx * KAPPA;
    let ky = ry * KAPPA;

    let mut builder = PathBuilder::new();
    builder.move_to(x + rx, y);

    builder.line_to(x + w - rx, y);
    builder.cubic_to(x + w - rx + kx, y, x + w, y + ry - ky, x + w, y + ry);

    builder.line_to(x + w, y + h - ry);
    builder.cubic_to(x + w, y + h - ry + ky, x + w - rx + kx, y + h, x + w - rx, y + h);

    builder.line_to(x + rx, y + h);
    builder.cubic_to(x + rx - kx, y + h, x, y + h - ry + ky, x, y + h - ry);

    builder.line_to(x, y + ry);
    builder.cubic_to(x, y + ry - ky, x + rx - kx, y, x + rx, y);

    builder.close();
    builder.finish()
}

pub(crate) fn line_to_path(x1: f32, y1: f32, x2: f32, y2: f32) -> Option<Path> {
    let mut builder = PathBuilder::new();
    builder.move_to(x1, y1);
    builder.line_to(x2, y2);
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_box_meet() {
        let ts = view_box_to_transform(
            ViewBox::new(0.0, 0.0, 10.0, 10.0),
            AspectRatio::default(),
            (200.0, 100.0),
        );
        assert_eq!(ts, tiny_skia::Transform::from_row(10.0, 0.0, 0.0, 10.0, 50.0, 0.0));
    }

    #[test]
    fn view_box_none() {
        let aspect = AspectRatio {
            align: Align::None,
            slice: false,
        };
        let ts = view_box_to_transform(ViewBox::new(10.0, 0.0, 10.0, 10.0), aspect, (200.0, 100.0));
        assert_eq!(ts, tiny_skia::Transform::from_row(20.0, 0.0, 0.0, 10.0, -200.0, 0.0));
    }

    #[test]
    fn view_box_slice() {
        let aspect = AspectRatio {
            align: Align::XMinYMin,
            slice: true,
        };
        let ts = view_box_to_transform(ViewBox::new(0.0, 0.0, 10.0, 10.0), aspect, (200.0, 100.0));
        assert_eq!(ts, tiny_skia::Transform::from_row(20.0, 0.0, 0.0, 20.0, 0.0, 0.0));
    }

    #[test]
    fn rrect_bounds() {
        let rect = Rect::from_xywh(10.0, 20.0, 30.0, 40.0).unwrap();
        let path = rrect_to_path(rect, 5.0, 5.0).unwrap();
        assert_eq!(path.bounds(), rect);
    }
}
