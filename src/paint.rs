// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Paints produced for shapes.

use std::rc::Rc;

use svgvalues::{Color, FillRule, LineCap, LineJoin};

/// A pre-rendered pattern tile.
#[derive(Debug)]
pub struct PatternTile {
    /// Tile content at device resolution.
    pub pixmap: tiny_skia::Pixmap,
    /// Maps the tile pixmap into user space.
    pub transform: tiny_skia::Transform,
    /// Tile opacity.
    pub opacity: f32,
}

/// Where paint colors come from.
#[derive(Clone, Debug)]
pub enum PaintSource {
    /// A solid color with opacity already applied.
    Color(tiny_skia::Color),
    /// A gradient.
    Shader(tiny_skia::Shader<'static>),
    /// A repeating tile.
    Pattern(Rc<PatternTile>),
}

/// How a paint is applied to geometry.
#[derive(Clone, Debug)]
pub enum PaintStyle {
    /// Fill with the given rule.
    Fill(tiny_skia::FillRule),
    /// Stroke with the given parameters.
    Stroke(tiny_skia::Stroke),
}

/// A concrete paint passed to a [`Canvas`](crate::Canvas).
#[derive(Clone, Debug)]
pub struct Paint {
    /// Paint source.
    pub source: PaintSource,
    /// Fill or stroke.
    pub style: PaintStyle,
    /// Anti-aliasing flag.
    pub anti_alias: bool,
}

impl Paint {
    /// Returns the solid color, if any.
    pub fn color(&self) -> Option<tiny_skia::Color> {
        match self.source {
            PaintSource::Color(c) => Some(c),
            _ => None,
        }
    }

    /// Checks that this is a fill paint.
    pub fn is_fill(&self) -> bool {
        matches!(self.style, PaintStyle::Fill(_))
    }

    /// Checks that this is a stroke paint.
    pub fn is_stroke(&self) -> bool {
        matches!(self.style, PaintStyle::Stroke(_))
    }
}

/// A gradient stop with its offset clamped to `[0, 1]`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GradientStop {
    /// Stop position.
    pub offset: f32,
    /// `stop-color`
    pub color: Color,
    /// `stop-opacity`
    pub opacity: f32,
}

/// Converts a resolved fill rule.
///
/// # Panics
///
/// When called with `FillRule::Inherit`. Inheritance must be resolved first.
pub fn to_fill_rule(rule: FillRule) -> tiny_skia::FillRule {
    match rule {
        FillRule::NonZero => tiny_skia::FillRule::Winding,
        FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        FillRule::Inherit => unreachable!("fill rule must be resolved before rendering"),
    }
}

pub(crate) fn to_line_cap(cap: LineCap) -> tiny_skia::LineCap {
    match cap {
        LineCap::Butt | LineCap::Inherit => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    }
}

pub(crate) fn to_line_join(join: LineJoin) -> tiny_skia::LineJoin {
    match join {
        LineJoin::Miter | LineJoin::Inherit => tiny_skia::LineJoin::Miter,
        LineJoin::Round => tiny_skia::LineJoin::Round,
        LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
    }
}

pub(crate) fn to_color(color: Color, opacity: f32) -> tiny_skia::Color {
    let alpha = (color.alpha() as f32 * opacity).round().clamp(0.0, 255.0) as u8;
    tiny_skia::Color::from_rgba8(color.red(), color.green(), color.blue(), alpha)
}
