// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::rc::Rc;

use svgvalues::{Length, Points};
use tiny_skia::{Path, PathBuilder, Rect};

use crate::attributes::{AId, AttributeValue};
use crate::context::RenderContext;
use crate::geom;
use crate::paint::Paint;
use crate::units::{LengthContext, LengthType};
use crate::Canvas;

/// Draws with the current fill paint, then with the stroke one.
fn draw<F>(ctx: &mut RenderContext, with_fill: bool, mut f: F)
where
    F: FnMut(&mut dyn Canvas, &Paint),
{
    let fill = if with_fill {
        ctx.presentation().fill.clone()
    } else {
        None
    };
    let stroke = ctx.presentation().stroke.clone();

    if let Some(ref paint) = fill {
        f(ctx.canvas(), paint);
    }

    if let Some(ref paint) = stroke {
        f(ctx.canvas(), paint);
    }
}

/// A `circle` element.
#[allow(missing_docs)]
#[derive(Clone, Default, Debug)]
pub struct Circle {
    pub cx: Length,
    pub cy: Length,
    pub r: Length,
}

impl Circle {
    pub(crate) fn set_attribute(
        &mut self,
        aid: AId,
        value: AttributeValue,
    ) -> Result<(), AttributeValue> {
        match (aid, value) {
            (AId::Cx, AttributeValue::Length(v)) => self.cx = v,
            (AId::Cy, AttributeValue::Length(v)) => self.cy = v,
            (AId::R, AttributeValue::Length(v)) => self.r = v,
            (_, value) => return Err(value),
        }

        Ok(())
    }

    fn resolve(&self, ctx: &LengthContext) -> Option<(f32, f32, f32)> {
        let r = ctx.resolve(self.r, LengthType::Other) as f32;
        if !(r > 0.0) {
            return None;
        }

        let cx = ctx.resolve(self.cx, LengthType::Horizontal) as f32;
        let cy = ctx.resolve(self.cy, LengthType::Vertical) as f32;
        Some((cx, cy, r))
    }

    pub(crate) fn to_path(&self, ctx: &LengthContext) -> Option<Path> {
        let (cx, cy, r) = self.resolve(ctx)?;
        PathBuilder::from_circle(cx, cy, r)
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext) {
        if let Some((cx, cy, r)) = self.resolve(ctx.length()) {
            draw(ctx, true, |canvas, paint| canvas.draw_circle(cx, cy, r, paint));
        }
    }
}

/// An `ellipse` element.
#[allow(missing_docs)]
#[derive(Clone, Default, Debug)]
pub struct Ellipse {
    pub cx: Length,
    pub cy: Length,
    pub rx: Length,
    pub ry: Length,
}

impl Ellipse {
    pub(crate) fn set_attribute(
        &mut self,
        aid: AId,
        value: AttributeValue,
    ) -> Result<(), AttributeValue> {
        match (aid, value) {
            (AId::Cx, AttributeValue::Length(v)) => self.cx = v,
            (AId::Cy, AttributeValue::Length(v)) => self.cy = v,
            (AId::Rx, AttributeValue::Length(v)) => self.rx = v,
            (AId::Ry, AttributeValue::Length(v)) => self.ry = v,
            (_, value) => return Err(value),
        }

        Ok(())
    }

    fn resolve(&self, ctx: &LengthContext) -> Option<Rect> {
        let rx = ctx.resolve(self.rx, LengthType::Horizontal) as f32;
        let ry = ctx.resolve(self.ry, LengthType::Vertical) as f32;
        if !(rx > 0.0 && ry > 0.0) {
            return None;
        }

        let cx = ctx.resolve(self.cx, LengthType::Horizontal) as f32;
        let cy = ctx.resolve(self.cy, LengthType::Vertical) as f32;
        Rect::from_xywh(cx - rx, cy - ry, rx * 2.0, ry * 2.0)
    }

    pub(crate) fn to_path(&self, ctx: &LengthContext) -> Option<Path> {
        PathBuilder::from_oval(self.resolve(ctx)?)
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext) {
        if let Some(rect) = self.resolve(ctx.length()) {
            draw(ctx, true, |canvas, paint| canvas.draw_oval(rect, paint));
        }
    }
}

/// A `rect` element.
#[allow(missing_docs)]
#[derive(Clone, Default, Debug)]
pub struct RectShape {
    pub x: Length,
    pub y: Length,
    pub width: Length,
    pub height: Length,
    pub rx: Option<Length>,
    pub ry: Option<Length>,
}

impl RectShape {
    pub(crate) fn set_attribute(
        &mut self,
        aid: AId,
        value: AttributeValue,
    ) -> Result<(), AttributeValue> {
        match (aid, value) {
            (AId::X, AttributeValue::Length(v)) => self.x = v,
            (AId::Y, AttributeValue::Length(v)) => self.y = v,
            (AId::Width, AttributeValue::Length(v)) => self.width = v,
            (AId::Height, AttributeValue::Length(v)) => self.height = v,
            // Negative radii are ignored.
            (AId::Rx, AttributeValue::Length(v)) => self.rx = Some(v).filter(|v| v.number >= 0.0),
            (AId::Ry, AttributeValue::Length(v)) => self.ry = Some(v).filter(|v| v.number >= 0.0),
            (_, value) => return Err(value),
        }

        Ok(())
    }

    fn resolve(&self, ctx: &LengthContext) -> Option<(Rect, f32, f32)> {
        let rect = ctx.resolve_rect(self.x, self.y, self.width, self.height)?;
        if !(rect.width() > 0.0 && rect.height() > 0.0) {
            return None;
        }

        let (rx, ry) = match (self.rx, self.ry) {
            (None, None) => (0.0, 0.0),
            (Some(rx), None) => {
                let rx = ctx.resolve(rx, LengthType::Horizontal);
                (rx, rx)
            }
            (None, Some(ry)) => {
                let ry = ctx.resolve(ry, LengthType::Vertical);
                (ry, ry)
            }
            (Some(rx), Some(ry)) => (
                ctx.resolve(rx, LengthType::Horizontal),
                ctx.resolve(ry, LengthType::Vertical),
            ),
        };

        // Clamp only after resolving.
        let rx = (rx as f32).min(rect.width() / 2.0);
        let ry = (ry as f32).min(rect.height() / 2.0);

        Some((rect, rx, ry))
    }

    pub(crate) fn to_path(&self, ctx: &LengthContext) -> Option<Path> {
        let (rect, rx, ry) = self.resolve(ctx)?;
        geom::rrect_to_path(rect, rx, ry)
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext) {
        if let Some((rect, rx, ry)) = self.resolve(ctx.length()) {
            draw(ctx, true, |canvas, paint| canvas.draw_rrect(rect, rx, ry, paint));
        }
    }
}

/// A `line` element.
#[allow(missing_docs)]
#[derive(Clone, Default, Debug)]
pub struct Line {
    pub x1: Length,
    pub y1: Length,
    pub x2: Length,
    pub y2: Length,
}

impl Line {
    pub(crate) fn set_attribute(
        &mut self,
        aid: AId,
        value: AttributeValue,
    ) -> Result<(), AttributeValue> {
        match (aid, value) {
            (AId::X1, AttributeValue::Length(v)) => self.x1 = v,
            (AId::Y1, AttributeValue::Length(v)) => self.y1 = v,
            (AId::X2, AttributeValue::Length(v)) => self.x2 = v,
            (AId::Y2, AttributeValue::Length(v)) => self.y2 = v,
            (_, value) => return Err(value),
        }

        Ok(())
    }

    fn resolve(&self, ctx: &LengthContext) -> (f32, f32, f32, f32) {
        (
            ctx.resolve(self.x1, LengthType::Horizontal) as f32,
            ctx.resolve(self.y1, LengthType::Vertical) as f32,
            ctx.resolve(self.x2, LengthType::Horizontal) as f32,
            ctx.resolve(self.y2, LengthType::Vertical) as f32,
        )
    }

    pub(crate) fn to_path(&self, ctx: &LengthContext) -> Option<Path> {
        let (x1, y1, x2, y2) = self.resolve(ctx);
        geom::line_to_path(x1, y1, x2, y2)
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext) {
        let (x1, y1, x2, y2) = self.resolve(ctx.length());
        // A line has no interior.
        draw(ctx, false, |canvas, paint| canvas.draw_line(x1, y1, x2, y2, paint));
    }
}

/// A `polygon` or `polyline` element.
#[allow(missing_docs)]
#[derive(Clone, Debug)]
pub struct Poly {
    pub points: Points,
    pub closed: bool,
}

impl Poly {
    pub(crate) fn new(closed: bool) -> Self {
        Poly {
            points: Points::default(),
            closed,
        }
    }

    pub(crate) fn set_attribute(
        &mut self,
        aid: AId,
        value: AttributeValue,
    ) -> Result<(), AttributeValue> {
        match (aid, value) {
            (AId::Points, AttributeValue::Points(v)) => self.points = v,
            (_, value) => return Err(value),
        }

        Ok(())
    }

    pub(crate) fn to_path(&self) -> Option<Path> {
        // 'polyline' and 'polygon' elements must contain at least 2 points.
        if self.points.0.len() < 2 {
            return None;
        }

        let mut builder = PathBuilder::new();
        for &(x, y) in &self.points.0 {
            if builder.is_empty() {
                builder.move_to(x as f32, y as f32);
            } else {
                builder.line_to(x as f32, y as f32);
            }
        }

        if self.closed {
            builder.close();
        }

        builder.finish()
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext) {
        if let Some(path) = self.to_path() {
            draw(ctx, true, |canvas, paint| canvas.draw_path(&path, paint));
        }
    }
}

/// A `path` element.
#[derive(Clone, Default, Debug)]
pub struct PathShape {
    /// Parsed `d` attribute.
    pub data: Option<Rc<Path>>,
}

impl PathShape {
    pub(crate) fn set_attribute(
        &mut self,
        aid: AId,
        value: AttributeValue,
    ) -> Result<(), AttributeValue> {
        match (aid, value) {
            (AId::D, AttributeValue::Path(v)) => self.data = Some(v),
            (_, value) => return Err(value),
        }

        Ok(())
    }

    pub(crate) fn to_path(&self) -> Option<Path> {
        self.data.as_deref().cloned()
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext) {
        if let Some(path) = self.data.clone() {
            draw(ctx, true, |canvas, paint| canvas.draw_path(&path, paint));
        }
    }
}
