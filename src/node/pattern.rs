// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::rc::Rc;

use svgvalues::{AspectRatio, Length, Units, ViewBox};
use tiny_skia::{NonZeroRect, Transform};

use super::{Node, NodeKind};
use crate::attributes::{AId, AttributeValue};
use crate::canvas::PixmapCanvas;
use crate::context::{RenderContext, ResolveContext};
use crate::geom;
use crate::paint::{PaintSource, PatternTile};
use crate::units::LengthContext;
use crate::OptionLog;

/// A `pattern` element.
///
/// Unset attributes and content are resolved via `href`.
#[allow(missing_docs)]
#[derive(Clone, Default, Debug)]
pub struct Pattern {
    pub href: Option<String>,
    pub x: Option<Length>,
    pub y: Option<Length>,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub transform: Option<svgvalues::Transform>,
    pub units: Option<Units>,
    pub content_units: Option<Units>,
    pub view_box: Option<ViewBox>,
    pub aspect: Option<AspectRatio>,
}

/// A pattern with its `href` chain resolved.
#[allow(missing_docs)]
#[derive(Clone, Debug)]
pub struct ResolvedPattern {
    pub x: Length,
    pub y: Length,
    pub width: Length,
    pub height: Length,
    pub transform: svgvalues::Transform,
    pub units: Units,
    pub content_units: Units,
    pub view_box: Option<ViewBox>,
    pub aspect: AspectRatio,
    pub content: Vec<Rc<Node>>,
}

fn fill<T: Clone>(dest: &mut Option<T>, src: &Option<T>) {
    if dest.is_none() {
        *dest = src.clone();
    }
}

impl Pattern {
    pub(crate) fn set_attribute(
        &mut self,
        aid: AId,
        value: AttributeValue,
    ) -> Result<(), AttributeValue> {
        match (aid, value) {
            (AId::Href, AttributeValue::Link(v)) => self.href = Some(v),
            (AId::X, AttributeValue::Length(v)) => self.x = Some(v),
            (AId::Y, AttributeValue::Length(v)) => self.y = Some(v),
            (AId::Width, AttributeValue::Length(v)) => self.width = Some(v),
            (AId::Height, AttributeValue::Length(v)) => self.height = Some(v),
            (AId::PatternTransform, AttributeValue::Transform(v)) => self.transform = Some(v),
            (AId::PatternUnits, AttributeValue::Units(v)) => self.units = Some(v),
            (AId::PatternContentUnits, AttributeValue::Units(v)) => self.content_units = Some(v),
            (AId::ViewBox, AttributeValue::ViewBox(v)) => self.view_box = Some(v),
            (AId::PreserveAspectRatio, AttributeValue::AspectRatio(v)) => self.aspect = Some(v),
            (_, value) => return Err(value),
        }

        Ok(())
    }

    pub(crate) fn as_paint(
        &self,
        node: &Node,
        ctx: &ResolveContext,
        ts: Transform,
        bbox: Option<NonZeroRect>,
        opacity: f32,
    ) -> Option<PaintSource> {
        let pattern = node.resolve_pattern(ctx)?;
        if pattern.content.is_empty() {
            return None;
        }

        let rect = pattern.tile_rect(ctx.length(), bbox)?;
        let pattern_ts = geom::to_transform(pattern.transform);

        let (sx, sy) = ts.pre_concat(pattern_ts).get_scale();
        if !(sx > 0.0 && sy > 0.0) {
            return None;
        }

        let size = tiny_skia::IntSize::from_wh(
            (rect.width() * sx).round() as u32,
            (rect.height() * sy).round() as u32,
        )
        .log_none(|| log::warn!("Pattern tile is too small. Skipped."))?;
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;

        let mut content_ts = Transform::from_scale(sx, sy);
        let mut view_port = ctx.length().view_port();
        if let Some(vb) = pattern.view_box.filter(|vb| vb.is_valid()) {
            let size = (rect.width() as f64, rect.height() as f64);
            content_ts = content_ts.pre_concat(geom::view_box_to_transform(vb, pattern.aspect, size));
            view_port = (vb.w, vb.h);
        } else if pattern.content_units == Units::ObjectBoundingBox {
            let bbox = bbox?;
            content_ts = content_ts.pre_scale(bbox.width(), bbox.height());
        }

        {
            let mut canvas = PixmapCanvas::new(&mut pixmap);
            let mut resolve = ctx.clone();
            resolve.length_mut().set_view_port(view_port);

            let mut rctx = RenderContext::with_resolve(&mut canvas, resolve);
            rctx.concat(content_ts);
            for child in &pattern.content {
                child.render(&mut rctx);
            }
        }

        let transform = pattern_ts
            .pre_translate(rect.x(), rect.y())
            .pre_scale(1.0 / sx, 1.0 / sy);

        Some(PaintSource::Pattern(Rc::new(PatternTile {
            pixmap,
            transform,
            opacity,
        })))
    }
}

impl ResolvedPattern {
    /// Returns the tile rectangle in user space.
    fn tile_rect(&self, ctx: &LengthContext, bbox: Option<NonZeroRect>) -> Option<NonZeroRect> {
        if self.units == Units::ObjectBoundingBox {
            let bbox = bbox.log_none(|| log::warn!("Pattern on zero-sized shapes is not allowed."))?;
            let unit = LengthContext::new((1.0, 1.0), ctx.dpi());
            let r = unit.resolve_rect(self.x, self.y, self.width, self.height)?;
            NonZeroRect::from_xywh(
                bbox.x() + r.x() * bbox.width(),
                bbox.y() + r.y() * bbox.height(),
                r.width() * bbox.width(),
                r.height() * bbox.height(),
            )
        } else {
            ctx.resolve_rect(self.x, self.y, self.width, self.height)?
                .to_non_zero_rect()
        }
    }
}

impl Node {
    /// Resolves pattern attributes and content through the `href` chain.
    ///
    /// Each attribute is taken from the first pattern in the chain that sets it.
    /// Content is taken from the first pattern that has children.
    /// Returns `None` when the node is not a pattern.
    pub fn resolve_pattern(&self, ctx: &ResolveContext) -> Option<ResolvedPattern> {
        if !matches!(self.kind, NodeKind::Pattern(_)) {
            return None;
        }

        let mut resolved = Pattern::default();
        let mut content: Option<Vec<Rc<Node>>> = None;

        let mut ctx = ctx.clone();
        let mut link: Option<Rc<Node>> = None;
        loop {
            let node = link.as_deref().unwrap_or(self);
            let p = match node.kind {
                NodeKind::Pattern(ref p) => p,
                _ => break,
            };

            fill(&mut resolved.x, &p.x);
            fill(&mut resolved.y, &p.y);
            fill(&mut resolved.width, &p.width);
            fill(&mut resolved.height, &p.height);
            fill(&mut resolved.transform, &p.transform);
            fill(&mut resolved.units, &p.units);
            fill(&mut resolved.content_units, &p.content_units);
            fill(&mut resolved.view_box, &p.view_box);
            fill(&mut resolved.aspect, &p.aspect);

            if content.is_none() && !node.children.is_empty() {
                content = Some(node.children.clone());
            }

            let done = resolved.x.is_some()
                && resolved.y.is_some()
                && resolved.width.is_some()
                && resolved.height.is_some()
                && resolved.transform.is_some()
                && content.is_some();
            if done {
                break;
            }

            let next = match p.href.as_ref().and_then(|href| ctx.find_node_by_id(href)) {
                Some(v) => v,
                None => break,
            };

            ctx = match ctx.enter(&next) {
                Some(v) => v,
                None => break,
            };

            link = Some(next);
        }

        Some(ResolvedPattern {
            x: resolved.x.unwrap_or_default(),
            y: resolved.y.unwrap_or_default(),
            width: resolved.width.unwrap_or_default(),
            height: resolved.height.unwrap_or_default(),
            transform: resolved.transform.unwrap_or_default(),
            units: resolved.units.unwrap_or(Units::ObjectBoundingBox),
            content_units: resolved.content_units.unwrap_or(Units::UserSpaceOnUse),
            view_box: resolved.view_box,
            aspect: resolved.aspect.unwrap_or_default(),
            content: content.unwrap_or_default(),
        })
    }
}
