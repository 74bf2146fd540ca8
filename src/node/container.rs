// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgvalues::{AspectRatio, FillRule, Length, Units, ViewBox};
use tiny_skia::{NonZeroRect, Path, Transform};

use super::{Node, NodeKind};
use crate::attributes::{AId, AttributeValue};
use crate::context::{RenderContext, ResolveContext};
use crate::geom;
use crate::units::{LengthContext, LengthType};

/// An `svg` element.
///
/// Establishes a new viewport.
#[allow(missing_docs)]
#[derive(Clone, Debug)]
pub struct Svg {
    pub x: Length,
    pub y: Length,
    pub width: Length,
    pub height: Length,
    pub view_box: Option<ViewBox>,
    pub aspect: AspectRatio,
}

impl Default for Svg {
    fn default() -> Self {
        Svg {
            x: Length::zero(),
            y: Length::zero(),
            width: Length::percent(100.0),
            height: Length::percent(100.0),
            view_box: None,
            aspect: AspectRatio::default(),
        }
    }
}

impl Svg {
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
            (AId::ViewBox, AttributeValue::ViewBox(v)) => self.view_box = Some(v),
            (AId::PreserveAspectRatio, AttributeValue::AspectRatio(v)) => self.aspect = v,
            (_, value) => return Err(value),
        }

        Ok(())
    }

    /// Returns the viewport transform and the new viewport size.
    fn viewport(&self, ctx: &LengthContext) -> Option<(Transform, (f64, f64))> {
        let w = ctx.resolve(self.width, LengthType::Horizontal);
        let h = ctx.resolve(self.height, LengthType::Vertical);
        if !(w > 0.0 && h > 0.0) {
            return None;
        }

        let x = ctx.resolve(self.x, LengthType::Horizontal);
        let y = ctx.resolve(self.y, LengthType::Vertical);
        let ts = Transform::from_translate(x as f32, y as f32);

        match self.view_box {
            Some(vb) if !vb.is_valid() => {
                log::warn!("An 'svg' element with an invalid viewBox is not rendered.");
                None
            }
            Some(vb) => {
                let vb_ts = geom::view_box_to_transform(vb, self.aspect, (w, h));
                Some((ts.pre_concat(vb_ts), (vb.w, vb.h)))
            }
            None => Some((ts, (w, h))),
        }
    }

    pub(crate) fn prepare_viewport(&self, ctx: &mut RenderContext) -> bool {
        match self.viewport(ctx.length()) {
            Some((ts, size)) => {
                ctx.concat(ts);
                ctx.set_view_port(size);
                true
            }
            None => false,
        }
    }

    fn children_path(node: &Node, ctx: &ResolveContext, size: (f64, f64)) -> Option<Path> {
        let mut ctx = ctx.clone();
        ctx.length_mut().set_view_port(size);
        node.children_path(&ctx)
    }

    /// Returns the children geometry in the viewport coordinate system.
    pub(crate) fn viewport_path(&self, node: &Node, ctx: &ResolveContext) -> Option<Path> {
        let (_, size) = self.viewport(ctx.length())?;
        Self::children_path(node, ctx, size)
    }

    pub(crate) fn content_path(&self, node: &Node, ctx: &ResolveContext) -> Option<Path> {
        let (ts, size) = self.viewport(ctx.length())?;

        let path = Self::children_path(node, ctx, size)?;
        if ts.is_identity() {
            Some(path)
        } else {
            path.transform(ts)
        }
    }
}

/// A `clipPath` element.
#[allow(missing_docs)]
#[derive(Clone, Default, Debug)]
pub struct ClipPathElement {
    pub units: Option<Units>,
}

impl ClipPathElement {
    pub(crate) fn set_attribute(
        &mut self,
        aid: AId,
        value: AttributeValue,
    ) -> Result<(), AttributeValue> {
        match (aid, value) {
            (AId::ClipPathUnits, AttributeValue::Units(v)) => {
                self.units = Some(v);
                Ok(())
            }
            (_, value) => Err(value),
        }
    }
}

impl Node {
    /// Returns the union of the clip path children geometry
    /// in the coordinate system of the clipped element.
    pub(crate) fn clip_content_path(
        &self,
        ctx: &ResolveContext,
        bbox: Option<NonZeroRect>,
    ) -> Option<Path> {
        let units = match self.kind {
            NodeKind::ClipPath(ref c) => c.units.unwrap_or(Units::UserSpaceOnUse),
            _ => return None,
        };

        let mut ctx = ctx.clone();
        if units == Units::ObjectBoundingBox {
            let dpi = ctx.length().dpi();
            *ctx.length_mut() = LengthContext::new((1.0, 1.0), dpi);
        }

        // Only shapes and `use` elements contribute.
        let children = self
            .children
            .iter()
            .filter(|c| c.is_shape() || matches!(c.kind, NodeKind::Use(_)))
            .filter_map(|c| c.as_path(&ctx));
        let mut path = crate::union_paths(children)?;

        if units == Units::ObjectBoundingBox {
            let bbox = match bbox {
                Some(v) => v,
                None => {
                    log::warn!("clipPath on zero-sized shapes is not allowed.");
                    return None;
                }
            };

            path = path.transform(Transform::from_bbox(bbox))?;
        }

        if !self.transform.is_default() {
            path = path.transform(geom::to_transform(self.transform))?;
        }

        Some(path)
    }

    /// Returns the fill rule used to clip.
    ///
    /// The first child's `clip-rule` wins over the element's own one.
    pub(crate) fn clip_rule(&self) -> Option<FillRule> {
        let declared = |n: &Node| n.presentation.clip_rule.filter(|r| *r != FillRule::Inherit);
        self.children
            .first()
            .and_then(|c| declared(c))
            .or_else(|| declared(self))
    }
}
