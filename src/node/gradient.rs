// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::rc::Rc;

use svgvalues::{Color, Length, SpreadMethod, Units};
use tiny_skia::{NonZeroRect, Point, Transform};

use super::{Node, NodeKind};
use crate::attributes::{AId, AttributeValue};
use crate::context::ResolveContext;
use crate::geom;
use crate::paint::{self, GradientStop, PaintSource};
use crate::units::{LengthContext, LengthType};
use crate::OptionLog;

/// Attributes shared by all gradients.
///
/// Unset attributes are resolved via `href`.
#[allow(missing_docs)]
#[derive(Clone, Default, Debug)]
pub struct BaseGradient {
    pub href: Option<String>,
    pub units: Option<Units>,
    pub transform: Option<svgvalues::Transform>,
    pub spread_method: Option<SpreadMethod>,
}

impl BaseGradient {
    fn set_attribute(&mut self, aid: AId, value: AttributeValue) -> Result<(), AttributeValue> {
        match (aid, value) {
            (AId::Href, AttributeValue::Link(v)) => self.href = Some(v),
            (AId::GradientUnits, AttributeValue::Units(v)) => self.units = Some(v),
            (AId::GradientTransform, AttributeValue::Transform(v)) => self.transform = Some(v),
            (AId::SpreadMethod, AttributeValue::SpreadMethod(v)) => self.spread_method = Some(v),
            (_, value) => return Err(value),
        }

        Ok(())
    }
}

/// A `linearGradient` element.
#[allow(missing_docs)]
#[derive(Clone, Default, Debug)]
pub struct LinearGradient {
    pub base: BaseGradient,
    pub x1: Option<Length>,
    pub y1: Option<Length>,
    pub x2: Option<Length>,
    pub y2: Option<Length>,
}

/// A `radialGradient` element.
#[allow(missing_docs)]
#[derive(Clone, Default, Debug)]
pub struct RadialGradient {
    pub base: BaseGradient,
    pub cx: Option<Length>,
    pub cy: Option<Length>,
    pub r: Option<Length>,
    pub fx: Option<Length>,
    pub fy: Option<Length>,
}

/// A `stop` element.
#[allow(missing_docs)]
#[derive(Clone, Debug)]
pub struct Stop {
    pub offset: Length,
    pub color: Color,
    pub opacity: f64,
}

impl Default for Stop {
    fn default() -> Self {
        Stop {
            offset: Length::zero(),
            color: Color::black(),
            opacity: 1.0,
        }
    }
}

impl Stop {
    pub(crate) fn set_attribute(
        &mut self,
        aid: AId,
        value: AttributeValue,
    ) -> Result<(), AttributeValue> {
        match (aid, value) {
            (AId::Offset, AttributeValue::Length(v)) => self.offset = v,
            (AId::StopColor, AttributeValue::Color(v)) => self.color = v,
            (AId::StopOpacity, AttributeValue::Number(v)) => self.opacity = v,
            (_, value) => return Err(value),
        }

        Ok(())
    }

    fn resolve(&self, dpi: f64) -> GradientStop {
        // Percentages are fractions of one.
        let ctx = LengthContext::new((1.0, 1.0), dpi);
        let offset = ctx.resolve(self.offset, LengthType::Other) as f32;
        GradientStop {
            offset: offset.clamp(0.0, 1.0),
            color: self.color,
            opacity: self.opacity as f32,
        }
    }
}

fn gradient_base(node: &Node) -> Option<&BaseGradient> {
    match node.kind {
        NodeKind::LinearGradient(ref g) => Some(&g.base),
        NodeKind::RadialGradient(ref g) => Some(&g.base),
        _ => None,
    }
}

fn next_link(node: &Node, ctx: &ResolveContext) -> Option<Rc<Node>> {
    let href = gradient_base(node)?.href.as_ref()?;
    ctx.find_node_by_id(href)
        .filter(|n| gradient_base(n).is_some())
        .log_none(|| {
            log::warn!(
                "A gradient cannot reference '{}' via 'xlink:href'.",
                href
            )
        })
}

/// Returns the first value `f` finds in the `href` chain starting at `node`.
fn resolve_attr<T, F>(node: &Node, ctx: &ResolveContext, f: F) -> Option<T>
where
    F: Fn(&Node) -> Option<T>,
{
    if let Some(v) = f(node) {
        return Some(v);
    }

    let mut ctx = ctx.clone();
    let mut link = next_link(node, &ctx)?;
    loop {
        ctx = ctx.enter(&link)?;
        if let Some(v) = f(&link) {
            return Some(v);
        }

        link = next_link(&link, &ctx)?;
    }
}

fn linear_attr(
    node: &Node,
    ctx: &ResolveContext,
    f: fn(&LinearGradient) -> Option<Length>,
) -> Option<Length> {
    resolve_attr(node, ctx, |n| match n.kind {
        NodeKind::LinearGradient(ref g) => f(g),
        _ => None,
    })
}

fn radial_attr(
    node: &Node,
    ctx: &ResolveContext,
    f: fn(&RadialGradient) -> Option<Length>,
) -> Option<Length> {
    resolve_attr(node, ctx, |n| match n.kind {
        NodeKind::RadialGradient(ref g) => f(g),
        _ => None,
    })
}

impl Node {
    /// Collects gradient stops.
    ///
    /// When the gradient has no stops, they are taken from
    /// the gradient referenced via `href`.
    pub fn gradient_stops(&self, ctx: &ResolveContext) -> Vec<GradientStop> {
        let dpi = ctx.length().dpi();
        resolve_attr(self, ctx, |n| {
            let stops: Vec<_> = n
                .children
                .iter()
                .filter_map(|c| match c.kind {
                    NodeKind::Stop(ref s) => Some(s.resolve(dpi)),
                    _ => None,
                })
                .collect();

            if stops.is_empty() {
                None
            } else {
                Some(stops)
            }
        })
        .unwrap_or_default()
    }
}

/// Gradient attributes shared by both kinds, with the `href` chain resolved.
struct ResolvedBase {
    units: Units,
    transform: Transform,
    mode: tiny_skia::SpreadMode,
    length: LengthContext,
}

impl ResolvedBase {
    fn new(node: &Node, ctx: &ResolveContext) -> Self {
        let units = resolve_attr(node, ctx, |n| gradient_base(n)?.units)
            .unwrap_or(Units::ObjectBoundingBox);
        let transform = resolve_attr(node, ctx, |n| gradient_base(n)?.transform)
            .unwrap_or_default();
        let spread = resolve_attr(node, ctx, |n| gradient_base(n)?.spread_method)
            .unwrap_or(SpreadMethod::Pad);

        let mode = match spread {
            SpreadMethod::Pad => tiny_skia::SpreadMode::Pad,
            SpreadMethod::Reflect => tiny_skia::SpreadMode::Reflect,
            SpreadMethod::Repeat => tiny_skia::SpreadMode::Repeat,
        };

        let length = if units == Units::ObjectBoundingBox {
            LengthContext::new((1.0, 1.0), ctx.length().dpi())
        } else {
            *ctx.length()
        };

        ResolvedBase {
            units,
            transform: geom::to_transform(transform),
            mode,
            length,
        }
    }

    fn shader_transform(&self, bbox: Option<NonZeroRect>) -> Option<Transform> {
        if self.units == Units::ObjectBoundingBox {
            let bbox =
                bbox.log_none(|| log::warn!("Gradient on zero-sized shapes is not allowed."))?;
            Some(Transform::from_bbox(bbox).pre_concat(self.transform))
        } else {
            Some(self.transform)
        }
    }
}

fn convert_stops(stops: &[GradientStop], opacity: f32) -> Vec<tiny_skia::GradientStop> {
    let mut prev = 0.0;
    stops
        .iter()
        .map(|stop| {
            // Offsets must not decrease.
            let offset = stop.offset.max(prev);
            prev = offset;
            tiny_skia::GradientStop::new(offset, paint::to_color(stop.color, stop.opacity * opacity))
        })
        .collect()
}

fn stop_to_color(stop: Option<&GradientStop>, opacity: f32) -> Option<PaintSource> {
    let stop = stop?;
    Some(PaintSource::Color(paint::to_color(stop.color, stop.opacity * opacity)))
}

impl LinearGradient {
    pub(crate) fn set_attribute(
        &mut self,
        aid: AId,
        value: AttributeValue,
    ) -> Result<(), AttributeValue> {
        match (aid, value) {
            (AId::X1, AttributeValue::Length(v)) => self.x1 = Some(v),
            (AId::Y1, AttributeValue::Length(v)) => self.y1 = Some(v),
            (AId::X2, AttributeValue::Length(v)) => self.x2 = Some(v),
            (AId::Y2, AttributeValue::Length(v)) => self.y2 = Some(v),
            (aid, value) => return self.base.set_attribute(aid, value),
        }

        Ok(())
    }

    pub(crate) fn as_paint(
        &self,
        node: &Node,
        ctx: &ResolveContext,
        bbox: Option<NonZeroRect>,
        opacity: f32,
    ) -> Option<PaintSource> {
        let stops = node.gradient_stops(ctx);
        if stops.len() < 2 {
            return stop_to_color(stops.first(), opacity);
        }

        let base = ResolvedBase::new(node, ctx);
        let coord = |f: fn(&LinearGradient) -> Option<Length>, def: Length, kind| {
            let len = linear_attr(node, ctx, f).unwrap_or(def);
            base.length.resolve(len, kind) as f32
        };

        let x1 = coord(|g| g.x1, Length::zero(), LengthType::Horizontal);
        let y1 = coord(|g| g.y1, Length::zero(), LengthType::Vertical);
        let x2 = coord(|g| g.x2, Length::percent(100.0), LengthType::Horizontal);
        let y2 = coord(|g| g.y2, Length::zero(), LengthType::Vertical);

        let shader = tiny_skia::LinearGradient::new(
            Point::from_xy(x1, y1),
            Point::from_xy(x2, y2),
            convert_stops(&stops, opacity),
            base.mode,
            base.shader_transform(bbox)?,
        )?;

        Some(PaintSource::Shader(shader))
    }
}

impl RadialGradient {
    pub(crate) fn set_attribute(
        &mut self,
        aid: AId,
        value: AttributeValue,
    ) -> Result<(), AttributeValue> {
        match (aid, value) {
            (AId::Cx, AttributeValue::Length(v)) => self.cx = Some(v),
            (AId::Cy, AttributeValue::Length(v)) => self.cy = Some(v),
            (AId::R, AttributeValue::Length(v)) => self.r = Some(v),
            (AId::Fx, AttributeValue::Length(v)) => self.fx = Some(v),
            (AId::Fy, AttributeValue::Length(v)) => self.fy = Some(v),
            (aid, value) => return self.base.set_attribute(aid, value),
        }

        Ok(())
    }

    pub(crate) fn as_paint(
        &self,
        node: &Node,
        ctx: &ResolveContext,
        bbox: Option<NonZeroRect>,
        opacity: f32,
    ) -> Option<PaintSource> {
        let stops = node.gradient_stops(ctx);
        if stops.len() < 2 {
            return stop_to_color(stops.first(), opacity);
        }

        let base = ResolvedBase::new(node, ctx);
        let attr = |f: fn(&RadialGradient) -> Option<Length>| radial_attr(node, ctx, f);
        let half = Length::percent(50.0);

        let r = base.length.resolve(attr(|g| g.r).unwrap_or(half), LengthType::Other) as f32;

        // 'A value of zero will cause the area to be painted as a single color
        // using the color and opacity of the last gradient stop.'
        if !(r > 0.0) {
            return stop_to_color(stops.last(), opacity);
        }

        let cx = attr(|g| g.cx).unwrap_or(half);
        let cy = attr(|g| g.cy).unwrap_or(half);
        // The focal point defaults to the center.
        let fx = attr(|g| g.fx).unwrap_or(cx);
        let fy = attr(|g| g.fy).unwrap_or(cy);

        let center = Point::from_xy(
            base.length.resolve(cx, LengthType::Horizontal) as f32,
            base.length.resolve(cy, LengthType::Vertical) as f32,
        );
        let focal = Point::from_xy(
            base.length.resolve(fx, LengthType::Horizontal) as f32,
            base.length.resolve(fy, LengthType::Vertical) as f32,
        );

        let shader = tiny_skia::RadialGradient::new(
            focal,
            center,
            r,
            convert_stops(&stops, opacity),
            base.mode,
            base.shader_transform(bbox)?,
        )?;

        Some(PaintSource::Shader(shader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::dispatch;
    use crate::node::{ElementId, IdMap};

    fn stop(offset: &str, color: &str) -> Rc<Node> {
        let mut node = Node::new(ElementId::Stop);
        dispatch(&mut node, "offset", offset);
        dispatch(&mut node, "stop-color", color);
        Rc::new(node)
    }

    fn ctx(ids: &IdMap) -> ResolveContext {
        ResolveContext::new(ids, LengthContext::new((100.0, 100.0), 96.0))
    }

    #[test]
    fn own_stops() {
        let mut g = Node::new(ElementId::LinearGradient);
        g.append_child(stop("0", "red"));
        g.append_child(stop("50%", "green"));
        g.append_child(stop("2", "blue"));

        let ids = IdMap::new();
        let stops = g.gradient_stops(&ctx(&ids));
        let offsets: Vec<_> = stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
        assert_eq!(stops[1].color, Color::new_rgb(0, 128, 0));
    }

    #[test]
    fn stops_keep_order() {
        let mut g = Node::new(ElementId::RadialGradient);
        g.append_child(stop("0.8", "red"));
        g.append_child(stop("0.2", "blue"));

        let ids = IdMap::new();
        let stops = g.gradient_stops(&ctx(&ids));
        assert_eq!(stops[0].offset, 0.8);
        assert_eq!(stops[1].offset, 0.2);

        let converted = convert_stops(&stops, 1.0);
        assert_eq!(converted.len(), 2);
    }

    #[test]
    fn stops_via_href_of_other_kind() {
        let mut radial = Node::new(ElementId::RadialGradient);
        radial.append_child(stop("0", "red"));
        radial.append_child(stop("1", "blue"));

        let mut ids = IdMap::new();
        ids.insert("r".to_string(), Rc::new(radial));

        let mut linear = Node::new(ElementId::LinearGradient);
        dispatch(&mut linear, "href", "#r");
        assert_eq!(linear.gradient_stops(&ctx(&ids)).len(), 2);
    }

    #[test]
    fn href_to_non_gradient() {
        let mut ids = IdMap::new();
        ids.insert("rect".to_string(), Rc::new(Node::new(ElementId::Rect)));

        let mut linear = Node::new(ElementId::LinearGradient);
        dispatch(&mut linear, "href", "#rect");
        assert!(linear.gradient_stops(&ctx(&ids)).is_empty());
    }

    #[test]
    fn units_are_inherited() {
        let mut a = Node::new(ElementId::LinearGradient);
        dispatch(&mut a, "gradientUnits", "userSpaceOnUse");
        dispatch(&mut a, "spreadMethod", "repeat");
        let mut ids = IdMap::new();
        ids.insert("a".to_string(), Rc::new(a));

        let mut b = Node::new(ElementId::LinearGradient);
        dispatch(&mut b, "href", "#a");
        let base = ResolvedBase::new(&b, &ctx(&ids));
        assert_eq!(base.units, Units::UserSpaceOnUse);
        assert_eq!(base.mode, tiny_skia::SpreadMode::Repeat);
        assert_eq!(base.length.view_port(), (100.0, 100.0));
    }

    #[test]
    fn single_stop_is_a_color() {
        let mut g = Node::new(ElementId::LinearGradient);
        g.append_child(stop("0", "red"));
        let ids = IdMap::new();
        let paint = g.as_paint(&ctx(&ids), Transform::identity(), None, 1.0);
        match paint {
            Some(PaintSource::Color(c)) => assert_eq!(c, tiny_skia::Color::from_rgba8(255, 0, 0, 255)),
            _ => panic!("expected a color"),
        }
    }

    #[test]
    fn bbox_units_need_bbox() {
        let mut g = Node::new(ElementId::LinearGradient);
        g.append_child(stop("0", "red"));
        g.append_child(stop("1", "blue"));
        let ids = IdMap::new();
        assert!(g.as_paint(&ctx(&ids), Transform::identity(), None, 1.0).is_none());

        let bbox = NonZeroRect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let paint = g.as_paint(&ctx(&ids), Transform::identity(), bbox, 1.0);
        assert!(matches!(paint, Some(PaintSource::Shader(_))));
    }
}
