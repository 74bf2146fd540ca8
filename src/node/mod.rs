// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The scene graph.

use std::collections::HashMap;
use std::rc::Rc;

use tiny_skia::{NonZeroRect, Path, Transform};

use crate::attributes::{AId, AttributeValue};
use crate::context::{PresentationTarget, RenderContext, ResolveContext};
use crate::geom;
use crate::paint::PaintSource;
use crate::presentation::PresentationAttributes;

mod container;
mod gradient;
mod pattern;
mod shapes;
mod use_node;

pub use self::container::{ClipPathElement, Svg};
pub use self::gradient::{BaseGradient, LinearGradient, RadialGradient, Stop};
pub use self::pattern::{Pattern, ResolvedPattern};
pub use self::shapes::{Circle, Ellipse, Line, PathShape, Poly, RectShape};
pub use self::use_node::Use;

/// Nodes indexed by their `id` attribute.
pub type IdMap = HashMap<String, Rc<Node>>;

/// Supported elements.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ElementId {
    Circle,
    ClipPath,
    Defs,
    Ellipse,
    G,
    Line,
    LinearGradient,
    Path,
    Pattern,
    Polygon,
    Polyline,
    RadialGradient,
    Rect,
    Stop,
    Svg,
    Text,
    Use,
}

impl ElementId {
    /// Looks up an element by its tag name.
    pub fn from_str(name: &str) -> Option<ElementId> {
        Some(match name {
            "circle" => ElementId::Circle,
            "clipPath" => ElementId::ClipPath,
            "defs" => ElementId::Defs,
            "ellipse" => ElementId::Ellipse,
            "g" => ElementId::G,
            "line" => ElementId::Line,
            "linearGradient" => ElementId::LinearGradient,
            "path" => ElementId::Path,
            "pattern" => ElementId::Pattern,
            "polygon" => ElementId::Polygon,
            "polyline" => ElementId::Polyline,
            "radialGradient" => ElementId::RadialGradient,
            "rect" => ElementId::Rect,
            "stop" => ElementId::Stop,
            "svg" => ElementId::Svg,
            "text" => ElementId::Text,
            "use" => ElementId::Use,
            _ => return None,
        })
    }

    /// Returns the tag name.
    pub fn to_str(&self) -> &'static str {
        match self {
            ElementId::Circle => "circle",
            ElementId::ClipPath => "clipPath",
            ElementId::Defs => "defs",
            ElementId::Ellipse => "ellipse",
            ElementId::G => "g",
            ElementId::Line => "line",
            ElementId::LinearGradient => "linearGradient",
            ElementId::Path => "path",
            ElementId::Pattern => "pattern",
            ElementId::Polygon => "polygon",
            ElementId::Polyline => "polyline",
            ElementId::RadialGradient => "radialGradient",
            ElementId::Rect => "rect",
            ElementId::Stop => "stop",
            ElementId::Svg => "svg",
            ElementId::Text => "text",
            ElementId::Use => "use",
        }
    }
}

/// Element-specific node data.
#[allow(missing_docs)]
#[derive(Clone, Debug)]
pub enum NodeKind {
    Circle(Circle),
    Ellipse(Ellipse),
    Rect(RectShape),
    Line(Line),
    Poly(Poly),
    Path(PathShape),
    Group,
    Svg(Svg),
    ClipPath(ClipPathElement),
    Defs,
    Pattern(Pattern),
    LinearGradient(LinearGradient),
    RadialGradient(RadialGradient),
    Stop(Stop),
    Use(Use),
    Text,
}

impl NodeKind {
    fn new(tag: ElementId) -> Self {
        match tag {
            ElementId::Circle => NodeKind::Circle(Circle::default()),
            ElementId::ClipPath => NodeKind::ClipPath(ClipPathElement::default()),
            ElementId::Defs => NodeKind::Defs,
            ElementId::Ellipse => NodeKind::Ellipse(Ellipse::default()),
            ElementId::G => NodeKind::Group,
            ElementId::Line => NodeKind::Line(Line::default()),
            ElementId::LinearGradient => NodeKind::LinearGradient(LinearGradient::default()),
            ElementId::Path => NodeKind::Path(PathShape::default()),
            ElementId::Pattern => NodeKind::Pattern(Pattern::default()),
            ElementId::Polygon => NodeKind::Poly(Poly::new(true)),
            ElementId::Polyline => NodeKind::Poly(Poly::new(false)),
            ElementId::RadialGradient => NodeKind::RadialGradient(RadialGradient::default()),
            ElementId::Rect => NodeKind::Rect(RectShape::default()),
            ElementId::Stop => NodeKind::Stop(Stop::default()),
            ElementId::Svg => NodeKind::Svg(Svg::default()),
            ElementId::Text => NodeKind::Text,
            ElementId::Use => NodeKind::Use(Use::default()),
        }
    }

    fn set_attribute(&mut self, aid: AId, value: AttributeValue) -> Result<(), AttributeValue> {
        match *self {
            NodeKind::Circle(ref mut v) => v.set_attribute(aid, value),
            NodeKind::Ellipse(ref mut v) => v.set_attribute(aid, value),
            NodeKind::Rect(ref mut v) => v.set_attribute(aid, value),
            NodeKind::Line(ref mut v) => v.set_attribute(aid, value),
            NodeKind::Poly(ref mut v) => v.set_attribute(aid, value),
            NodeKind::Path(ref mut v) => v.set_attribute(aid, value),
            NodeKind::Svg(ref mut v) => v.set_attribute(aid, value),
            NodeKind::ClipPath(ref mut v) => v.set_attribute(aid, value),
            NodeKind::Pattern(ref mut v) => v.set_attribute(aid, value),
            NodeKind::LinearGradient(ref mut v) => v.set_attribute(aid, value),
            NodeKind::RadialGradient(ref mut v) => v.set_attribute(aid, value),
            NodeKind::Stop(ref mut v) => v.set_attribute(aid, value),
            NodeKind::Use(ref mut v) => v.set_attribute(aid, value),
            NodeKind::Group | NodeKind::Defs | NodeKind::Text => Err(value),
        }
    }
}

/// A scene graph node.
///
/// Nodes are mutated only while being built.
#[derive(Clone, Debug)]
pub struct Node {
    tag: ElementId,
    presentation: PresentationAttributes,
    transform: svgvalues::Transform,
    kind: NodeKind,
    children: Vec<Rc<Node>>,
}

impl Node {
    /// Creates a node with default attributes.
    pub fn new(tag: ElementId) -> Self {
        Node {
            tag,
            presentation: PresentationAttributes::default(),
            transform: svgvalues::Transform::default(),
            kind: NodeKind::new(tag),
            children: Vec::new(),
        }
    }

    /// Returns the element type.
    #[inline]
    pub fn tag(&self) -> ElementId {
        self.tag
    }

    /// Returns the tag name.
    #[inline]
    pub fn tag_name(&self) -> &'static str {
        self.tag.to_str()
    }

    /// Returns element-specific data.
    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns the presentation attributes declared on this node.
    #[inline]
    pub fn presentation(&self) -> &PresentationAttributes {
        &self.presentation
    }

    /// Returns the `transform` attribute.
    #[inline]
    pub fn transform(&self) -> svgvalues::Transform {
        self.transform
    }

    /// Returns child nodes.
    #[inline]
    pub fn children(&self) -> &[Rc<Node>] {
        &self.children
    }

    /// Checks that the node is a shape.
    pub fn is_shape(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Circle(_)
                | NodeKind::Ellipse(_)
                | NodeKind::Rect(_)
                | NodeKind::Line(_)
                | NodeKind::Poly(_)
                | NodeKind::Path(_)
        )
    }

    /// Checks that the node can hold children.
    pub fn is_container(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Group
                | NodeKind::Svg(_)
                | NodeKind::Defs
                | NodeKind::ClipPath(_)
                | NodeKind::Pattern(_)
                | NodeKind::LinearGradient(_)
                | NodeKind::RadialGradient(_)
                | NodeKind::Text
        )
    }

    /// Checks that the node is skipped during normal rendering.
    ///
    /// Such nodes contribute only when referenced.
    pub fn is_hidden(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Defs
                | NodeKind::ClipPath(_)
                | NodeKind::Pattern(_)
                | NodeKind::LinearGradient(_)
                | NodeKind::RadialGradient(_)
                | NodeKind::Stop(_)
        )
    }

    /// Checks that the node can be referenced by a paint.
    pub fn is_paint_server(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Pattern(_) | NodeKind::LinearGradient(_) | NodeKind::RadialGradient(_)
        )
    }

    /// Checks that the node is a `clipPath`.
    pub fn is_clip_path(&self) -> bool {
        matches!(self.kind, NodeKind::ClipPath(_))
    }

    fn is_transformable(&self) -> bool {
        self.is_shape()
            || matches!(
                self.kind,
                NodeKind::Group | NodeKind::Use(_) | NodeKind::Text | NodeKind::ClipPath(_)
            )
    }

    /// Applies a parsed attribute.
    ///
    /// Element-specific attributes are tried first, then `transform`,
    /// then presentation attributes.
    /// Returns `false` when the node doesn't support the attribute.
    pub fn set_attribute(&mut self, aid: AId, value: AttributeValue) -> bool {
        let value = match self.kind.set_attribute(aid, value) {
            Ok(()) => return true,
            Err(v) => v,
        };

        let value = match self.set_transform_attribute(aid, value) {
            Ok(()) => return true,
            Err(v) => v,
        };

        self.presentation.set_attribute(aid, value).is_ok()
    }

    fn set_transform_attribute(
        &mut self,
        aid: AId,
        value: AttributeValue,
    ) -> Result<(), AttributeValue> {
        match (aid, value) {
            (AId::Transform, AttributeValue::Transform(ts)) if self.is_transformable() => {
                self.transform = ts;
                Ok(())
            }
            (_, value) => Err(value),
        }
    }

    /// Appends a child node.
    ///
    /// Only containers accept children.
    pub fn append_child(&mut self, child: Rc<Node>) -> bool {
        if !self.is_container() {
            log::warn!(
                "A '{}' element cannot have children. '{}' is ignored.",
                self.tag_name(),
                child.tag_name()
            );
            return false;
        }

        self.children.push(child);
        true
    }

    /// Renders the node and its subtree.
    pub fn render(&self, parent: &mut RenderContext) {
        let mut ctx = parent.from_parent();
        if self.prepare_to_render(&mut ctx) {
            self.on_render(&mut ctx);
        }
    }

    /// Prepares the context for rendering.
    ///
    /// Returns `false` when the node should not be rendered.
    pub fn prepare_to_render(&self, ctx: &mut RenderContext) -> bool {
        if self.is_hidden() {
            return false;
        }

        if !self.transform.is_default() {
            ctx.concat(geom::to_transform(self.transform));
        }

        // In the coordinates set up below by the `use` offset or `svg` viewport.
        let bbox = if self.is_shape() || self.presentation.clip_path.is_some() {
            self.object_bbox(ctx.resolve())
        } else {
            None
        };

        match self.kind {
            NodeKind::Svg(ref svg) => {
                if !svg.prepare_viewport(ctx) {
                    return false;
                }
            }
            NodeKind::Use(ref u) => u.prepare(ctx),
            _ => {}
        }

        if let Some(ref clip) = self.presentation.clip_path {
            if !ctx.apply_clip(clip, bbox) {
                return false;
            }
        }

        let target = if self.is_shape() {
            PresentationTarget::Leaf { bbox }
        } else {
            PresentationTarget::Container
        };
        ctx.apply_presentation_attributes(&self.presentation, target);

        true
    }

    /// Draws the node.
    pub fn on_render(&self, ctx: &mut RenderContext) {
        match self.kind {
            NodeKind::Circle(ref v) => v.render(ctx),
            NodeKind::Ellipse(ref v) => v.render(ctx),
            NodeKind::Rect(ref v) => v.render(ctx),
            NodeKind::Line(ref v) => v.render(ctx),
            NodeKind::Poly(ref v) => v.render(ctx),
            NodeKind::Path(ref v) => v.render(ctx),
            NodeKind::Group | NodeKind::Svg(_) => self.render_children(ctx),
            NodeKind::Use(ref v) => v.render(ctx),
            // Text layout is not supported.
            NodeKind::Text => {}
            NodeKind::Defs
            | NodeKind::ClipPath(_)
            | NodeKind::Pattern(_)
            | NodeKind::LinearGradient(_)
            | NodeKind::RadialGradient(_)
            | NodeKind::Stop(_) => {}
        }
    }

    pub(crate) fn render_children(&self, ctx: &mut RenderContext) {
        for child in &self.children {
            child.render(ctx);
        }
    }

    /// Returns the node geometry in the parent coordinate system.
    ///
    /// Hidden nodes have no geometry.
    pub fn as_path(&self, ctx: &ResolveContext) -> Option<Path> {
        if self.is_hidden() {
            return None;
        }

        let path = self.content_path(ctx)?;
        if self.transform.is_default() {
            Some(path)
        } else {
            path.transform(geom::to_transform(self.transform))
        }
    }

    /// Returns the node geometry in its own coordinate system.
    pub(crate) fn content_path(&self, ctx: &ResolveContext) -> Option<Path> {
        match self.kind {
            NodeKind::Circle(ref v) => v.to_path(ctx.length()),
            NodeKind::Ellipse(ref v) => v.to_path(ctx.length()),
            NodeKind::Rect(ref v) => v.to_path(ctx.length()),
            NodeKind::Line(ref v) => v.to_path(ctx.length()),
            NodeKind::Poly(ref v) => v.to_path(),
            NodeKind::Path(ref v) => v.to_path(),
            NodeKind::Svg(ref v) => v.content_path(self, ctx),
            NodeKind::Use(ref v) => v.content_path(ctx),
            NodeKind::Group | NodeKind::Defs | NodeKind::ClipPath(_) => {
                self.children_path(ctx)
            }
            NodeKind::Text
            | NodeKind::Pattern(_)
            | NodeKind::LinearGradient(_)
            | NodeKind::RadialGradient(_)
            | NodeKind::Stop(_) => None,
        }
    }

    pub(crate) fn children_path(&self, ctx: &ResolveContext) -> Option<Path> {
        crate::union_paths(self.children.iter().filter_map(|c| c.as_path(ctx)))
    }

    /// Returns the node bounding box in its own coordinate system.
    ///
    /// For `use` this excludes the `x`/`y` offset and for `svg` the viewport
    /// transform. `ctx` is the parent's context.
    pub fn object_bbox(&self, ctx: &ResolveContext) -> Option<NonZeroRect> {
        let path = match self.kind {
            NodeKind::Svg(ref v) => v.viewport_path(self, ctx),
            NodeKind::Use(ref v) => v.target_path(ctx),
            _ => self.content_path(ctx),
        };

        path?.bounds().to_non_zero_rect()
    }

    /// Converts a paint server into a paint.
    ///
    /// `ts` is the canvas transform of the painted shape
    /// and `bbox` is its bounding box.
    pub fn as_paint(
        &self,
        ctx: &ResolveContext,
        ts: Transform,
        bbox: Option<NonZeroRect>,
        opacity: f32,
    ) -> Option<PaintSource> {
        match self.kind {
            NodeKind::LinearGradient(ref v) => v.as_paint(self, ctx, bbox, opacity),
            NodeKind::RadialGradient(ref v) => v.as_paint(self, ctx, bbox, opacity),
            NodeKind::Pattern(ref v) => v.as_paint(self, ctx, ts, bbox, opacity),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::dispatch;
    use crate::units::LengthContext;
    use svgvalues::Length;

    #[test]
    fn tag_names() {
        for name in ["svg", "clipPath", "radialGradient", "use", "polyline"] {
            assert_eq!(ElementId::from_str(name).unwrap().to_str(), name);
        }
        assert_eq!(ElementId::from_str("clippath"), None);
        assert_eq!(ElementId::from_str("symbol"), None);
    }

    #[test]
    fn attribute_fallback_chain() {
        let mut node = Node::new(ElementId::Circle);
        assert!(dispatch(&mut node, "r", "5"));
        assert!(dispatch(&mut node, "transform", "translate(10)"));
        assert!(dispatch(&mut node, "fill", "red"));
        // Not a circle attribute and not a presentation one.
        assert!(!dispatch(&mut node, "x1", "5"));

        match node.kind() {
            NodeKind::Circle(c) => assert_eq!(c.r, Length::new_number(5.0)),
            _ => unreachable!(),
        }
        assert_eq!(node.transform(), svgvalues::Transform::new_translate(10.0, 0.0));
        assert!(node.presentation().fill.is_some());
    }

    #[test]
    fn defs_ignore_transform() {
        let mut node = Node::new(ElementId::Defs);
        assert!(!dispatch(&mut node, "transform", "scale(2)"));
        assert!(node.transform().is_default());
    }

    #[test]
    fn malformed_value_leaves_attribute_unset() {
        let mut node = Node::new(ElementId::Rect);
        dispatch(&mut node, "width", "abc");
        match node.kind() {
            NodeKind::Rect(r) => assert_eq!(r.width, Length::zero()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn shapes_reject_children() {
        let mut rect = Node::new(ElementId::Rect);
        assert!(!rect.append_child(Rc::new(Node::new(ElementId::Circle))));
        assert!(rect.children().is_empty());

        let mut group = Node::new(ElementId::G);
        assert!(group.append_child(Rc::new(Node::new(ElementId::Circle))));
        assert_eq!(group.children().len(), 1);
    }

    #[test]
    fn group_path_is_union() {
        let mut a = Node::new(ElementId::Rect);
        dispatch(&mut a, "width", "10");
        dispatch(&mut a, "height", "10");
        let mut b = Node::new(ElementId::Circle);
        dispatch(&mut b, "cx", "50");
        dispatch(&mut b, "cy", "50");
        dispatch(&mut b, "r", "10%");

        let mut g = Node::new(ElementId::G);
        dispatch(&mut g, "transform", "translate(5 5)");
        g.append_child(Rc::new(a));
        g.append_child(Rc::new(b));

        let ids = IdMap::new();
        let ctx = ResolveContext::new(&ids, LengthContext::new((100.0, 100.0), 96.0));
        let path = g.as_path(&ctx).unwrap();
        let bounds = path.bounds();
        assert_eq!(bounds.left(), 5.0);
        assert_eq!(bounds.top(), 5.0);
        assert!((bounds.right() - 65.0).abs() < 0.01);
        assert!((bounds.bottom() - 65.0).abs() < 0.01);
    }

    #[test]
    fn hidden_nodes_have_no_path() {
        let mut rect = Node::new(ElementId::Rect);
        dispatch(&mut rect, "width", "10");
        dispatch(&mut rect, "height", "10");
        let mut defs = Node::new(ElementId::Defs);
        defs.append_child(Rc::new(rect));

        let ids = IdMap::new();
        let ctx = ResolveContext::new(&ids, LengthContext::new((100.0, 100.0), 96.0));
        assert!(defs.as_path(&ctx).is_none());
    }
}
