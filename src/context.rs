// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::rc::Rc;

use svgvalues::{ClipPath, DashArray, Length, PaintFallback};
use tiny_skia::{NonZeroRect, Path, Transform};

use crate::node::{IdMap, Node};
use crate::paint::{self, Paint, PaintSource, PaintStyle};
use crate::presentation::{PresentationAttributes, PresentationContext};
use crate::units::{LengthContext, LengthType};
use crate::{Canvas, OptionLog};

/// State needed to resolve references and lengths.
///
/// Cheap to clone. All state is shared until modified.
#[derive(Clone, Debug)]
pub struct ResolveContext<'a> {
    ids: &'a IdMap,
    length: Rc<LengthContext>,
    refs: Rc<Vec<Rc<Node>>>,
}

impl<'a> ResolveContext<'a> {
    /// Creates a new context.
    pub fn new(ids: &'a IdMap, length: LengthContext) -> Self {
        ResolveContext {
            ids,
            length: Rc::new(length),
            refs: Rc::new(Vec::new()),
        }
    }

    /// Returns the current viewport state.
    #[inline]
    pub fn length(&self) -> &LengthContext {
        &self.length
    }

    /// Returns a mutable viewport state, detaching it from the parent.
    pub fn length_mut(&mut self) -> &mut LengthContext {
        Rc::make_mut(&mut self.length)
    }

    /// Resolves a length against the current viewport.
    #[inline]
    pub fn resolve(&self, length: Length, kind: LengthType) -> f64 {
        self.length.resolve(length, kind)
    }

    /// Looks up a node by its `id`.
    pub fn find_node_by_id(&self, id: &str) -> Option<Rc<Node>> {
        self.ids.get(id).cloned()
    }

    /// Checks that `node` is being resolved already.
    pub fn is_visiting(&self, node: &Node) -> bool {
        self.refs.iter().any(|n| std::ptr::eq(n.as_ref(), node))
    }

    /// Returns a context that marks `node` as being resolved.
    ///
    /// Returns `None` on a recursive reference.
    pub fn enter(&self, node: &Rc<Node>) -> Option<ResolveContext<'a>> {
        if self.is_visiting(node) {
            log::warn!(
                "Recursive reference to a '{}' element detected. Skipped.",
                node.tag_name()
            );
            return None;
        }

        let mut ctx = self.clone();
        Rc::make_mut(&mut ctx.refs).push(node.clone());
        Some(ctx)
    }
}

/// What kind of node presentation attributes are applied for.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PresentationTarget {
    /// A node with children. Opacity is applied through a layer.
    Container,
    /// A shape. Opacity is folded into the paints.
    Leaf {
        /// Shape bounding box in user space.
        bbox: Option<NonZeroRect>,
    },
}

/// A per-node rendering state.
///
/// Every node renders with its own context created from the parent's one.
/// The canvas is restored to the state it had when the context was created
/// once the context goes out of scope.
pub struct RenderContext<'a> {
    canvas: &'a mut dyn Canvas,
    resolve: ResolveContext<'a>,
    presentation: Rc<PresentationContext>,
    save_count: usize,
    did_save: bool,
    clip: Option<Path>,
}

impl<'a> RenderContext<'a> {
    /// Creates a root context.
    pub fn new(canvas: &'a mut dyn Canvas, ids: &'a IdMap, length: LengthContext) -> Self {
        Self::with_resolve(canvas, ResolveContext::new(ids, length))
    }

    /// Creates a root context with existing resolving state.
    pub fn with_resolve(canvas: &'a mut dyn Canvas, resolve: ResolveContext<'a>) -> Self {
        let save_count = canvas.save_count();
        RenderContext {
            canvas,
            resolve,
            presentation: Rc::new(PresentationContext::default()),
            save_count,
            did_save: false,
            clip: None,
        }
    }

    /// Creates a child context.
    ///
    /// Shares all inherited state with `self`. The clip is not inherited.
    pub fn from_parent(&mut self) -> RenderContext<'_> {
        let save_count = self.canvas.save_count();
        RenderContext {
            canvas: &mut *self.canvas,
            resolve: self.resolve.clone(),
            presentation: self.presentation.clone(),
            save_count,
            did_save: false,
            clip: None,
        }
    }

    /// Returns the canvas.
    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    /// Returns the resolving state.
    #[inline]
    pub fn resolve(&self) -> &ResolveContext<'a> {
        &self.resolve
    }

    /// Returns the current viewport state.
    #[inline]
    pub fn length(&self) -> &LengthContext {
        self.resolve.length()
    }

    /// Establishes a new viewport.
    pub fn set_view_port(&mut self, size: (f64, f64)) {
        if self.resolve.length().view_port() != size {
            self.resolve.length_mut().set_view_port(size);
        }
    }

    /// Returns the inherited presentation state.
    #[inline]
    pub fn presentation(&self) -> &PresentationContext {
        &self.presentation
    }

    /// Returns the clip path set by this context.
    #[inline]
    pub fn clip(&self) -> Option<&Path> {
        self.clip.as_ref()
    }

    /// Checks that this context has saved the canvas.
    #[inline]
    pub fn did_save(&self) -> bool {
        self.did_save
    }

    /// Looks up a node by its `id`.
    pub fn find_node_by_id(&self, id: &str) -> Option<Rc<Node>> {
        self.resolve.find_node_by_id(id)
    }

    /// Marks `node` as being rendered.
    ///
    /// Returns `false` on a recursive reference.
    pub fn enter(&mut self, node: &Rc<Node>) -> bool {
        match self.resolve.enter(node) {
            Some(ctx) => {
                self.resolve = ctx;
                true
            }
            None => false,
        }
    }

    /// Saves the canvas, but only once per context.
    pub fn save_once(&mut self) {
        if !self.did_save {
            self.canvas.save();
            self.did_save = true;
        }
    }

    /// Pre-concatenates the canvas transform.
    pub fn concat(&mut self, ts: Transform) {
        if ts.is_identity() {
            return;
        }

        self.save_once();
        self.canvas.concat(ts);
    }

    /// Merges node presentation attributes into the inherited ones.
    ///
    /// For leaves, recomputes the fill and stroke paints.
    /// For containers, opens a layer when opacity is below 1.
    pub fn apply_presentation_attributes(
        &mut self,
        attrs: &PresentationAttributes,
        target: PresentationTarget,
    ) {
        if attrs.has_inherited() {
            Rc::make_mut(&mut self.presentation).attributes.apply(attrs);
        }

        let opacity = attrs.opacity();
        match target {
            PresentationTarget::Container => {
                if opacity < 1.0 {
                    self.canvas.save_layer(opacity as f32);
                    self.did_save = true;
                }
            }
            PresentationTarget::Leaf { bbox } => {
                let (fill, stroke) = self.resolve_paints(opacity, bbox);
                let presentation = Rc::make_mut(&mut self.presentation);
                presentation.fill = fill;
                presentation.stroke = stroke;
            }
        }
    }

    fn resolve_paints(
        &self,
        opacity: f64,
        bbox: Option<NonZeroRect>,
    ) -> (Option<Paint>, Option<Paint>) {
        let attrs = &self.presentation.attributes;
        if !attrs.is_visible() {
            return (None, None);
        }

        let fill = self
            .resolve_paint(&attrs.fill, opacity * attrs.fill_opacity, bbox)
            .map(|source| Paint {
                source,
                style: PaintStyle::Fill(paint::to_fill_rule(attrs.fill_rule)),
                anti_alias: true,
            });

        let stroke = match self.resolve_paint(&attrs.stroke, opacity * attrs.stroke_opacity, bbox) {
            Some(source) => self.resolve_stroke().map(|stroke| Paint {
                source,
                style: PaintStyle::Stroke(stroke),
                anti_alias: true,
            }),
            None => None,
        };

        (fill, stroke)
    }

    fn resolve_paint(
        &self,
        value: &svgvalues::Paint,
        opacity: f64,
        bbox: Option<NonZeroRect>,
    ) -> Option<PaintSource> {
        let opacity = opacity as f32;
        let color = self.presentation.attributes.color;
        match value {
            svgvalues::Paint::None | svgvalues::Paint::Inherit => None,
            svgvalues::Paint::CurrentColor => Some(PaintSource::Color(paint::to_color(color, opacity))),
            svgvalues::Paint::Color(c) => Some(PaintSource::Color(paint::to_color(*c, opacity))),
            svgvalues::Paint::FuncIRI(id, fallback) => {
                if let Some(node) = self.find_node_by_id(id) {
                    if node.is_paint_server() {
                        let ctx = self.resolve.enter(&node)?;
                        return node.as_paint(&ctx, self.canvas.transform(), bbox, opacity);
                    }
                }

                match fallback {
                    Some(PaintFallback::None) => None,
                    Some(PaintFallback::CurrentColor) => {
                        Some(PaintSource::Color(paint::to_color(color, opacity)))
                    }
                    Some(PaintFallback::Color(c)) => {
                        Some(PaintSource::Color(paint::to_color(*c, opacity)))
                    }
                    None => {
                        log::warn!("'{}' cannot be used as a paint server. Skipped.", id);
                        None
                    }
                }
            }
        }
    }

    fn resolve_stroke(&self) -> Option<tiny_skia::Stroke> {
        let attrs = &self.presentation.attributes;

        let width = self.resolve.resolve(attrs.stroke_width, LengthType::Other);
        if !(width > 0.0 && width.is_finite()) {
            return None;
        }

        let dash = match attrs.stroke_dasharray {
            DashArray::Explicit(ref list) => {
                let offset = self.resolve.resolve(attrs.stroke_dashoffset, LengthType::Other);
                self.resolve_dash(list, offset)
            }
            DashArray::None | DashArray::Inherit => None,
        };

        Some(tiny_skia::Stroke {
            width: width as f32,
            // Must be bigger than 1.
            miter_limit: attrs.stroke_miterlimit.max(1.0) as f32,
            line_cap: paint::to_line_cap(attrs.stroke_linecap),
            line_join: paint::to_line_join(attrs.stroke_linejoin),
            dash,
        })
    }

    fn resolve_dash(&self, list: &[Length], offset: f64) -> Option<tiny_skia::StrokeDash> {
        let mut values = Vec::with_capacity(list.len() * 2);
        for len in list {
            let n = self.resolve.resolve(*len, LengthType::Other);
            if n < 0.0 {
                return None;
            }

            values.push(n as f32);
        }

        let sum: f32 = values.iter().sum();
        if !(sum > 0.0) {
            return None;
        }

        // An odd list is repeated to make it even.
        if values.len() % 2 != 0 {
            values.extend_from_within(..);
        }

        tiny_skia::StrokeDash::new(values, offset as f32)
    }

    /// Clips the canvas with a `clipPath` element.
    ///
    /// Returns `false` when the referenced clip path has no geometry,
    /// so nothing should be rendered.
    /// A missing or invalid reference is ignored.
    pub fn apply_clip(&mut self, clip: &ClipPath, bbox: Option<NonZeroRect>) -> bool {
        let id = match clip {
            ClipPath::FuncIRI(id) => id,
            ClipPath::None | ClipPath::Inherit => return true,
        };

        let node = match self
            .find_node_by_id(id)
            .filter(|n| n.is_clip_path())
            .log_none(|| log::warn!("'{}' is not a clipPath. Ignored.", id))
        {
            Some(v) => v,
            None => return true,
        };

        let resolve = match self.resolve.enter(&node) {
            Some(v) => v,
            None => return false,
        };

        let path = match node.clip_content_path(&resolve, bbox) {
            Some(v) => v,
            None => return false,
        };

        let rule = node
            .clip_rule()
            .unwrap_or(self.presentation.attributes.clip_rule);

        self.save_once();
        self.canvas.clip_path(&path, paint::to_fill_rule(rule), true);
        self.clip = Some(path);
        true
    }
}

impl Drop for RenderContext<'_> {
    fn drop(&mut self) {
        self.canvas.restore_to_count(self.save_count);
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("resolve", &self.resolve)
            .field("presentation", &self.presentation)
            .field("save_count", &self.save_count)
            .field("did_save", &self.did_save)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Record, RecordingCanvas};
    use crate::node::ElementId;
    use svgvalues::{Color, Paint as PaintValue};

    fn ids() -> IdMap {
        IdMap::new()
    }

    #[test]
    fn one_restore_per_scope() {
        let ids = ids();
        let mut canvas = RecordingCanvas::new();
        {
            let mut root = RenderContext::new(&mut canvas, &ids, LengthContext::new((10.0, 10.0), 96.0));
            {
                let mut child = root.from_parent();
                child.concat(Transform::from_translate(1.0, 0.0));
                child.concat(Transform::from_scale(2.0, 2.0));
                child.save_once();
                assert!(child.did_save());
            }
            assert!(!root.did_save());
        }

        let saves = canvas.records().iter().filter(|r| matches!(r, Record::Save)).count();
        let restores = canvas.records().iter().filter(|r| matches!(r, Record::Restore)).count();
        assert_eq!((saves, restores), (1, 1));
        assert_eq!(canvas.transform(), Transform::identity());
    }

    #[test]
    fn child_changes_are_private() {
        let ids = ids();
        let mut canvas = RecordingCanvas::new();
        let mut root = RenderContext::new(&mut canvas, &ids, LengthContext::new((10.0, 10.0), 96.0));
        {
            let mut child = root.from_parent();
            child.set_view_port((50.0, 50.0));
            let attrs = PresentationAttributes {
                fill: Some(PaintValue::Color(Color::new_rgb(0, 0, 255))),
                ..PresentationAttributes::default()
            };
            child.apply_presentation_attributes(&attrs, PresentationTarget::Container);
            assert_eq!(child.length().view_port(), (50.0, 50.0));
        }

        assert_eq!(root.length().view_port(), (10.0, 10.0));
        assert_eq!(root.presentation().attributes.fill, PaintValue::Color(Color::black()));
    }

    #[test]
    fn leaf_opacity_is_folded() {
        let ids = ids();
        let mut canvas = RecordingCanvas::new();
        let mut ctx = RenderContext::new(&mut canvas, &ids, LengthContext::new((10.0, 10.0), 96.0));
        let attrs = PresentationAttributes {
            opacity: Some(0.5),
            fill_opacity: Some(0.5),
            ..PresentationAttributes::default()
        };
        ctx.apply_presentation_attributes(&attrs, PresentationTarget::Leaf { bbox: None });

        let color = ctx.presentation().fill.as_ref().unwrap().color().unwrap();
        assert_eq!(color.to_color_u8().alpha(), 64);
        assert!(ctx.presentation().stroke.is_none());
    }

    #[test]
    fn container_opacity_uses_layer() {
        let ids = ids();
        let mut canvas = RecordingCanvas::new();
        {
            let mut ctx = RenderContext::new(&mut canvas, &ids, LengthContext::new((10.0, 10.0), 96.0));
            let attrs = PresentationAttributes {
                opacity: Some(0.25),
                ..PresentationAttributes::default()
            };
            ctx.apply_presentation_attributes(&attrs, PresentationTarget::Container);
        }

        assert!(matches!(canvas.records()[0], Record::SaveLayer(o) if o == 0.25));
        assert!(matches!(canvas.records()[1], Record::Restore));
    }

    #[test]
    fn stroke_dash() {
        let ids = ids();
        let mut canvas = RecordingCanvas::new();
        let mut ctx = RenderContext::new(&mut canvas, &ids, LengthContext::new((10.0, 10.0), 96.0));
        let attrs = PresentationAttributes {
            stroke: Some(PaintValue::Color(Color::black())),
            stroke_dasharray: Some(DashArray::Explicit(vec![Length::new_number(5.0)])),
            ..PresentationAttributes::default()
        };
        ctx.apply_presentation_attributes(&attrs, PresentationTarget::Leaf { bbox: None });

        let stroke = ctx.presentation().stroke.clone().unwrap();
        match stroke.style {
            PaintStyle::Stroke(ref s) => {
                assert_eq!(s.width, 1.0);
                assert!(s.dash.is_some());
            }
            PaintStyle::Fill(_) => panic!("expected a stroke"),
        }

        let zero = vec![Length::zero(), Length::zero()];
        assert!(ctx.resolve_dash(&zero, 0.0).is_none());
        let negative = vec![Length::new_number(-1.0), Length::new_number(2.0)];
        assert!(ctx.resolve_dash(&negative, 0.0).is_none());
    }

    #[test]
    fn hidden_leaf_has_no_paints() {
        let ids = ids();
        let mut canvas = RecordingCanvas::new();
        let mut ctx = RenderContext::new(&mut canvas, &ids, LengthContext::new((10.0, 10.0), 96.0));
        let attrs = PresentationAttributes {
            visibility: Some(svgvalues::Visibility::Hidden),
            ..PresentationAttributes::default()
        };
        ctx.apply_presentation_attributes(&attrs, PresentationTarget::Leaf { bbox: None });
        assert!(ctx.presentation().fill.is_none());
    }

    #[test]
    fn recursive_reference() {
        let ids = ids();
        let node = Rc::new(Node::new(ElementId::G));
        let ctx = ResolveContext::new(&ids, LengthContext::new((1.0, 1.0), 96.0));
        let inner = ctx.enter(&node).unwrap();
        assert!(inner.is_visiting(&node));
        assert!(!ctx.is_visiting(&node));
        assert!(inner.enter(&node).is_none());
    }

    #[test]
    fn missing_clip_is_ignored() {
        let ids = ids();
        let mut canvas = RecordingCanvas::new();
        let mut ctx = RenderContext::new(&mut canvas, &ids, LengthContext::new((10.0, 10.0), 96.0));
        assert!(ctx.apply_clip(&ClipPath::FuncIRI("nope".to_string()), None));
        assert!(ctx.clip().is_none());
        assert!(!ctx.did_save());
    }
}
