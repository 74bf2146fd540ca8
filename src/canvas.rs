// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drawing surfaces.

use std::rc::Rc;

use tiny_skia::{FillRule, Path, PathBuilder, Pixmap, Rect, Transform};

use crate::geom;
use crate::paint::{Paint, PaintSource, PaintStyle};

/// A drawing surface.
///
/// Coordinates are in user space and mapped by the current transform.
pub trait Canvas {
    /// Saves the current transform and clip.
    fn save(&mut self);

    /// Saves the current state and redirects drawing into a layer
    /// that is composited with `opacity` on restore.
    fn save_layer(&mut self, opacity: f32);

    /// Restores the last saved state.
    ///
    /// Does nothing when nothing was saved.
    fn restore(&mut self);

    /// Returns the number of saved states plus one.
    fn save_count(&self) -> usize;

    /// Restores states until `save_count` equals `count`.
    fn restore_to_count(&mut self, count: usize) {
        let count = count.max(1);
        while self.save_count() > count {
            self.restore();
        }
    }

    /// Pre-concatenates the current transform with `ts`.
    fn concat(&mut self, ts: Transform);

    /// Returns the current transform.
    fn transform(&self) -> Transform;

    /// Intersects the current clip with `path`.
    fn clip_path(&mut self, path: &Path, rule: FillRule, anti_alias: bool);

    #[allow(missing_docs)]
    fn draw_circle(&mut self, cx: f32, cy: f32, r: f32, paint: &Paint);

    #[allow(missing_docs)]
    fn draw_oval(&mut self, rect: Rect, paint: &Paint);

    #[allow(missing_docs)]
    fn draw_rrect(&mut self, rect: Rect, rx: f32, ry: f32, paint: &Paint);

    #[allow(missing_docs)]
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, paint: &Paint);

    #[allow(missing_docs)]
    fn draw_path(&mut self, path: &Path, paint: &Paint);
}

/// Joins paths into one by concatenating their contours.
///
/// Returns `None` when there is nothing to join.
pub fn union_paths<I: IntoIterator<Item = Path>>(paths: I) -> Option<Path> {
    let mut builder = PathBuilder::new();
    for path in paths {
        builder.push_path(&path);
    }

    builder.finish()
}

#[derive(Clone, Default)]
struct State {
    transform: Transform,
    mask: Option<Rc<tiny_skia::Mask>>,
}

struct SavedState {
    state: State,
    layer_opacity: Option<f32>,
}

/// A canvas that rasterizes into a pixmap.
pub struct PixmapCanvas<'a> {
    pixmap: &'a mut Pixmap,
    layers: Vec<Pixmap>,
    state: State,
    stack: Vec<SavedState>,
}

impl<'a> PixmapCanvas<'a> {
    /// Creates a new canvas with an identity transform and no clip.
    pub fn new(pixmap: &'a mut Pixmap) -> Self {
        PixmapCanvas {
            pixmap,
            layers: Vec::new(),
            state: State::default(),
            stack: Vec::new(),
        }
    }

    fn target(&mut self) -> &mut Pixmap {
        match self.layers.last_mut() {
            Some(layer) => layer,
            None => &mut *self.pixmap,
        }
    }

    fn render(&mut self, path: &Path, paint: &Paint) {
        let ts = self.state.transform;
        let mask = self.state.mask.clone();

        let mut sk_paint = tiny_skia::Paint {
            anti_alias: paint.anti_alias,
            ..tiny_skia::Paint::default()
        };

        match paint.source {
            PaintSource::Color(c) => sk_paint.set_color(c),
            PaintSource::Shader(ref shader) => sk_paint.shader = shader.clone(),
            PaintSource::Pattern(ref tile) => {
                sk_paint.shader = tiny_skia::Pattern::new(
                    tile.pixmap.as_ref(),
                    tiny_skia::SpreadMode::Repeat,
                    tiny_skia::FilterQuality::Bicubic,
                    tile.opacity,
                    tile.transform,
                );
            }
        }

        let target = self.target();
        match paint.style {
            PaintStyle::Fill(rule) => {
                target.fill_path(path, &sk_paint, rule, ts, mask.as_deref());
            }
            PaintStyle::Stroke(ref stroke) => {
                target.stroke_path(path, &sk_paint, stroke, ts, mask.as_deref());
            }
        }
    }
}

impl Canvas for PixmapCanvas<'_> {
    fn save(&mut self) {
        self.stack.push(SavedState {
            state: self.state.clone(),
            layer_opacity: None,
        });
    }

    fn save_layer(&mut self, opacity: f32) {
        let layer = match Pixmap::new(self.pixmap.width(), self.pixmap.height()) {
            Some(v) => v,
            None => {
                log::warn!("Failed to allocate a layer. Opacity is ignored.");
                self.save();
                return;
            }
        };

        self.layers.push(layer);
        self.stack.push(SavedState {
            state: self.state.clone(),
            layer_opacity: Some(opacity),
        });
    }

    fn restore(&mut self) {
        let saved = match self.stack.pop() {
            Some(v) => v,
            None => return,
        };

        self.state = saved.state;

        if let Some(opacity) = saved.layer_opacity {
            if let Some(layer) = self.layers.pop() {
                let paint = tiny_skia::PixmapPaint {
                    opacity,
                    blend_mode: tiny_skia::BlendMode::SourceOver,
                    quality: tiny_skia::FilterQuality::Nearest,
                };

                // The layer content is already clipped.
                self.target().draw_pixmap(
                    0,
                    0,
                    layer.as_ref(),
                    &paint,
                    Transform::identity(),
                    None,
                );
            }
        }
    }

    fn save_count(&self) -> usize {
        self.stack.len() + 1
    }

    fn concat(&mut self, ts: Transform) {
        self.state.transform = self.state.transform.pre_concat(ts);
    }

    fn transform(&self) -> Transform {
        self.state.transform
    }

    fn clip_path(&mut self, path: &Path, rule: FillRule, anti_alias: bool) {
        let mut mask = match tiny_skia::Mask::new(self.pixmap.width(), self.pixmap.height()) {
            Some(v) => v,
            None => return,
        };

        mask.fill_path(path, rule, anti_alias, self.state.transform);

        if let Some(ref prev) = self.state.mask {
            for (a, b) in mask.data_mut().iter_mut().zip(prev.data()) {
                *a = ((*a as u16 * *b as u16 + 127) / 255) as u8;
            }
        }

        self.state.mask = Some(Rc::new(mask));
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, r: f32, paint: &Paint) {
        if let Some(path) = PathBuilder::from_circle(cx, cy, r) {
            self.render(&path, paint);
        }
    }

    fn draw_oval(&mut self, rect: Rect, paint: &Paint) {
        if let Some(path) = PathBuilder::from_oval(rect) {
            self.render(&path, paint);
        }
    }

    fn draw_rrect(&mut self, rect: Rect, rx: f32, ry: f32, paint: &Paint) {
        if let Some(path) = geom::rrect_to_path(rect, rx, ry) {
            self.render(&path, paint);
        }
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, paint: &Paint) {
        if let Some(path) = geom::line_to_path(x1, y1, x2, y2) {
            self.render(&path, paint);
        }
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        self.render(path, paint);
    }
}

impl std::fmt::Debug for PixmapCanvas<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("PixmapCanvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("save_count", &self.save_count())
            .finish()
    }
}

/// A recorded draw primitive.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum DrawCommand {
    Circle { cx: f32, cy: f32, r: f32 },
    Oval(Rect),
    RRect { rect: Rect, rx: f32, ry: f32 },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Path(Path),
}

/// A draw primitive with the state it was issued in.
#[derive(Clone, Debug)]
pub struct DrawCall {
    /// What was drawn.
    pub command: DrawCommand,
    /// How it was painted.
    pub paint: Paint,
    /// The canvas transform at the moment of drawing.
    pub transform: Transform,
}

impl DrawCall {
    /// Returns the device space bounds of the drawn shape.
    pub fn device_bounds(&self) -> Option<Rect> {
        let path = match self.command {
            DrawCommand::Circle { cx, cy, r } => PathBuilder::from_circle(cx, cy, r)?,
            DrawCommand::Oval(rect) => PathBuilder::from_oval(rect)?,
            DrawCommand::RRect { rect, rx, ry } => geom::rrect_to_path(rect, rx, ry)?,
            DrawCommand::Line { x1, y1, x2, y2 } => geom::line_to_path(x1, y1, x2, y2)?,
            DrawCommand::Path(ref path) => path.clone(),
        };

        Some(path.transform(self.transform)?.bounds())
    }
}

/// A recorded canvas operation.
#[allow(missing_docs)]
#[derive(Clone, Debug)]
pub enum Record {
    Save,
    SaveLayer(f32),
    Restore,
    Clip(Path),
    Draw(DrawCall),
}

/// A canvas that records operations instead of drawing.
#[derive(Clone, Default, Debug)]
pub struct RecordingCanvas {
    records: Vec<Record>,
    transform: Transform,
    stack: Vec<Transform>,
}

impl RecordingCanvas {
    /// Creates an empty recording.
    pub fn new() -> Self {
        RecordingCanvas::default()
    }

    /// Returns all recorded operations.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns recorded draw calls only.
    pub fn draws(&self) -> Vec<&DrawCall> {
        self.records
            .iter()
            .filter_map(|r| match r {
                Record::Draw(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    fn draw(&mut self, command: DrawCommand, paint: &Paint) {
        self.records.push(Record::Draw(DrawCall {
            command,
            paint: paint.clone(),
            transform: self.transform,
        }));
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.stack.push(self.transform);
        self.records.push(Record::Save);
    }

    fn save_layer(&mut self, opacity: f32) {
        self.stack.push(self.transform);
        self.records.push(Record::SaveLayer(opacity));
    }

    fn restore(&mut self) {
        if let Some(ts) = self.stack.pop() {
            self.transform = ts;
            self.records.push(Record::Restore);
        }
    }

    fn save_count(&self) -> usize {
        self.stack.len() + 1
    }

    fn concat(&mut self, ts: Transform) {
        self.transform = self.transform.pre_concat(ts);
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn clip_path(&mut self, path: &Path, _: FillRule, _: bool) {
        if let Some(path) = path.clone().transform(self.transform) {
            self.records.push(Record::Clip(path));
        }
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, r: f32, paint: &Paint) {
        self.draw(DrawCommand::Circle { cx, cy, r }, paint);
    }

    fn draw_oval(&mut self, rect: Rect, paint: &Paint) {
        self.draw(DrawCommand::Oval(rect), paint);
    }

    fn draw_rrect(&mut self, rect: Rect, rx: f32, ry: f32, paint: &Paint) {
        self.draw(DrawCommand::RRect { rect, rx, ry }, paint);
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, paint: &Paint) {
        self.draw(DrawCommand::Line { x1, y1, x2, y2 }, paint);
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        self.draw(DrawCommand::Path(path.clone()), paint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_fill() -> Paint {
        Paint {
            source: PaintSource::Color(tiny_skia::Color::from_rgba8(255, 0, 0, 255)),
            style: PaintStyle::Fill(FillRule::Winding),
            anti_alias: false,
        }
    }

    #[test]
    fn restore_to_count() {
        let mut canvas = RecordingCanvas::new();
        assert_eq!(canvas.save_count(), 1);
        canvas.save();
        canvas.concat(Transform::from_translate(5.0, 5.0));
        canvas.save_layer(0.5);
        assert_eq!(canvas.save_count(), 3);

        canvas.restore_to_count(1);
        assert_eq!(canvas.save_count(), 1);
        assert_eq!(canvas.transform(), Transform::identity());

        // Extra restores are ignored.
        canvas.restore();
        assert_eq!(canvas.save_count(), 1);
    }

    #[test]
    fn union() {
        let a = PathBuilder::from_rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap());
        let b = PathBuilder::from_rect(Rect::from_xywh(20.0, 20.0, 10.0, 10.0).unwrap());
        let path = union_paths(vec![a, b]).unwrap();
        assert_eq!(path.bounds(), Rect::from_ltrb(0.0, 0.0, 30.0, 30.0).unwrap());
        assert!(union_paths(Vec::new()).is_none());
    }

    #[test]
    fn pixmap_fill() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        let mut canvas = PixmapCanvas::new(&mut pixmap);
        canvas.concat(Transform::from_translate(5.0, 5.0));
        canvas.draw_rrect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap(), 0.0, 0.0, &red_fill());

        let inside = pixmap.pixel(10, 10).unwrap();
        assert_eq!((inside.red(), inside.alpha()), (255, 255));
        assert_eq!(pixmap.pixel(2, 2).unwrap().alpha(), 0);
    }

    #[test]
    fn pixmap_clip() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        let mut canvas = PixmapCanvas::new(&mut pixmap);
        canvas.save();
        let clip = PathBuilder::from_rect(Rect::from_xywh(0.0, 0.0, 10.0, 20.0).unwrap());
        canvas.clip_path(&clip, FillRule::Winding, false);
        canvas.draw_rrect(Rect::from_xywh(0.0, 0.0, 20.0, 20.0).unwrap(), 0.0, 0.0, &red_fill());
        canvas.restore();

        assert_eq!(pixmap.pixel(5, 5).unwrap().alpha(), 255);
        assert_eq!(pixmap.pixel(15, 5).unwrap().alpha(), 0);
    }

    #[test]
    fn pixmap_layer() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        let mut canvas = PixmapCanvas::new(&mut pixmap);
        canvas.save_layer(0.5);
        canvas.draw_rrect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap(), 0.0, 0.0, &red_fill());
        canvas.restore();

        let alpha = pixmap.pixel(5, 5).unwrap().alpha();
        assert!((126..=129).contains(&alpha), "{}", alpha);
    }
}
