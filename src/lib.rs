// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgscene` loads a static SVG document into a tree of nodes
and renders it onto a [`Canvas`].

```no_run
let doc = svgscene::Document::from_str("<svg width='10' height='10'/>").unwrap();
let (w, h) = doc.intrinsic_size();
let mut pixmap = svgscene::tiny_skia::Pixmap::new(w as u32, h as u32).unwrap();
doc.render(&mut svgscene::PixmapCanvas::new(&mut pixmap));
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod attributes;
mod canvas;
mod context;
mod document;
mod error;
mod geom;
pub mod node;
mod options;
pub mod paint;
pub mod presentation;
mod units;

pub use canvas::{
    union_paths, Canvas, DrawCall, DrawCommand, PixmapCanvas, Record, RecordingCanvas,
};
pub use context::{PresentationTarget, RenderContext, ResolveContext};
pub use document::Document;
pub use error::Error;
pub use node::{ElementId, Node, NodeKind};
pub use options::Options;
pub use units::{LengthContext, LengthType};

pub use roxmltree;
pub use svgvalues;
pub use tiny_skia;

trait OptionLog {
    fn log_none<F: FnOnce()>(self, f: F) -> Self;
}

impl<T> OptionLog for Option<T> {
    #[inline]
    fn log_none<F: FnOnce()>(self, f: F) -> Self {
        self.or_else(|| {
            f();
            None
        })
    }
}
