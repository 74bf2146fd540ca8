// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::io::Read;
use std::rc::Rc;

use svgvalues::LengthUnit;

use crate::attributes;
use crate::context::{RenderContext, ResolveContext};
use crate::node::{ElementId, IdMap, Node, NodeKind};
use crate::units::{LengthContext, LengthType};
use crate::{Canvas, Error, Options};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XML_NAMESPACE_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// A loaded SVG document.
///
/// The node tree is immutable and can be rendered any number of times.
#[derive(Clone, Debug)]
pub struct Document {
    root: Option<Rc<Node>>,
    ids: IdMap,
    options: Options,
    container_size: (f64, f64),
}

impl Document {
    /// Builds a document from a parsed XML tree using default options.
    pub fn from_source(xml: &roxmltree::Document) -> Self {
        Self::from_source_with(xml, &Options::default())
    }

    /// Builds a document from a parsed XML tree.
    pub fn from_source_with(xml: &roxmltree::Document, opt: &Options) -> Self {
        let mut builder = Builder::default();
        let root = builder.build(xml.root_element());

        let mut doc = Document {
            root,
            ids: builder.into_id_map(),
            options: opt.clone(),
            container_size: opt.default_size,
        };
        doc.container_size = doc.default_container_size();
        doc
    }

    /// Parses a document from a string using default options.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self, Error> {
        Self::from_str_with(text, &Options::default())
    }

    /// Parses a document from a string.
    pub fn from_str_with(text: &str, opt: &Options) -> Result<Self, Error> {
        let xml_opt = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };

        let xml = roxmltree::Document::parse_with_options(text, xml_opt)?;
        Ok(Self::from_source_with(&xml, opt))
    }

    /// Parses a document from UTF-8 data using default options.
    pub fn from_data(data: &[u8]) -> Result<Self, Error> {
        Self::from_data_with(data, &Options::default())
    }

    /// Parses a document from UTF-8 data.
    pub fn from_data_with(data: &[u8], opt: &Options) -> Result<Self, Error> {
        let text = std::str::from_utf8(data).map_err(|_| Error::NotAnUtf8Str)?;
        Self::from_str_with(text, opt)
    }

    /// Reads and parses a document using default options.
    pub fn from_stream<R: Read>(mut reader: R) -> Result<Self, Error> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_data(&data)
    }

    /// Returns the root node.
    ///
    /// `None` when the root element is not supported.
    pub fn root(&self) -> Option<&Rc<Node>> {
        self.root.as_ref()
    }

    /// Looks up a node by its `id`.
    pub fn find_node_by_id(&self, id: &str) -> Option<Rc<Node>> {
        self.ids.get(id).cloned()
    }

    /// Returns the options the document was loaded with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns a resolving state for the current container size.
    pub fn resolve_context(&self) -> ResolveContext<'_> {
        ResolveContext::new(&self.ids, self.length_context())
    }

    fn length_context(&self) -> LengthContext {
        LengthContext::new(self.container_size, self.options.dpi)
    }

    /// Returns the size declared by the root `svg` element.
    ///
    /// Zero when the root is not an `svg` element
    /// or when its width or height is a percentage.
    pub fn intrinsic_size(&self) -> (f64, f64) {
        let svg = match self.root.as_deref().map(|n| n.kind()) {
            Some(NodeKind::Svg(v)) => v,
            _ => return (0.0, 0.0),
        };

        if svg.width.unit == LengthUnit::Percent || svg.height.unit == LengthUnit::Percent {
            return (0.0, 0.0);
        }

        let ctx = self.length_context();
        (
            ctx.resolve(svg.width, LengthType::Horizontal),
            ctx.resolve(svg.height, LengthType::Vertical),
        )
    }

    fn default_container_size(&self) -> (f64, f64) {
        let (w, h) = self.intrinsic_size();
        if w > 0.0 && h > 0.0 {
            return (w, h);
        }

        match self.root.as_deref().map(|n| n.kind()) {
            Some(NodeKind::Svg(svg)) => match svg.view_box {
                Some(vb) if vb.is_valid() => (vb.w, vb.h),
                _ => self.options.default_size,
            },
            _ => self.options.default_size,
        }
    }

    /// Returns the size of the area the document is rendered into.
    pub fn container_size(&self) -> (f64, f64) {
        self.container_size
    }

    /// Sets the size of the area the document is rendered into.
    ///
    /// Percentage lengths of the root element resolve against it.
    pub fn set_container_size(&mut self, size: (f64, f64)) {
        self.container_size = size;
    }

    /// Renders the document onto a canvas.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        let root = match self.root {
            Some(ref v) => v,
            None => return,
        };

        let mut ctx = RenderContext::new(canvas, &self.ids, self.length_context());
        root.render(&mut ctx);
    }
}

impl std::str::FromStr for Document {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Error> {
        Document::from_str(text)
    }
}

#[derive(Default)]
struct Builder {
    // Nodes by id, with their position in document order.
    ids: HashMap<String, (usize, Rc<Node>)>,
    count: usize,
}

impl Builder {
    /// Keeps the first node in document order for each id.
    fn into_id_map(self) -> IdMap {
        self.ids.into_iter().map(|(id, (_, node))| (id, node)).collect()
    }

    fn build(&mut self, xml: roxmltree::Node) -> Option<Rc<Node>> {
        if !xml.is_element() {
            return None;
        }

        match xml.tag_name().namespace() {
            None | Some(SVG_NS) => {}
            _ => return None,
        }

        let tag = match ElementId::from_str(xml.tag_name().name()) {
            Some(v) => v,
            None => {
                log::debug!("Unsupported element '{}'. Skipped.", xml.tag_name().name());
                return None;
            }
        };

        let order = self.count;
        self.count += 1;

        let mut node = Node::new(tag);

        let mut style = None;
        for attr in xml.attributes() {
            match attr.namespace() {
                None | Some(SVG_NS) | Some(XLINK_NS) | Some(XML_NAMESPACE_NS) => {}
                _ => continue,
            }

            match attr.name() {
                "id" => {}
                // Applied last, so it overrides attributes.
                "style" => style = Some(attr.value()),
                name => {
                    attributes::dispatch(&mut node, name, attr.value());
                }
            }
        }

        if let Some(style) = style {
            attributes::dispatch(&mut node, "style", style);
        }

        for child in xml.children().filter(|n| n.is_element()) {
            if let Some(child) = self.build(child) {
                node.append_child(child);
            }
        }

        let node = Rc::new(node);
        if let Some(id) = xml.attribute("id") {
            let entry = self.ids.entry(id.to_string()).or_insert((order, node.clone()));
            if order < entry.0 {
                *entry = (order, node.clone());
            }
        }

        Some(node)
    }
}
