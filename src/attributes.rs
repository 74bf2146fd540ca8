// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Attribute name lookup and value parsing.

use std::rc::Rc;

use svgvalues::{
    AspectRatio, ClipPath, Color, DashArray, Error, FillRule, Length, LineCap, LineJoin, Paint,
    Points, SpreadMethod, Stream, Transform, Units, ViewBox, Visibility,
};

use crate::node::Node;

/// Supported attributes.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AId {
    ClipPath,
    ClipPathUnits,
    ClipRule,
    Color,
    Cx,
    Cy,
    D,
    Fill,
    FillOpacity,
    FillRule,
    Fx,
    Fy,
    GradientTransform,
    GradientUnits,
    Height,
    Href,
    Offset,
    Opacity,
    PatternContentUnits,
    PatternTransform,
    PatternUnits,
    Points,
    PreserveAspectRatio,
    R,
    Rx,
    Ry,
    SpreadMethod,
    StopColor,
    StopOpacity,
    Stroke,
    StrokeDasharray,
    StrokeDashoffset,
    StrokeLinecap,
    StrokeLinejoin,
    StrokeMiterlimit,
    StrokeOpacity,
    StrokeWidth,
    Style,
    Transform,
    ViewBox,
    Visibility,
    Width,
    X,
    X1,
    X2,
    Y,
    Y1,
    Y2,
}

/// A parsed attribute value.
#[allow(missing_docs)]
#[derive(Clone, Debug)]
pub enum AttributeValue {
    AspectRatio(AspectRatio),
    ClipPath(ClipPath),
    Color(Color),
    DashArray(DashArray),
    FillRule(FillRule),
    Link(String),
    Length(Length),
    LineCap(LineCap),
    LineJoin(LineJoin),
    Number(f64),
    Paint(Paint),
    Path(Rc<tiny_skia::Path>),
    Points(Points),
    SpreadMethod(SpreadMethod),
    Transform(Transform),
    Units(Units),
    ViewBox(ViewBox),
    Visibility(Visibility),
}

type Setter = fn(&mut Node, AId, &str) -> bool;

// Must be sorted by name, byte-wise.
#[rustfmt::skip]
static ATTRIBUTES: &[(&str, AId, Setter)] = &[
    ("clip-path",           AId::ClipPath,              set_clip_path),
    ("clip-rule",           AId::ClipRule,              set_fill_rule),
    ("clipPathUnits",       AId::ClipPathUnits,         set_units),
    ("color",               AId::Color,                 set_color),
    ("cx",                  AId::Cx,                    set_length),
    ("cy",                  AId::Cy,                    set_length),
    ("d",                   AId::D,                     set_path),
    ("fill",                AId::Fill,                  set_paint),
    ("fill-opacity",        AId::FillOpacity,           set_opacity),
    ("fill-rule",           AId::FillRule,              set_fill_rule),
    ("fx",                  AId::Fx,                    set_length),
    ("fy",                  AId::Fy,                    set_length),
    ("gradientTransform",   AId::GradientTransform,     set_transform),
    ("gradientUnits",       AId::GradientUnits,         set_units),
    ("height",              AId::Height,                set_length),
    ("href",                AId::Href,                  set_link),
    ("offset",              AId::Offset,                set_length),
    ("opacity",             AId::Opacity,               set_opacity),
    ("patternContentUnits", AId::PatternContentUnits,   set_units),
    ("patternTransform",    AId::PatternTransform,      set_transform),
    ("patternUnits",        AId::PatternUnits,          set_units),
    ("points",              AId::Points,                set_points),
    ("preserveAspectRatio", AId::PreserveAspectRatio,   set_aspect_ratio),
    ("r",                   AId::R,                     set_length),
    ("rx",                  AId::Rx,                    set_length),
    ("ry",                  AId::Ry,                    set_length),
    ("spreadMethod",        AId::SpreadMethod,          set_spread_method),
    ("stop-color",          AId::StopColor,             set_color),
    ("stop-opacity",        AId::StopOpacity,           set_opacity),
    ("stroke",              AId::Stroke,                set_paint),
    ("stroke-dasharray",    AId::StrokeDasharray,       set_dash_array),
    ("stroke-dashoffset",   AId::StrokeDashoffset,      set_length),
    ("stroke-linecap",      AId::StrokeLinecap,         set_line_cap),
    ("stroke-linejoin",     AId::StrokeLinejoin,        set_line_join),
    ("stroke-miterlimit",   AId::StrokeMiterlimit,      set_number),
    ("stroke-opacity",      AId::StrokeOpacity,         set_opacity),
    ("stroke-width",        AId::StrokeWidth,           set_length),
    ("style",               AId::Style,                 set_style),
    ("transform",           AId::Transform,             set_transform),
    ("viewBox",             AId::ViewBox,               set_view_box),
    ("visibility",          AId::Visibility,            set_visibility),
    ("width",               AId::Width,                 set_length),
    ("x",                   AId::X,                     set_length),
    ("x1",                  AId::X1,                    set_length),
    ("x2",                  AId::X2,                    set_length),
    ("xlink:href",          AId::Href,                  set_link),
    ("y",                   AId::Y,                     set_length),
    ("y1",                  AId::Y1,                    set_length),
    ("y2",                  AId::Y2,                    set_length),
];

impl AId {
    /// Looks up an attribute by its name.
    ///
    /// Names are case-sensitive.
    pub fn from_str(name: &str) -> Option<AId> {
        lookup(name).map(|(_, aid, _)| *aid)
    }
}

fn lookup(name: &str) -> Option<&'static (&'static str, AId, Setter)> {
    ATTRIBUTES
        .binary_search_by(|(n, _, _)| n.as_bytes().cmp(name.as_bytes()))
        .ok()
        .map(|idx| &ATTRIBUTES[idx])
}

/// Parses `value` and applies it to `node`.
///
/// Unknown attributes and malformed values are skipped.
/// Returns `true` when the node accepted the value.
pub fn dispatch(node: &mut Node, name: &str, value: &str) -> bool {
    match lookup(name) {
        Some((_, aid, setter)) => setter(node, *aid, value),
        None => {
            log::debug!("Unsupported attribute '{}'. Skipped.", name);
            false
        }
    }
}

/// Splits a `style` attribute into name/value pairs.
///
/// Declarations without a colon are skipped.
pub fn split_style(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.split(';').filter_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some((name, value.trim()))
    })
}

fn set_style(node: &mut Node, _: AId, text: &str) -> bool {
    for (name, value) in split_style(text) {
        dispatch(node, name, value);
    }

    true
}

fn apply(node: &mut Node, aid: AId, text: &str, value: Result<AttributeValue, Error>) -> bool {
    match value {
        Ok(value) => {
            let ok = node.set_attribute(aid, value);
            if !ok {
                log::debug!("'{:?}' is not supported by '{}'. Skipped.", aid, node.tag_name());
            }

            ok
        }
        Err(e) => {
            log::debug!("Failed to parse {:?} value: '{}' cause {}.", aid, text, e);
            false
        }
    }
}

macro_rules! setter {
    ($name:ident, $parse:ident, $map:expr) => {
        fn $name(node: &mut Node, aid: AId, text: &str) -> bool {
            let mut s = Stream::from(text);
            let value = s.$parse().map($map);
            apply(node, aid, text, value)
        }
    };
}

setter!(set_aspect_ratio, parse_aspect_ratio, AttributeValue::AspectRatio);
setter!(set_clip_path, parse_clip_path, AttributeValue::ClipPath);
setter!(set_color, parse_color, AttributeValue::Color);
setter!(set_dash_array, parse_dash_array, AttributeValue::DashArray);
setter!(set_fill_rule, parse_fill_rule, AttributeValue::FillRule);
setter!(set_length, parse_length, AttributeValue::Length);
setter!(set_line_cap, parse_line_cap, AttributeValue::LineCap);
setter!(set_line_join, parse_line_join, AttributeValue::LineJoin);
setter!(set_link, parse_iri, |v: &str| AttributeValue::Link(v.to_string()));
setter!(set_number, parse_number, AttributeValue::Number);
setter!(set_opacity, parse_number, |v: f64| AttributeValue::Number(v.clamp(0.0, 1.0)));
setter!(set_paint, parse_paint, AttributeValue::Paint);
setter!(set_points, parse_points, AttributeValue::Points);
setter!(set_spread_method, parse_spread_method, AttributeValue::SpreadMethod);
setter!(set_transform, parse_transform, AttributeValue::Transform);
setter!(set_units, parse_units, AttributeValue::Units);
setter!(set_view_box, parse_view_box, AttributeValue::ViewBox);
setter!(set_visibility, parse_visibility, AttributeValue::Visibility);

fn set_path(node: &mut Node, aid: AId, text: &str) -> bool {
    match parse_path_data(text) {
        Some(path) => apply(node, aid, text, Ok(AttributeValue::Path(Rc::new(path)))),
        None => {
            log::debug!("Path data '{}' has no segments. Skipped.", text);
            false
        }
    }
}

/// Converts path data into a path.
///
/// Like in browsers, everything after the first error is ignored.
pub(crate) fn parse_path_data(text: &str) -> Option<tiny_skia::Path> {
    let mut builder = tiny_skia::PathBuilder::new();
    for segment in svgtypes::SimplifyingPathParser::from(text) {
        let segment = match segment {
            Ok(v) => v,
            Err(_) => break,
        };

        match segment {
            svgtypes::SimplePathSegment::MoveTo { x, y } => {
                builder.move_to(x as f32, y as f32);
            }
            svgtypes::SimplePathSegment::LineTo { x, y } => {
                builder.line_to(x as f32, y as f32);
            }
            svgtypes::SimplePathSegment::Quadratic { x1, y1, x, y } => {
                builder.quad_to(x1 as f32, y1 as f32, x as f32, y as f32);
            }
            svgtypes::SimplePathSegment::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                builder.cubic_to(
                    x1 as f32, y1 as f32, x2 as f32, y2 as f32, x as f32, y as f32,
                );
            }
            svgtypes::SimplePathSegment::ClosePath => {
                builder.close();
            }
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ElementId;

    #[test]
    fn table_is_sorted() {
        for pair in ATTRIBUTES.windows(2) {
            assert!(pair[0].0.as_bytes() < pair[1].0.as_bytes(), "{} >= {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(AId::from_str("stroke-width"), Some(AId::StrokeWidth));
        assert_eq!(AId::from_str("xlink:href"), Some(AId::Href));
        assert_eq!(AId::from_str("href"), Some(AId::Href));
        assert_eq!(AId::from_str("viewbox"), None);
        assert_eq!(AId::from_str("font-size"), None);
    }

    #[test]
    fn style_split() {
        let pairs: Vec<_> = split_style("fill:red; stroke : blue;;junk; :x ;opacity:0.5").collect();
        assert_eq!(pairs, vec![("fill", "red"), ("stroke", "blue"), ("opacity", "0.5")]);
    }

    #[test]
    fn style_value_keeps_colons() {
        let pairs: Vec<_> = split_style("clip-path: url(#a:b)").collect();
        assert_eq!(pairs, vec![("clip-path", "url(#a:b)")]);
    }

    #[test]
    fn dispatch_skips_malformed_values() {
        let mut node = Node::new(ElementId::Rect);
        assert!(!dispatch(&mut node, "width", "abc"));
        assert!(!dispatch(&mut node, "unknown", "1"));
        assert!(dispatch(&mut node, "width", "10px"));
    }

    #[test]
    fn path_data() {
        let path = parse_path_data("M 10 20 L 30 40 Z").unwrap();
        assert_eq!(path.bounds(), tiny_skia::Rect::from_ltrb(10.0, 20.0, 30.0, 40.0).unwrap());
        assert!(parse_path_data("qwe").is_none());
    }
}
