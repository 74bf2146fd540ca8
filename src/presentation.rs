// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Presentation attributes and their inheritance.

use svgvalues::{ClipPath, Color, DashArray, FillRule, Length, LineCap, LineJoin, Paint, Visibility};

use crate::attributes::{AId, AttributeValue};
use crate::paint;

/// Presentation attributes declared on a single element.
///
/// `None` means the attribute was not set.
#[allow(missing_docs)]
#[derive(Clone, Default, Debug)]
pub struct PresentationAttributes {
    pub fill: Option<Paint>,
    pub fill_opacity: Option<f64>,
    pub fill_rule: Option<FillRule>,
    pub clip_rule: Option<FillRule>,
    pub stroke: Option<Paint>,
    pub stroke_dasharray: Option<DashArray>,
    pub stroke_dashoffset: Option<Length>,
    pub stroke_linecap: Option<LineCap>,
    pub stroke_linejoin: Option<LineJoin>,
    pub stroke_miterlimit: Option<f64>,
    pub stroke_opacity: Option<f64>,
    pub stroke_width: Option<Length>,
    pub visibility: Option<Visibility>,
    pub color: Option<Color>,

    // Not inherited.
    pub opacity: Option<f64>,
    pub clip_path: Option<ClipPath>,
}

impl PresentationAttributes {
    /// Stores a presentation attribute.
    ///
    /// Returns the value back when it isn't a presentation attribute.
    pub fn set_attribute(&mut self, aid: AId, value: AttributeValue) -> Result<(), AttributeValue> {
        match (aid, value) {
            (AId::Fill, AttributeValue::Paint(v)) => self.fill = Some(v),
            (AId::FillOpacity, AttributeValue::Number(v)) => self.fill_opacity = Some(v),
            (AId::FillRule, AttributeValue::FillRule(v)) => self.fill_rule = Some(v),
            (AId::ClipRule, AttributeValue::FillRule(v)) => self.clip_rule = Some(v),
            (AId::Stroke, AttributeValue::Paint(v)) => self.stroke = Some(v),
            (AId::StrokeDasharray, AttributeValue::DashArray(v)) => self.stroke_dasharray = Some(v),
            (AId::StrokeDashoffset, AttributeValue::Length(v)) => self.stroke_dashoffset = Some(v),
            (AId::StrokeLinecap, AttributeValue::LineCap(v)) => self.stroke_linecap = Some(v),
            (AId::StrokeLinejoin, AttributeValue::LineJoin(v)) => self.stroke_linejoin = Some(v),
            (AId::StrokeMiterlimit, AttributeValue::Number(v)) => self.stroke_miterlimit = Some(v),
            (AId::StrokeOpacity, AttributeValue::Number(v)) => self.stroke_opacity = Some(v),
            (AId::StrokeWidth, AttributeValue::Length(v)) => self.stroke_width = Some(v),
            (AId::Visibility, AttributeValue::Visibility(v)) => self.visibility = Some(v),
            (AId::Color, AttributeValue::Color(v)) => self.color = Some(v),
            (AId::Opacity, AttributeValue::Number(v)) => self.opacity = Some(v),
            (AId::ClipPath, AttributeValue::ClipPath(v)) => self.clip_path = Some(v),
            (_, value) => return Err(value),
        }

        Ok(())
    }

    /// Checks that at least one inherited attribute is set.
    pub fn has_inherited(&self) -> bool {
        self.fill.is_some()
            || self.fill_opacity.is_some()
            || self.fill_rule.is_some()
            || self.clip_rule.is_some()
            || self.stroke.is_some()
            || self.stroke_dasharray.is_some()
            || self.stroke_dashoffset.is_some()
            || self.stroke_linecap.is_some()
            || self.stroke_linejoin.is_some()
            || self.stroke_miterlimit.is_some()
            || self.stroke_opacity.is_some()
            || self.stroke_width.is_some()
            || self.visibility.is_some()
            || self.color.is_some()
    }

    /// Returns the element opacity. Defaults to 1.
    pub fn opacity(&self) -> f64 {
        self.opacity.unwrap_or(1.0)
    }
}

/// Fully resolved inherited attributes.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct InheritedAttributes {
    pub fill: Paint,
    pub fill_opacity: f64,
    pub fill_rule: FillRule,
    pub clip_rule: FillRule,
    pub stroke: Paint,
    pub stroke_dasharray: DashArray,
    pub stroke_dashoffset: Length,
    pub stroke_linecap: LineCap,
    pub stroke_linejoin: LineJoin,
    pub stroke_miterlimit: f64,
    pub stroke_opacity: f64,
    pub stroke_width: Length,
    pub visibility: Visibility,
    pub color: Color,
}

impl Default for InheritedAttributes {
    fn default() -> Self {
        InheritedAttributes {
            fill: Paint::Color(Color::black()),
            fill_opacity: 1.0,
            fill_rule: FillRule::NonZero,
            clip_rule: FillRule::NonZero,
            stroke: Paint::None,
            stroke_dasharray: DashArray::None,
            stroke_dashoffset: Length::zero(),
            stroke_linecap: LineCap::Butt,
            stroke_linejoin: LineJoin::Miter,
            stroke_miterlimit: 4.0,
            stroke_opacity: 1.0,
            stroke_width: Length::new_number(1.0),
            visibility: Visibility::Visible,
            color: Color::black(),
        }
    }
}

impl InheritedAttributes {
    /// Merges explicitly set attributes over the inherited ones.
    ///
    /// `inherit` keywords keep the inherited value.
    pub fn apply(&mut self, attrs: &PresentationAttributes) {
        if let Some(ref v) = attrs.fill {
            if *v != Paint::Inherit {
                self.fill = v.clone();
            }
        }

        if let Some(ref v) = attrs.stroke {
            if *v != Paint::Inherit {
                self.stroke = v.clone();
            }
        }

        if let Some(ref v) = attrs.stroke_dasharray {
            if *v != DashArray::Inherit {
                self.stroke_dasharray = v.clone();
            }
        }

        set_resolved(&mut self.fill_rule, attrs.fill_rule, FillRule::Inherit);
        set_resolved(&mut self.clip_rule, attrs.clip_rule, FillRule::Inherit);
        set_resolved(&mut self.stroke_linecap, attrs.stroke_linecap, LineCap::Inherit);
        set_resolved(&mut self.stroke_linejoin, attrs.stroke_linejoin, LineJoin::Inherit);
        set_resolved(&mut self.visibility, attrs.visibility, Visibility::Inherit);

        if let Some(v) = attrs.fill_opacity {
            self.fill_opacity = v;
        }

        if let Some(v) = attrs.stroke_opacity {
            self.stroke_opacity = v;
        }

        if let Some(v) = attrs.stroke_miterlimit {
            self.stroke_miterlimit = v;
        }

        if let Some(v) = attrs.stroke_dashoffset {
            self.stroke_dashoffset = v;
        }

        if let Some(v) = attrs.stroke_width {
            self.stroke_width = v;
        }

        if let Some(v) = attrs.color {
            self.color = v;
        }
    }

    /// Checks that shapes using these attributes are visible.
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}

fn set_resolved<T: Copy + PartialEq>(field: &mut T, value: Option<T>, inherit: T) {
    if let Some(v) = value {
        if v != inherit {
            *field = v;
        }
    }
}

/// Inherited attributes together with the paints they resolved to.
#[derive(Clone, Default, Debug)]
pub struct PresentationContext {
    /// Inherited attributes.
    pub attributes: InheritedAttributes,
    /// Current fill paint.
    pub fill: Option<paint::Paint>,
    /// Current stroke paint.
    pub stroke: Option<paint::Paint>,
}
