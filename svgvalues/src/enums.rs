// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::stream::parse_whole;
use crate::{Error, Stream};

/// A `fill-rule` or `clip-rule` value.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FillRule {
    NonZero,
    EvenOdd,
    Inherit,
}

/// A `stroke-linecap` value.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineCap {
    Butt,
    Round,
    Square,
    Inherit,
}

/// A `stroke-linejoin` value.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
    Inherit,
}

/// A `visibility` value.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Visibility {
    Visible,
    Hidden,
    Collapse,
    Inherit,
}

/// A `spreadMethod` value.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SpreadMethod {
    Pad,
    Reflect,
    Repeat,
}

/// A coordinate system of `gradientUnits`, `patternUnits`,
/// `patternContentUnits` and `clipPathUnits`.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Units {
    UserSpaceOnUse,
    ObjectBoundingBox,
}

const FILL_RULES: &[(&str, FillRule)] = &[
    ("nonzero", FillRule::NonZero),
    ("evenodd", FillRule::EvenOdd),
    ("inherit", FillRule::Inherit),
];

const LINE_CAPS: &[(&str, LineCap)] = &[
    ("butt", LineCap::Butt),
    ("round", LineCap::Round),
    ("square", LineCap::Square),
    ("inherit", LineCap::Inherit),
];

const LINE_JOINS: &[(&str, LineJoin)] = &[
    ("miter", LineJoin::Miter),
    ("round", LineJoin::Round),
    ("bevel", LineJoin::Bevel),
    ("inherit", LineJoin::Inherit),
];

const VISIBILITIES: &[(&str, Visibility)] = &[
    ("visible", Visibility::Visible),
    ("hidden", Visibility::Hidden),
    ("collapse", Visibility::Collapse),
    ("inherit", Visibility::Inherit),
];

const SPREAD_METHODS: &[(&str, SpreadMethod)] = &[
    ("pad", SpreadMethod::Pad),
    ("reflect", SpreadMethod::Reflect),
    ("repeat", SpreadMethod::Repeat),
];

const UNITS: &[(&str, Units)] = &[
    ("userSpaceOnUse", Units::UserSpaceOnUse),
    ("objectBoundingBox", Units::ObjectBoundingBox),
];

impl<'a> Stream<'a> {
    /// Parses a `fill-rule`/`clip-rule` keyword.
    pub fn parse_fill_rule(&mut self) -> Result<FillRule, Error> {
        self.parse_keyword_from(FILL_RULES)
    }

    /// Parses a `stroke-linecap` keyword.
    pub fn parse_line_cap(&mut self) -> Result<LineCap, Error> {
        self.parse_keyword_from(LINE_CAPS)
    }

    /// Parses a `stroke-linejoin` keyword.
    pub fn parse_line_join(&mut self) -> Result<LineJoin, Error> {
        self.parse_keyword_from(LINE_JOINS)
    }

    /// Parses a `visibility` keyword.
    pub fn parse_visibility(&mut self) -> Result<Visibility, Error> {
        self.parse_keyword_from(VISIBILITIES)
    }

    /// Parses a `spreadMethod` keyword.
    pub fn parse_spread_method(&mut self) -> Result<SpreadMethod, Error> {
        self.parse_keyword_from(SPREAD_METHODS)
    }

    /// Parses a `*Units` keyword.
    pub fn parse_units(&mut self) -> Result<Units, Error> {
        self.parse_keyword_from(UNITS)
    }

    fn parse_keyword_from<T: Copy>(&mut self, list: &[(&str, T)]) -> Result<T, Error> {
        self.attempt(|s| {
            s.skip_spaces();
            let start = s.pos();
            let ident = s.ident();
            list.iter()
                .find(|(name, _)| *name == ident)
                .map(|(_, value)| *value)
                .ok_or_else(|| s.unexpected_at(start))
        })
    }
}

macro_rules! impl_from_str {
    ($name:ident, $method:ident) => {
        impl std::str::FromStr for $name {
            type Err = Error;

            fn from_str(text: &str) -> Result<Self, Error> {
                parse_whole(text, Stream::$method)
            }
        }
    };
}

impl_from_str!(FillRule, parse_fill_rule);
impl_from_str!(LineCap, parse_line_cap);
impl_from_str!(LineJoin, parse_line_join);
impl_from_str!(Visibility, parse_visibility);
impl_from_str!(SpreadMethod, parse_spread_method);
impl_from_str!(Units, parse_units);
