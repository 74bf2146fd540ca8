// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::stream::parse_whole;
use crate::{Color, Error, Stream};

/// Representation of the fallback part of the [`<paint>`] type.
///
/// Used by the [`Paint::FuncIRI`](enum.Paint.html#variant.FuncIRI).
///
/// [`<paint>`]: https://www.w3.org/TR/SVG2/painting.html#SpecifyingPaint
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PaintFallback {
    /// The `none` value.
    None,
    /// The `currentColor` value.
    CurrentColor,
    /// [`<color>`](https://www.w3.org/TR/css-color-3/) value.
    Color(Color),
}

/// Representation of the [`<paint>`] type.
///
/// The `FuncIRI` variant keeps the referenced element ID only.
/// It is resolved by the renderer at the moment of painting.
///
/// [`<paint>`]: https://www.w3.org/TR/SVG2/painting.html#SpecifyingPaint
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Paint {
    /// The `none` value.
    None,
    /// The `inherit` value.
    Inherit,
    /// The `currentColor` value.
    CurrentColor,
    /// [`<color>`](https://www.w3.org/TR/css-color-3/) value.
    Color(Color),
    /// [`<FuncIRI>`](https://www.w3.org/TR/SVG11/types.html#DataTypeFuncIRI) value
    /// with an optional fallback.
    FuncIRI(String, Option<PaintFallback>),
}

impl std::str::FromStr for Paint {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_whole(text, Stream::parse_paint)
    }
}

impl<'a> Stream<'a> {
    /// Parses a paint.
    ///
    /// # Errors
    ///
    ///  - Returns an error if a color has an invalid format.
    ///  - Returns an error if `<FuncIRI>` fallback is neither a keyword nor a color.
    pub fn parse_paint(&mut self) -> Result<Paint, Error> {
        self.attempt(|s| {
            s.skip_spaces();

            if s.consume_keyword("none") {
                return Ok(Paint::None);
            }

            if s.consume_keyword("inherit") {
                return Ok(Paint::Inherit);
            }

            if s.consume_keyword("currentColor") {
                return Ok(Paint::CurrentColor);
            }

            if s.starts_with("url(") {
                let link = s.parse_func_iri()?.to_string();

                s.skip_spaces();
                let fallback = if s.at_end() {
                    None
                } else if s.consume_keyword("none") {
                    Some(PaintFallback::None)
                } else if s.consume_keyword("currentColor") {
                    Some(PaintFallback::CurrentColor)
                } else {
                    Some(PaintFallback::Color(s.parse_color()?))
                };

                return Ok(Paint::FuncIRI(link, fallback));
            }

            s.parse_color().map(Paint::Color)
        })
    }
}
