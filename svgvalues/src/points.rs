// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{Error, Stream};

/// Representation of the [`<list-of-points>`] type.
///
/// [`<list-of-points>`]: https://www.w3.org/TR/SVG11/shapes.html#PointsBNF
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Points(pub Vec<(f64, f64)>);

impl std::ops::Deref for Points {
    type Target = [(f64, f64)];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::str::FromStr for Points {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut s = Stream::from(text);
        s.parse_points()
    }
}

/// A pull-based [`<list-of-points>`] parser.
///
/// Parsing stops on the first invalid coordinate or an odd one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PointsParser<'a>(Stream<'a>);

impl<'a> From<&'a str> for PointsParser<'a> {
    #[inline]
    fn from(v: &'a str) -> Self {
        PointsParser(Stream::from(v))
    }
}

impl<'a> Iterator for PointsParser<'a> {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.at_end() {
            None
        } else {
            let x = match self.0.parse_list_number() {
                Ok(x) => x,
                Err(_) => return None,
            };

            let y = match self.0.parse_list_number() {
                Ok(y) => y,
                Err(_) => return None,
            };

            Some((x, y))
        }
    }
}

impl<'a> Stream<'a> {
    /// Parses a list of points.
    ///
    /// Like in browsers, an odd coordinate and everything after an invalid
    /// coordinate are ignored. At least one point is required.
    pub fn parse_points(&mut self) -> Result<Points, Error> {
        self.attempt(|s| {
            let mut parser = PointsParser(*s);
            let points: Vec<_> = (&mut parser).collect();
            if points.is_empty() {
                return Err(Error::InvalidValue);
            }

            s.finish();
            Ok(Points(points))
        })
    }
}
