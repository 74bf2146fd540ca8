// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::stream::{is_separator, parse_whole};
use crate::{Error, Stream};

/// List of all SVG length units.
///
/// `None` is a plain number.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum LengthUnit {
    None,
    Em,
    Ex,
    Px,
    In,
    Cm,
    Mm,
    Pt,
    Pc,
    Percent,
}

/// Representation of the [`<length>`] type.
///
/// [`<length>`]: https://www.w3.org/TR/SVG2/types.html#InterfaceSVGLength
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Length {
    pub number: f64,
    pub unit: LengthUnit,
}

impl Length {
    /// Constructs a new length.
    #[inline]
    pub const fn new(number: f64, unit: LengthUnit) -> Length {
        Length { number, unit }
    }

    /// Constructs a new length with `LengthUnit::None`.
    #[inline]
    pub const fn new_number(number: f64) -> Length {
        Length {
            number,
            unit: LengthUnit::None,
        }
    }

    /// Constructs a new length with a zero number.
    #[inline]
    pub const fn zero() -> Length {
        Length::new_number(0.0)
    }

    /// Constructs a new percentage length.
    #[inline]
    pub const fn percent(number: f64) -> Length {
        Length::new(number, LengthUnit::Percent)
    }
}

impl Default for Length {
    #[inline]
    fn default() -> Self {
        Length::zero()
    }
}

impl std::str::FromStr for Length {
    type Err = Error;

    #[inline]
    fn from_str(text: &str) -> Result<Self, Error> {
        parse_whole(text, Stream::parse_length)
    }
}

const UNITS: &[(&str, LengthUnit)] = &[
    ("%", LengthUnit::Percent),
    ("em", LengthUnit::Em),
    ("ex", LengthUnit::Ex),
    ("px", LengthUnit::Px),
    ("in", LengthUnit::In),
    ("cm", LengthUnit::Cm),
    ("mm", LengthUnit::Mm),
    ("pt", LengthUnit::Pt),
    ("pc", LengthUnit::Pc),
];

impl<'a> Stream<'a> {
    /// Parses length from the stream.
    ///
    /// A number must be followed by a unit, a separator or the end of the data.
    /// Trailing separators are consumed.
    ///
    /// # Notes
    ///
    /// - Suffix must be lowercase, otherwise it will be an error.
    pub fn parse_length(&mut self) -> Result<Length, Error> {
        self.attempt(|s| {
            s.skip_spaces();
            let n = s.parse_scalar()?;
            let u = s.parse_length_unit()?;
            s.skip_separators();
            Ok(Length::new(n, u))
        })
    }

    /// Parses length from a list of lengths.
    pub fn parse_list_length(&mut self) -> Result<Length, Error> {
        if self.at_end() {
            return Err(Error::UnexpectedEndOfStream);
        }

        self.parse_length()
    }

    fn parse_length_unit(&mut self) -> Result<LengthUnit, Error> {
        for &(suffix, unit) in UNITS {
            if self.eat(suffix) {
                return Ok(unit);
            }
        }

        match self.peek() {
            None => Ok(LengthUnit::None),
            Some(c) if is_separator(c) => Ok(LengthUnit::None),
            Some(_) => Err(self.unexpected()),
        }
    }
}

/// A pull-based [`<list-of-length>`] parser.
///
/// [`<list-of-length>`]: https://www.w3.org/TR/SVG2/types.html#InterfaceSVGLengthList
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LengthListParser<'a>(Stream<'a>);

impl<'a> From<&'a str> for LengthListParser<'a> {
    #[inline]
    fn from(v: &'a str) -> Self {
        LengthListParser(Stream::from(v))
    }
}

impl<'a> Iterator for LengthListParser<'a> {
    type Item = Result<Length, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.at_end() {
            None
        } else {
            let v = self.0.parse_list_length();
            if v.is_err() {
                self.0.finish();
            }

            Some(v)
        }
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    macro_rules! test_p {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(Length::from_str($text).unwrap(), $result);
            }
        )
    }

    test_p!(parse_1,  "10",   Length::new(10.0, LengthUnit::None));
    test_p!(parse_2,  "1em",  Length::new(1.0, LengthUnit::Em));
    test_p!(parse_3,  "1ex",  Length::new(1.0, LengthUnit::Ex));
    test_p!(parse_4,  "10px", Length::new(10.0, LengthUnit::Px));
    test_p!(parse_5,  "1in",  Length::new(1.0, LengthUnit::In));
    test_p!(parse_6,  "1cm",  Length::new(1.0, LengthUnit::Cm));
    test_p!(parse_7,  "1mm",  Length::new(1.0, LengthUnit::Mm));
    test_p!(parse_8,  "1pt",  Length::new(1.0, LengthUnit::Pt));
    test_p!(parse_9,  "1pc",  Length::new(1.0, LengthUnit::Pc));
    test_p!(parse_10, "50%",  Length::new(50.0, LengthUnit::Percent));
    test_p!(parse_11, "1e0",  Length::new(1.0, LengthUnit::None));
    test_p!(parse_12, "1.0e0em", Length::new(1.0, LengthUnit::Em));
    test_p!(parse_13, " 5 ",  Length::new(5.0, LengthUnit::None));

    #[test]
    fn parse_with_separators() {
        let mut s = Stream::from("1, 2");
        assert_eq!(s.parse_length().unwrap(), Length::new(1.0, LengthUnit::None));
        assert_eq!(s.tail(), "2");
    }

    #[test]
    fn trailing_data_is_left_to_the_caller() {
        let mut s = Stream::from("10px q");
        assert_eq!(s.parse_length().unwrap(), Length::new(10.0, LengthUnit::Px));
        assert_eq!(s.tail(), "q");
    }

    #[test]
    fn err_1() {
        let mut s = Stream::from("abc");
        assert!(s.parse_length().is_err());
        assert_eq!(s.pos(), 0);
    }

    #[test]
    fn err_2() {
        // An unknown unit is not a separator.
        let mut s = Stream::from("1q");
        assert_eq!(s.parse_length().unwrap_err().to_string(),
                   "unexpected data at position 2");
        assert_eq!(s.pos(), 0);
    }

    #[test]
    fn err_3() {
        assert_eq!(Length::from_str("1mmx").unwrap_err().to_string(),
                   "unexpected data at position 4");
    }

    #[test]
    fn list() {
        let list: Vec<Length> = LengthListParser::from("5, 10% 2px").flatten().collect();
        assert_eq!(list, vec![
            Length::new(5.0, LengthUnit::None),
            Length::new(10.0, LengthUnit::Percent),
            Length::new(2.0, LengthUnit::Px),
        ]);
    }
}
