// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::stream::parse_whole;
use crate::{Error, Length, LengthListParser, Stream};

/// Representation of the `stroke-dasharray` property.
#[derive(Clone, PartialEq, Debug)]
pub enum DashArray {
    /// `none`
    None,
    /// `inherit`
    Inherit,
    /// A list of dash and gap lengths.
    Explicit(Vec<Length>),
}

impl std::str::FromStr for DashArray {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_whole(text, Stream::parse_dash_array)
    }
}

impl<'a> Stream<'a> {
    /// Parses a `stroke-dasharray` value.
    ///
    /// A length list is consumed till the end of the stream
    /// and fails as a whole on any invalid item.
    pub fn parse_dash_array(&mut self) -> Result<DashArray, Error> {
        self.attempt(|s| {
            s.skip_spaces();

            if s.consume_keyword("none") {
                return Ok(DashArray::None);
            }

            if s.consume_keyword("inherit") {
                return Ok(DashArray::Inherit);
            }

            let mut list = Vec::new();
            for length in LengthListParser::from(s.tail()) {
                list.push(length?);
            }

            if list.is_empty() {
                return Err(Error::InvalidValue);
            }

            s.finish();
            Ok(DashArray::Explicit(list))
        })
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use super::*;
    use crate::LengthUnit;

    macro_rules! test {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(DashArray::from_str($text).unwrap(), $result);
            }
        )
    }

    test!(parse_1, "none", DashArray::None);
    test!(parse_2, " inherit ", DashArray::Inherit);
    test!(parse_3, "5, 10", DashArray::Explicit(vec![Length::new_number(5.0), Length::new_number(10.0)]));
    test!(parse_4, "5% 1px", DashArray::Explicit(vec![
        Length::new(5.0, LengthUnit::Percent),
        Length::new(1.0, LengthUnit::Px),
    ]));

    #[test]
    fn parse_err_1() {
        let mut s = Stream::from("5, q");
        assert!(s.parse_dash_array().is_err());
        assert_eq!(s.pos(), 0);
    }

    #[test]
    fn parse_err_2() {
        assert!(DashArray::from_str("").is_err());
    }
}
