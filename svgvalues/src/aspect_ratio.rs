// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::stream::parse_whole;
use crate::{Error, Stream};

/// Representation of the `align` value of the [`preserveAspectRatio`] attribute.
///
/// [`preserveAspectRatio`]: https://www.w3.org/TR/SVG11/coords.html#PreserveAspectRatioAttribute
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Align {
    None,
    XMinYMin,
    XMidYMin,
    XMaxYMin,
    XMinYMid,
    XMidYMid,
    XMaxYMid,
    XMinYMax,
    XMidYMax,
    XMaxYMax,
}

/// Representation of the [`preserveAspectRatio`] attribute.
///
/// [`preserveAspectRatio`]: https://www.w3.org/TR/SVG11/coords.html#PreserveAspectRatioAttribute
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AspectRatio {
    /// `<align>` value.
    pub align: Align,
    /// `<meetOrSlice>` value.
    ///
    /// `true` when `slice` is present.
    pub slice: bool,
}

impl Default for AspectRatio {
    #[inline]
    fn default() -> Self {
        AspectRatio {
            align: Align::XMidYMid,
            slice: false,
        }
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Error> {
        parse_whole(text, Stream::parse_aspect_ratio)
    }
}

impl<'a> Stream<'a> {
    /// Parses a `preserveAspectRatio` value.
    ///
    /// The SVG 1.1 `defer` prefix is accepted and ignored.
    pub fn parse_aspect_ratio(&mut self) -> Result<AspectRatio, Error> {
        self.attempt(|s| {
            s.skip_spaces();
            if s.consume_keyword("defer") {
                s.skip_spaces();
            }

            let start = s.pos();
            let align = match s.ident() {
                "none" => Align::None,
                "xMinYMin" => Align::XMinYMin,
                "xMidYMin" => Align::XMidYMin,
                "xMaxYMin" => Align::XMaxYMin,
                "xMinYMid" => Align::XMinYMid,
                "xMidYMid" => Align::XMidYMid,
                "xMaxYMid" => Align::XMaxYMid,
                "xMinYMax" => Align::XMinYMax,
                "xMidYMax" => Align::XMidYMax,
                "xMaxYMax" => Align::XMaxYMax,
                _ => return Err(s.unexpected_at(start)),
            };

            s.skip_spaces();

            let mut slice = false;
            if s.consume_keyword("slice") {
                slice = true;
            } else {
                s.consume_keyword("meet");
            }

            Ok(AspectRatio { align, slice })
        })
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    macro_rules! test {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                let v = AspectRatio::from_str($text).unwrap();
                assert_eq!(v, $result);
            }
        )
    }

    test!(parse_1, "none", AspectRatio { align: Align::None, slice: false });
    test!(parse_2, "defer none", AspectRatio { align: Align::None, slice: false });
    test!(parse_3, "xMinYMid", AspectRatio { align: Align::XMinYMid, slice: false });
    test!(parse_4, "xMinYMid slice", AspectRatio { align: Align::XMinYMid, slice: true });
    test!(parse_5, "xMaxYMax meet", AspectRatio { align: Align::XMaxYMax, slice: false });

    #[test]
    fn parse_err_1() {
        let mut s = Stream::from("xMinYMid what");
        assert!(AspectRatio::from_str("xMinYMid what").is_err());
        assert!(s.parse_aspect_ratio().is_ok());
    }

    #[test]
    fn parse_err_2() {
        let mut s = Stream::from("xMidYMidd");
        assert!(s.parse_aspect_ratio().is_err());
        assert_eq!(s.pos(), 0);
    }
}
