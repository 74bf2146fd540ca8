// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::stream::parse_whole;
use crate::{colors, Error, Stream};

/// Representation of the [`<color>`] type.
///
/// Stored as a packed `0xAARRGGBB` value.
///
/// [`<color>`]: https://www.w3.org/TR/css-color-3/
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Color {
    /// Packed `0xAARRGGBB` value.
    pub argb: u32,
}

impl Color {
    /// Constructs a new opaque `Color` from RGB values.
    #[inline]
    pub const fn new_rgb(red: u8, green: u8, blue: u8) -> Color {
        Color::new_rgba(red, green, blue, 255)
    }

    /// Constructs a new `Color` from RGBA values.
    #[inline]
    pub const fn new_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Color {
        Color {
            argb: (alpha as u32) << 24 | (red as u32) << 16 | (green as u32) << 8 | blue as u32,
        }
    }

    /// Constructs a new `Color` from a packed `0xAARRGGBB` value.
    #[inline]
    pub const fn from_argb(argb: u32) -> Color {
        Color { argb }
    }

    /// Constructs a new opaque black `Color`.
    #[inline]
    pub const fn black() -> Color {
        Color::new_rgb(0, 0, 0)
    }

    /// Constructs a new opaque white `Color`.
    #[inline]
    pub const fn white() -> Color {
        Color::new_rgb(255, 255, 255)
    }

    #[allow(missing_docs)]
    #[inline]
    pub const fn alpha(&self) -> u8 {
        (self.argb >> 24) as u8
    }

    #[allow(missing_docs)]
    #[inline]
    pub const fn red(&self) -> u8 {
        (self.argb >> 16) as u8
    }

    #[allow(missing_docs)]
    #[inline]
    pub const fn green(&self) -> u8 {
        (self.argb >> 8) as u8
    }

    #[allow(missing_docs)]
    #[inline]
    pub const fn blue(&self) -> u8 {
        self.argb as u8
    }
}

impl std::str::FromStr for Color {
    type Err = Error;

    /// Parses [CSS3](https://www.w3.org/TR/css-color-3/) `Color` from a string.
    ///
    /// # Errors
    ///
    ///  - Returns error if a color has an invalid format.
    ///  - Returns error if `<color>` is followed by `<icccolor>`. It's not supported.
    ///
    /// # Notes
    ///
    ///  - Only the `#RGB`/`#RRGGBB` and the named color notations are supported.
    fn from_str(text: &str) -> Result<Self, Error> {
        parse_whole(text, Stream::parse_color)
    }
}

impl<'a> Stream<'a> {
    /// Parses a color.
    ///
    /// Hex notation must have exactly 3 or 6 digits.
    /// Color names are case-insensitive.
    ///
    /// Trailing data is not consumed and is not an error.
    pub fn parse_color(&mut self) -> Result<Color, Error> {
        self.attempt(|s| {
            s.skip_spaces();

            if s.eat("#") {
                let start = s.pos();
                let hex = s.take_while(|c| c.is_ascii_hexdigit());
                match hex.len() {
                    3 => {
                        let v = u16::from_str_radix(hex, 16).map_err(|_| Error::InvalidValue)?;
                        let r = ((v >> 8) & 0xf) as u8;
                        let g = ((v >> 4) & 0xf) as u8;
                        let b = (v & 0xf) as u8;
                        Ok(Color::new_rgb(short_hex(r), short_hex(g), short_hex(b)))
                    }
                    6 => {
                        let v = u32::from_str_radix(hex, 16).map_err(|_| Error::InvalidValue)?;
                        Ok(Color::from_argb(0xFF00_0000 | v))
                    }
                    0 => Err(Error::InvalidNumber(s.char_pos(start))),
                    _ => Err(Error::InvalidValue),
                }
            } else {
                let name = s.take_while(|c| c.is_ascii_alphabetic());
                colors::from_str(name).ok_or(Error::InvalidValue)
            }
        })
    }
}

#[inline]
fn short_hex(c: u8) -> u8 {
    (c << 4) | c
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use super::*;

    macro_rules! test {
        ($name:ident, $text:expr, $color:expr) => {
            #[test]
            fn $name() {
                assert_eq!(Color::from_str($text).unwrap(), $color);
            }
        };
    }

    test!(
        rrggbb,
        "#ff0000",
        Color::new_rgb(255, 0, 0)
    );

    test!(
        rrggbb_upper,
        "#FF0000",
        Color::new_rgb(255, 0, 0)
    );

    test!(
        rgb_hex,
        "#f00",
        Color::new_rgb(255, 0, 0)
    );

    test!(
        rrggbb_spaced,
        "  #ff0000  ",
        Color::new_rgb(255, 0, 0)
    );

    test!(
        name_red,
        "red",
        Color::new_rgb(255, 0, 0)
    );

    test!(
        name_red_spaced,
        " red ",
        Color::new_rgb(255, 0, 0)
    );

    test!(
        name_red_upper_case,
        "RED",
        Color::new_rgb(255, 0, 0)
    );

    test!(
        name_red_mixed_case,
        "ReD",
        Color::new_rgb(255, 0, 0)
    );

    test!(
        name_cornflowerblue,
        "cornflowerblue",
        Color::new_rgb(100, 149, 237)
    );

    test!(
        name_transparent,
        "transparent",
        Color::new_rgba(0, 0, 0, 0)
    );

    #[test]
    fn short_and_long_white_are_equal() {
        let a = Color::from_str("#fff").unwrap();
        let b = Color::from_str("#ffffff").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.argb, 0xFFFFFFFF);
    }

    #[test]
    fn accessors() {
        let c = Color::from_argb(0x80102030);
        assert_eq!((c.alpha(), c.red(), c.green(), c.blue()), (0x80, 0x10, 0x20, 0x30));
    }

    macro_rules! test_err {
        ($name:ident, $text:expr) => {
            #[test]
            fn $name() {
                let mut s = Stream::from($text);
                assert!(s.parse_color().is_err());
                assert_eq!(s.pos(), 0);
            }
        };
    }

    test_err!(
        two_digits,
        "#12"
    );

    test_err!(
        seven_digits,
        "#1234567"
    );

    test_err!(
        four_digits,
        "#1234"
    );

    test_err!(
        empty_hex,
        "#"
    );

    test_err!(
        unknown_name,
        "qwe"
    );

    test_err!(
        rgb_function,
        "rgb(255, 0, 0)"
    );

    test_err!(
        empty,
        ""
    );

    #[test]
    fn icc_color_is_not_supported() {
        assert_eq!(Color::from_str("#CD853F icc-color(acmecmyk, 0.11, 0.48, 0.83, 0.00)").unwrap_err().to_string(),
                   "unexpected data at position 9");
    }

    #[test]
    fn trailing_data_stays_in_the_stream() {
        let mut s = Stream::from("#fff;");
        assert_eq!(s.parse_color().unwrap(), Color::white());
        assert_eq!(s.tail(), ";");
    }
}
