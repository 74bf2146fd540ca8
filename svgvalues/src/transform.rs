// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{Error, Stream};

/// Representation of the [`<transform>`] type.
///
/// A 3x3 affine matrix with an implicit `[0 0 1]` last row:
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
///
/// [`<transform>`]: https://www.w3.org/TR/SVG2/coords.html#InterfaceSVGTransform
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    /// Constructs a new transform.
    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Transform { a, b, c, d, e, f }
    }

    /// Constructs a new translate transform.
    #[inline]
    pub const fn new_translate(x: f64, y: f64) -> Self {
        Transform::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Constructs a new scale transform.
    #[inline]
    pub const fn new_scale(sx: f64, sy: f64) -> Self {
        Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Constructs a new rotate transform.
    #[inline]
    pub fn new_rotate(angle: f64) -> Self {
        let v = angle.to_radians();
        let a = v.cos();
        let b = v.sin();
        Transform::new(a, b, -b, a, 0.0, 0.0)
    }

    /// Checks that transform is identity.
    #[inline]
    pub fn is_default(&self) -> bool {
        *self == Transform::default()
    }

    /// Returns `self * other`, so `other` is applied first.
    pub fn pre_concat(&self, other: Transform) -> Self {
        Transform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Transform {
        Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}

impl std::str::FromStr for Transform {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Error> {
        let mut s = Stream::from(text);
        s.parse_transform()
    }
}

impl<'a> Stream<'a> {
    /// Parses a [`<transform-list>`] and multiplies all of its items.
    ///
    /// The list spans until the end of the stream.
    /// An empty list produces an identity transform.
    ///
    /// [`<transform-list>`]: https://www.w3.org/TR/SVG11/coords.html#TransformAttribute
    pub fn parse_transform(&mut self) -> Result<Transform, Error> {
        self.attempt(|s| {
            let mut ts = Transform::default();
            s.skip_spaces();
            while !s.at_end() {
                ts = ts.pre_concat(s.parse_transform_item()?);
                s.skip_comma();
            }

            Ok(ts)
        })
    }

    fn parse_transform_item(&mut self) -> Result<Transform, Error> {
        let start = self.pos();
        let name = self.ident();
        self.skip_spaces();
        self.expect(b'(')?;

        let mut args = [0.0; 6];
        let mut len = 0;
        loop {
            self.skip_spaces();
            if self.next_is(b')') {
                self.advance(1);
                break;
            }

            if len == args.len() {
                return Err(self.unexpected());
            }

            args[len] = self.parse_list_number()?;
            len += 1;
        }

        let ts = match (name, &args[..len]) {
            ("matrix", &[a, b, c, d, e, f]) => Transform::new(a, b, c, d, e, f),
            ("translate", &[tx]) => Transform::new_translate(tx, 0.0),
            ("translate", &[tx, ty]) => Transform::new_translate(tx, ty),
            ("scale", &[s]) => Transform::new_scale(s, s),
            ("scale", &[sx, sy]) => Transform::new_scale(sx, sy),
            ("rotate", &[angle]) => Transform::new_rotate(angle),
            ("rotate", &[angle, cx, cy]) => Transform::new_translate(cx, cy)
                .pre_concat(Transform::new_rotate(angle))
                .pre_concat(Transform::new_translate(-cx, -cy)),
            ("skewX", &[angle]) => Transform::new(1.0, 0.0, angle.to_radians().tan(), 1.0, 0.0, 0.0),
            ("skewY", &[angle]) => Transform::new(1.0, angle.to_radians().tan(), 0.0, 1.0, 0.0, 0.0),
            ("matrix" | "translate" | "scale" | "rotate" | "skewX" | "skewY", _) => {
                return Err(Error::InvalidValue);
            }
            _ => return Err(self.unexpected_at(start)),
        };

        Ok(ts)
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use super::*;

    macro_rules! test {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                let ts = Transform::from_str($text).unwrap();
                let s = format!("matrix({} {} {} {} {} {})", ts.a, ts.b, ts.c, ts.d, ts.e, ts.f);
                assert_eq!(s, $result);
            }
        )
    }

    test!(parse_1,
        "matrix(1 0 0 1 10 20)",
        "matrix(1 0 0 1 10 20)"
    );

    test!(parse_2,
        "translate(10 20)",
        "matrix(1 0 0 1 10 20)"
    );

    test!(parse_3,
        "scale(2 3)",
        "matrix(2 0 0 3 0 0)"
    );

    test!(parse_4,
        "rotate(30)",
        "matrix(0.8660254037844387 0.49999999999999994 -0.49999999999999994 0.8660254037844387 0 0)"
    );

    test!(parse_5,
        "rotate(30 10 20)",
        "matrix(0.8660254037844387 0.49999999999999994 -0.49999999999999994 0.8660254037844387 11.339745962155611 -2.3205080756887746)"
    );

    test!(parse_6,
        "translate(10 15) translate(0 5)",
        "matrix(1 0 0 1 10 20)"
    );

    test!(parse_7,
        "translate(10) scale(2)",
        "matrix(2 0 0 2 10 0)"
    );

    test!(parse_8,
        "translate(25 215) scale(2) skewX(45)",
        "matrix(2 0 1.9999999999999998 2 25 215)"
    );

    test!(parse_9,
        "skewX(0)",
        "matrix(1 0 0 1 0 0)"
    );

    test!(parse_10,
        "translate(10,20),scale(2)",
        "matrix(2 0 0 2 10 20)"
    );

    test!(parse_11,
        "",
        "matrix(1 0 0 1 0 0)"
    );

    #[test]
    fn parse_err_1() {
        let mut s = Stream::from("text");
        assert!(s.parse_transform().is_err());
        assert_eq!(s.pos(), 0);
    }

    #[test]
    fn parse_err_2() {
        let mut s = Stream::from("scale(2) text");
        assert!(s.parse_transform().is_err());
        assert_eq!(s.pos(), 0);
    }

    #[test]
    fn parse_err_wrong_arity() {
        assert_eq!(Transform::from_str("scale(1 2 3)"), Err(Error::InvalidValue));
        assert_eq!(Transform::from_str("matrix(1 2 3 4 5 6 7)").unwrap_err().to_string(),
                   "unexpected data at position 20");
        assert_eq!(Transform::from_str("skew(1)").unwrap_err().to_string(),
                   "unexpected data at position 1");
    }

    #[test]
    fn parse_err_3() {
        assert_eq!(Transform::from_str("scale(2").unwrap_err().to_string(),
                   "unexpected end of stream");
    }

    #[test]
    fn pre_concat_applies_argument_first() {
        let ts = Transform::new_translate(10.0, 20.0).pre_concat(Transform::new_scale(2.0, 3.0));
        assert_eq!(ts, Transform::new(2.0, 0.0, 0.0, 3.0, 10.0, 20.0));

        let ts = Transform::new_scale(2.0, 3.0).pre_concat(Transform::new_translate(10.0, 20.0));
        assert_eq!(ts, Transform::new(2.0, 0.0, 0.0, 3.0, 20.0, 60.0));
    }
}
