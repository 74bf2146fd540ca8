// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
*svgvalues* is a collection of parsers for SVG attribute values.

## Supported SVG types

- [`<color>`](https://www.w3.org/TR/css-color-3/)
- [`<number>`](https://www.w3.org/TR/SVG2/types.html#InterfaceSVGNumber)
- [`<length>`](https://www.w3.org/TR/SVG2/types.html#InterfaceSVGLength)
- [`<viewBox>`](https://www.w3.org/TR/SVG2/coords.html#ViewBoxAttribute)
- [`<transform>`](https://www.w3.org/TR/SVG11/types.html#DataTypeTransformList)
- [`<list-of-lengths>`](https://www.w3.org/TR/SVG2/types.html#InterfaceSVGLengthList)
- [`<list-of-points>`](https://www.w3.org/TR/SVG11/shapes.html#PointsBNF)
- [`<paint>`](https://www.w3.org/TR/SVG2/painting.html#SpecifyingPaint)
- [`<preserveAspectRatio>`](https://www.w3.org/TR/SVG11/coords.html#PreserveAspectRatioAttribute)
- [`<IRI>`](https://www.w3.org/TR/SVG11/types.html#DataTypeIRI) and
  [`<FuncIRI>`](https://www.w3.org/TR/SVG11/types.html#DataTypeFuncIRI) links, as `&str` ids
- `stroke-dasharray`, `clip-path` and the keyword-only presentation attributes.

## Parsing model

Every value is parsed by a method of the [`Stream`] cursor.
A failed parse never moves the cursor, so a caller can try an alternative
grammar or drop the attribute. The `FromStr` implementations additionally
reject trailing data.

## Limitations

- Accepts only [normalized](https://www.w3.org/TR/REC-xml/#AVNormalize) values.
- All keywords are case-sensitive. Only named colors are matched case-insensitively.
- Functional colors like `rgb(...)` are not supported.

## Safety

- The library should not panic.
- The library forbids unsafe code.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(missing_debug_implementations)]

mod aspect_ratio;
mod color;
#[rustfmt::skip] mod colors;
mod dash_array;
mod enums;
mod error;
mod iri;
mod length;
mod number;
mod paint;
mod points;
mod stream;
mod transform;
mod viewbox;

pub use crate::aspect_ratio::*;
pub use crate::color::*;
pub use crate::dash_array::*;
pub use crate::enums::*;
pub use crate::error::*;
pub use crate::iri::*;
pub use crate::length::*;
pub use crate::paint::*;
pub use crate::points::*;
pub use crate::stream::Stream;
pub use crate::transform::*;
pub use crate::viewbox::*;
