// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::stream::parse_whole;
use crate::{Error, Stream};

/// Representation of the [`<viewBox>`] type.
///
/// A box with a negative or zero size is still a valid value.
/// It disables rendering of the element it belongs to.
///
/// [`<viewBox>`]: https://www.w3.org/TR/SVG2/coords.html#ViewBoxAttribute
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl ViewBox {
    /// Creates a new `ViewBox`.
    #[inline]
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        ViewBox { x, y, w, h }
    }

    /// Checks that the box has a positive size.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }
}

impl std::str::FromStr for ViewBox {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Error> {
        parse_whole(text, Stream::parse_view_box)
    }
}

impl<'a> Stream<'a> {
    /// Parses four numbers of a `viewBox`.
    pub fn parse_view_box(&mut self) -> Result<ViewBox, Error> {
        self.attempt(|s| {
            let x = s.parse_list_number()?;
            let y = s.parse_list_number()?;
            let w = s.parse_list_number()?;
            let h = s.parse_list_number()?;
            Ok(ViewBox::new(x, y, w, h))
        })
    }
}
