// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgvalues::{Length, LengthUnit as Unit};

/// An axis a length is measured along.
///
/// Only affects percentage resolution.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LengthType {
    /// Relative to the viewport width.
    Horizontal,
    /// Relative to the viewport height.
    Vertical,
    /// Relative to the viewport diagonal, normalized.
    Other,
}

/// Current viewport state used to resolve lengths into user units.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LengthContext {
    view_port: (f64, f64),
    dpi: f64,
}

impl LengthContext {
    /// Creates a new context.
    pub fn new(view_port: (f64, f64), dpi: f64) -> Self {
        LengthContext { view_port, dpi }
    }

    /// Returns the viewport size.
    #[inline]
    pub fn view_port(&self) -> (f64, f64) {
        self.view_port
    }

    /// Sets a new viewport size.
    #[inline]
    pub fn set_view_port(&mut self, view_port: (f64, f64)) {
        self.view_port = view_port;
    }

    /// Returns the DPI.
    #[inline]
    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Converts a length into user units.
    ///
    /// `em` and `ex` are not supported and always resolve to zero.
    pub fn resolve(&self, length: Length, kind: LengthType) -> f64 {
        let n = length.number;
        match length.unit {
            Unit::None | Unit::Px => n,
            Unit::In => n * self.dpi,
            Unit::Cm => n * self.dpi / 2.54,
            Unit::Mm => n * self.dpi / 25.4,
            Unit::Pt => n * self.dpi / 72.0,
            Unit::Pc => n * self.dpi / 6.0,
            Unit::Percent => {
                let (w, h) = self.view_port;
                let base = match kind {
                    LengthType::Horizontal => w,
                    LengthType::Vertical => h,
                    LengthType::Other => (w * h).sqrt(),
                };

                n * base / 100.0
            }
            Unit::Em | Unit::Ex => {
                log::warn!("Font-relative units are not supported. Resolved to zero.");
                0.0
            }
        }
    }

    /// Resolves a rectangle, each component independently.
    ///
    /// Returns `None` when the resolved width or height is negative.
    pub fn resolve_rect(
        &self,
        x: Length,
        y: Length,
        width: Length,
        height: Length,
    ) -> Option<tiny_skia::Rect> {
        tiny_skia::Rect::from_xywh(
            self.resolve(x, LengthType::Horizontal) as f32,
            self.resolve(y, LengthType::Vertical) as f32,
            self.resolve(width, LengthType::Horizontal) as f32,
            self.resolve(height, LengthType::Vertical) as f32,
        )
    }
}
