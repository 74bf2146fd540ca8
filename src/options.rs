// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Document loading options.
#[derive(Clone, Debug)]
pub struct Options {
    /// Target DPI.
    ///
    /// Impacts absolute units conversion.
    ///
    /// Default: 96.0
    pub dpi: f64,

    /// Default container size.
    ///
    /// Used when a document has no usable intrinsic size
    /// and no `viewBox` either.
    ///
    /// Default: 100x100
    pub default_size: (f64, f64),
}

impl Default for Options {
    fn default() -> Options {
        Options {
            dpi: 96.0,
            default_size: (100.0, 100.0),
        }
    }
}
