// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use crate::stream::is_sign;
use crate::{Error, Stream};

impl<'a> Stream<'a> {
    /// Parses a number.
    ///
    /// Leading spaces and trailing separators (spaces, commas and semicolons)
    /// are consumed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNumber` when there is no number at the current position.
    pub fn parse_number(&mut self) -> Result<f64, Error> {
        self.attempt(|s| {
            s.skip_spaces();
            let n = s.parse_scalar()?;
            s.skip_separators();
            Ok(n)
        })
    }

    /// Parses the next number of a list.
    pub fn parse_list_number(&mut self) -> Result<f64, Error> {
        if self.at_end() {
            return Err(Error::UnexpectedEndOfStream);
        }

        self.parse_number()
    }

    /// Parses a bare scalar without touching the surrounding bytes.
    ///
    /// `[sign] digits [. digits] [(e|E) [sign] digits]`
    ///
    /// Can stop in the middle of a number on error, so it must run
    /// inside `attempt`.
    pub(crate) fn parse_scalar(&mut self) -> Result<f64, Error> {
        let start = self.pos();
        let invalid = |s: &Stream| Error::InvalidNumber(s.char_pos(start));

        if self.peek().map_or(false, is_sign) {
            self.advance(1);
        }

        let int = self.take_while(|c| c.is_ascii_digit());
        let frac = if self.next_is(b'.') {
            self.advance(1);
            self.take_while(|c| c.is_ascii_digit())
        } else {
            ""
        };
        if int.is_empty() && frac.is_empty() {
            return Err(invalid(self));
        }

        // `1em` and `1ex` are lengths, not exponents.
        let is_exp = matches!(self.peek(), Some(b'e' | b'E'))
            && !matches!(self.peek_at(1), Some(b'm' | b'x'));
        if is_exp {
            self.advance(1);
            if self.peek().map_or(false, is_sign) {
                self.advance(1);
            }

            if self.take_while(|c| c.is_ascii_digit()).is_empty() {
                return Err(invalid(self));
            }
        }

        match f64::from_str(self.since(start)) {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(invalid(self)),
        }
    }
}
