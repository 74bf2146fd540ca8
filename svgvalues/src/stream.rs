// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::Error;

/// `[ \t\n\r]`
#[inline]
pub(crate) fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r')
}

/// A space, a comma or a semicolon.
#[inline]
pub(crate) fn is_separator(c: u8) -> bool {
    is_space(c) || matches!(c, b',' | b';')
}

#[inline]
pub(crate) fn is_sign(c: u8) -> bool {
    matches!(c, b'+' | b'-')
}

#[inline]
pub(crate) fn is_quote(c: u8) -> bool {
    matches!(c, b'\'' | b'"')
}

#[inline]
fn is_ident(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'-' | b'_')
}

/// A cursor over an attribute value.
///
/// Every `parse_*` method runs inside [`Stream::attempt`]:
/// it either succeeds and moves the cursor past the value,
/// or fails and leaves the cursor where it was.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Stream<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> From<&'a str> for Stream<'a> {
    #[inline]
    fn from(text: &'a str) -> Self {
        Stream { text, pos: 0 }
    }
}

impl<'a> Stream<'a> {
    /// Returns the cursor position in bytes.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Checks that the whole text was consumed.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Returns the unconsumed text.
    #[inline]
    pub fn tail(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Runs `f` on a copy of the stream and commits the new position
    /// only when `f` succeeds.
    pub fn attempt<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Stream<'a>) -> Result<T, Error>,
    {
        let mut s = *self;
        let value = f(&mut s)?;
        *self = s;
        Ok(value)
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    #[inline]
    pub(crate) fn peek_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    #[inline]
    pub(crate) fn next_is(&self, c: u8) -> bool {
        self.peek() == Some(c)
    }

    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.text.len());
        self.pos += n;
    }

    /// Marks the whole text as consumed.
    #[inline]
    pub(crate) fn finish(&mut self) {
        self.pos = self.text.len();
    }

    pub(crate) fn skip_while<F: Fn(u8) -> bool>(&mut self, f: F) {
        while self.peek().map_or(false, &f) {
            self.pos += 1;
        }
    }

    pub(crate) fn take_while<F: Fn(u8) -> bool>(&mut self, f: F) -> &'a str {
        let start = self.pos;
        self.skip_while(f);
        self.since(start)
    }

    /// Returns the text between `start` and the cursor.
    #[inline]
    pub(crate) fn since(&self, start: usize) -> &'a str {
        &self.text[start..self.pos]
    }

    pub(crate) fn skip_spaces(&mut self) {
        self.skip_while(is_space);
    }

    pub(crate) fn skip_separators(&mut self) {
        self.skip_while(is_separator);
    }

    /// Skips a single comma surrounded by spaces.
    pub(crate) fn skip_comma(&mut self) {
        self.skip_spaces();
        if self.next_is(b',') {
            self.advance(1);
            self.skip_spaces();
        }
    }

    #[inline]
    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.tail().starts_with(prefix)
    }

    /// Consumes `prefix` if the text continues with it.
    pub(crate) fn eat(&mut self, prefix: &str) -> bool {
        if self.starts_with(prefix) {
            self.advance(prefix.len());
            true
        } else {
            false
        }
    }

    /// Consumes `c` or fails.
    pub(crate) fn expect(&mut self, c: u8) -> Result<(), Error> {
        match self.peek() {
            Some(v) if v == c => {
                self.advance(1);
                Ok(())
            }
            Some(_) => Err(Error::ExpectedChar(c as char, self.char_pos(self.pos))),
            None => Err(Error::UnexpectedEndOfStream),
        }
    }

    /// Consumes an ASCII identifier. The result can be empty.
    pub(crate) fn ident(&mut self) -> &'a str {
        self.take_while(is_ident)
    }

    /// Consumes `keyword` when it is a whole identifier.
    ///
    /// `none` is not matched in `nonezero`.
    pub(crate) fn consume_keyword(&mut self, keyword: &str) -> bool {
        let mut s = *self;
        if s.ident() == keyword {
            *self = s;
            true
        } else {
            false
        }
    }

    /// Converts a byte offset into a 1-based character position.
    pub(crate) fn char_pos(&self, byte_pos: usize) -> usize {
        self.text[..byte_pos.min(self.text.len())].chars().count() + 1
    }

    /// An `UnexpectedData` error at the cursor.
    pub(crate) fn unexpected(&self) -> Error {
        self.unexpected_at(self.pos)
    }

    pub(crate) fn unexpected_at(&self, byte_pos: usize) -> Error {
        Error::UnexpectedData(self.char_pos(byte_pos))
    }
}

/// Parses a value that must span the whole `text`.
///
/// Only spaces may follow the value.
pub(crate) fn parse_whole<'a, T, F>(text: &'a str, f: F) -> Result<T, Error>
where
    F: FnOnce(&mut Stream<'a>) -> Result<T, Error>,
{
    let mut s = Stream::from(text);
    let value = f(&mut s)?;
    s.skip_spaces();
    if !s.at_end() {
        return Err(s.unexpected());
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators() {
        let mut s = Stream::from(" ,; \t10");
        s.skip_separators();
        assert_eq!(s.tail(), "10");
    }

    #[test]
    fn keyword_is_a_whole_ident() {
        let mut s = Stream::from("none");
        assert!(s.consume_keyword("none"));
        assert!(s.at_end());

        let mut s = Stream::from("nonezero");
        assert!(!s.consume_keyword("none"));
        assert_eq!(s.pos(), 0);
    }

    #[test]
    fn attempt_rolls_back() {
        let mut s = Stream::from("abc");
        let res: Result<(), Error> = s.attempt(|s| {
            s.advance(2);
            Err(Error::InvalidValue)
        });
        assert!(res.is_err());
        assert_eq!(s.pos(), 0);

        assert_eq!(s.attempt(|s| Ok(s.ident())), Ok("abc"));
        assert!(s.at_end());
    }

    #[test]
    fn expect_reports_position() {
        let mut s = Stream::from("ab");
        s.advance(1);
        assert_eq!(s.expect(b'(').unwrap_err().to_string(), "expected '(' at position 2");
        s.advance(1);
        assert_eq!(s.expect(b'('), Err(Error::UnexpectedEndOfStream));
    }

    #[test]
    fn char_positions_count_chars() {
        let s = Stream::from("éa");
        assert_eq!(s.char_pos(2), 2);
        assert_eq!(s.unexpected_at(3), Error::UnexpectedData(3));
    }

    #[test]
    fn whole_value() {
        assert_eq!(parse_whole("ab  ", |s| Ok(s.ident())), Ok("ab"));
        assert_eq!(parse_whole("ab c", |s| Ok(s.ident())), Err(Error::UnexpectedData(4)));
    }
}
