// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::stream::{is_quote, is_space, parse_whole};
use crate::{Error, Stream};

/// Representation of the `clip-path` property.
///
/// The link is stored as an element ID and is never resolved by the parser.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ClipPath {
    /// `none`
    None,
    /// `inherit`
    Inherit,
    /// `url(#id)`
    FuncIRI(String),
}

impl std::str::FromStr for ClipPath {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Error> {
        parse_whole(text, Stream::parse_clip_path)
    }
}

impl<'a> Stream<'a> {
    /// Parses an `#id` link.
    ///
    /// Any non-space characters are accepted as an id.
    pub fn parse_iri(&mut self) -> Result<&'a str, Error> {
        self.attempt(|s| {
            s.skip_spaces();
            s.expect(b'#')?;
            s.parse_link(|c| !is_space(c))
        })
    }

    /// Parses an `url(#id)` link.
    ///
    /// The id can be quoted.
    pub fn parse_func_iri(&mut self) -> Result<&'a str, Error> {
        self.attempt(|s| {
            s.skip_spaces();
            if !s.eat("url(") {
                return Err(s.unexpected());
            }
            s.skip_spaces();

            let quote = s.peek().filter(|c| is_quote(*c));
            if quote.is_some() {
                s.advance(1);
            }

            s.expect(b'#')?;
            let link = s.parse_link(|c| !is_space(c) && !is_quote(c) && c != b')')?;
            s.skip_spaces();

            if let Some(quote) = quote {
                s.expect(quote)?;
                s.skip_spaces();
            }
            s.expect(b')')?;

            Ok(link)
        })
    }

    fn parse_link<F: Fn(u8) -> bool>(&mut self, f: F) -> Result<&'a str, Error> {
        match self.take_while(f) {
            "" => Err(Error::InvalidValue),
            link => Ok(link),
        }
    }

    /// Parses a `clip-path` value.
    pub fn parse_clip_path(&mut self) -> Result<ClipPath, Error> {
        self.attempt(|s| {
            s.skip_spaces();

            if s.consume_keyword("none") {
                Ok(ClipPath::None)
            } else if s.consume_keyword("inherit") {
                Ok(ClipPath::Inherit)
            } else {
                let link = s.parse_func_iri()?;
                Ok(ClipPath::FuncIRI(link.to_string()))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn iri() {
        assert_eq!(Stream::from("#id").parse_iri(), Ok("id"));
        assert_eq!(Stream::from("   #id   text").parse_iri(), Ok("id"));
        assert_eq!(Stream::from("# id").parse_iri(), Err(Error::InvalidValue));

        let mut s = Stream::from("id");
        assert!(s.parse_iri().is_err());
        assert_eq!(s.pos(), 0);
    }

    #[test]
    fn func_iri() {
        for text in ["url(#id)", "  url(  #id  ) ", "url('#id')", "url(\"#id\")", "url(#id) qwe"] {
            assert_eq!(Stream::from(text).parse_func_iri(), Ok("id"), "{}", text);
        }
    }

    #[test]
    fn func_iri_errors() {
        let mut s = Stream::from("url(#id");
        assert_eq!(s.parse_func_iri(), Err(Error::UnexpectedEndOfStream));
        assert_eq!(s.pos(), 0);

        assert_eq!(Stream::from("uri(#id)").parse_func_iri(), Err(Error::UnexpectedData(1)));
        assert_eq!(Stream::from("url('#id)").parse_func_iri(), Err(Error::ExpectedChar('\'', 9)));
    }

    #[test]
    fn clip_path() {
        assert_eq!(ClipPath::from_str("none").unwrap(), ClipPath::None);
        assert_eq!(ClipPath::from_str("inherit").unwrap(), ClipPath::Inherit);
        assert_eq!(ClipPath::from_str("url(#clip1)").unwrap(), ClipPath::FuncIRI("clip1".to_string()));
        assert_eq!(ClipPath::from_str("url(#clip1) x").unwrap_err().to_string(),
                   "unexpected data at position 13");

        let mut s = Stream::from("#clip1");
        assert!(s.parse_clip_path().is_err());
        assert_eq!(s.pos(), 0);
    }
}
