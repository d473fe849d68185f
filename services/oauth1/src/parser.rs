// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Parsers for OAuth attributes carried by an `Authorization` header or an
//! `application/x-www-form-urlencoded` body.

use log::debug;
use oauthsign_core::Error;

use crate::constants::{OAUTH_PREFIX, OAUTH_SCHEME, PARSE_KEYS};
use crate::encoding::unescape;
use crate::options::Options;

/// A header that does not follow `OAuth key="value", key="value"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    position: usize,
    rest: String,
    message: String,
}

impl ParseError {
    fn new(position: usize, rest: &str, message: String) -> Self {
        Self {
            position,
            rest: rest.to_string(),
            message,
        }
    }

    /// Byte offset at which parsing stopped.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Input left unparsed at [`ParseError::position`].
    pub fn rest(&self) -> &str {
        &self.rest
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::malformed_header(err.to_string()).with_source(err)
    }
}

/// Parse an `Authorization` header into its recognized OAuth attributes.
///
/// Keys are returned without their `oauth_` prefix and values are
/// percent-decoded. Only the signing attributes and `signature` are kept;
/// everything else, `realm` included, is dropped. A repeated key keeps its
/// last value.
///
/// ```
/// use oauthsign_oauth1::parse;
///
/// let attrs = parse(r#"OAuth oauth_consumer_key="key", oauth_nonce="a%20b""#)?;
/// assert_eq!(attrs.get("consumer_key"), Some("key"));
/// assert_eq!(attrs.get("nonce"), Some("a b"));
/// # Ok::<(), oauthsign_core::Error>(())
/// ```
pub fn parse(header: &str) -> oauthsign_core::Result<Options> {
    Ok(parse_with_keys(header, PARSE_KEYS)?)
}

/// Parse an `Authorization` header keeping only the bare names in `valid_keys`.
pub fn parse_with_keys(header: &str, valid_keys: &[&str]) -> Result<Options, ParseError> {
    let mut scanner = Scanner::new(header);
    if !scanner.scan_prefix() {
        return Err(ParseError::new(
            0,
            header,
            format!("Authorization header must start with '{OAUTH_SCHEME} '"),
        ));
    }

    let mut attributes = Options::new();
    while let Some(pair) = scanner.scan_pair() {
        if !pair.comma && !scanner.is_eos() {
            let (pos, rest) = (scanner.pos, scanner.rest());
            return Err(ParseError::new(
                pos,
                rest,
                format!(
                    "Expected comma after '{}' parameter at position {pos}: {rest:?}",
                    pair.key
                ),
            ));
        }

        match pair.key.strip_prefix(OAUTH_PREFIX) {
            Some(key) if valid_keys.contains(&key) => {
                attributes.insert(key, unescape(pair.value));
            }
            _ => debug!("skip unrecognized header parameter: {}", pair.key),
        }
    }

    if !scanner.is_eos() {
        let (pos, rest) = (scanner.pos, scanner.rest());
        return Err(ParseError::new(
            pos,
            rest,
            format!("Could not parse parameter at position {pos}: {rest:?}"),
        ));
    }

    Ok(attributes)
}

/// Parse OAuth attributes out of a form encoded body.
///
/// `+` decodes to a space and a pair without `=` has an empty value. Only
/// `oauth_` prefixed keys naming a signing attribute or `signature` are kept,
/// and a repeated key keeps its first value. This never fails.
pub fn parse_form_body(body: impl AsRef<[u8]>) -> Options {
    let mut attributes = Options::new();
    for (key, value) in form_urlencoded::parse(body.as_ref()) {
        let Some(key) = key.strip_prefix(OAUTH_PREFIX) else {
            continue;
        };
        if PARSE_KEYS.contains(&key) && !attributes.contains_key(key) {
            attributes.insert(key, value);
        }
    }
    attributes
}

struct Pair<'a> {
    key: &'a str,
    value: &'a str,
    comma: bool,
}

/// Byte scanner over a header value.
///
/// Every stop position sits on an ASCII byte, so slicing `input` at `pos` is
/// always on a char boundary.
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn is_eos(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self, at: usize) -> Option<u8> {
        self.input.as_bytes().get(at).copied()
    }

    fn skip_space(&self, mut at: usize) -> usize {
        while self.peek(at).is_some_and(is_space) {
            at += 1;
        }
        at
    }

    /// `OAuth` followed by at least one whitespace.
    fn scan_prefix(&mut self) -> bool {
        if !self.input.starts_with(OAUTH_SCHEME) {
            return false;
        }

        let start = OAUTH_SCHEME.len();
        let end = self.skip_space(start);
        if end == start {
            return false;
        }
        self.pos = end;
        true
    }

    /// `key="value"`, optional whitespace, optional comma, optional whitespace.
    ///
    /// Leaves the position untouched when no pair starts here.
    fn scan_pair(&mut self) -> Option<Pair<'a>> {
        let key_start = self.pos;
        let mut at = key_start;
        while self.peek(at).is_some_and(is_word) {
            at += 1;
        }
        if at == key_start {
            return None;
        }
        let key_end = at;

        if self.peek(at) != Some(b'=') || self.peek(at + 1) != Some(b'"') {
            return None;
        }
        let value_start = at + 2;
        let value_end = value_start + self.input[value_start..].find('"')?;

        at = self.skip_space(value_end + 1);
        let comma = self.peek(at) == Some(b',');
        if comma {
            at = self.skip_space(at + 1);
        }

        self.pos = at;
        Some(Pair {
            key: &self.input[key_start..key_end],
            value: &self.input[value_start..value_end],
            comma,
        })
    }
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}
