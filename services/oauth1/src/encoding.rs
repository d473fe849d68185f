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

//! OAuth percent-encoding.
//!
//! Every byte of the UTF-8 representation is encoded except `[A-Za-z0-9-._~]`,
//! using uppercase hex digits.

use std::fmt::Display;

use percent_encoding::percent_decode_str;
use percent_encoding::percent_encode;

use crate::constants::OAUTH_ENCODE_SET;

/// Percent-encode the string form of `value`.
///
/// ```
/// use oauthsign_oauth1::escape;
///
/// assert_eq!(escape("hello world"), "hello%20world");
/// assert_eq!(escape(1286830180), "1286830180");
/// ```
pub fn escape(value: impl Display) -> String {
    escape_bytes(value.to_string().as_bytes())
}

/// Percent-encode raw bytes, each byte independently.
pub fn escape_bytes(value: &[u8]) -> String {
    percent_encode(value, &OAUTH_ENCODE_SET).to_string()
}

/// Decode `%XX` sequences.
///
/// Anything that is not a valid escape passes through untouched, and `+` is
/// kept literally. Decoded bytes that do not form valid UTF-8 are replaced
/// with U+FFFD.
pub fn unescape(value: impl AsRef<str>) -> String {
    percent_decode_str(value.as_ref())
        .decode_utf8_lossy()
        .into_owned()
}

/// Alias of [`escape`].
pub fn encode(value: impl Display) -> String {
    escape(value)
}

/// Alias of [`unescape`].
pub fn decode(value: impl AsRef<str>) -> String {
    unescape(value)
}
