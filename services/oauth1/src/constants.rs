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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// AsciiSet for [OAuth percent encoding](https://www.rfc-editor.org/rfc/rfc5849#section-3.6)
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static OAUTH_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Authorization scheme of OAuth 1.0 headers.
pub const OAUTH_SCHEME: &str = "OAuth";
/// Prefix carried by every protocol parameter on the wire.
pub const OAUTH_PREFIX: &str = "oauth_";

pub const DEFAULT_SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

// Option keys.
pub const BODY_HASH: &str = "body_hash";
pub const CALLBACK: &str = "callback";
pub const CONSUMER_KEY: &str = "consumer_key";
pub const CONSUMER_SECRET: &str = "consumer_secret";
pub const IGNORE_EXTRA_KEYS: &str = "ignore_extra_keys";
pub const NONCE: &str = "nonce";
pub const REALM: &str = "realm";
pub const SIGNATURE: &str = "signature";
pub const SIGNATURE_METHOD: &str = "signature_method";
pub const TIMESTAMP: &str = "timestamp";
pub const TOKEN: &str = "token";
pub const TOKEN_SECRET: &str = "token_secret";
pub const VERIFIER: &str = "verifier";
pub const VERSION: &str = "version";

/// Option keys that are signed and rendered as `oauth_<key>`.
pub const ATTRIBUTE_KEYS: &[&str] = &[
    BODY_HASH,
    CALLBACK,
    CONSUMER_KEY,
    NONCE,
    SIGNATURE_METHOD,
    TIMESTAMP,
    TOKEN,
    VERIFIER,
    VERSION,
];

/// Option keys that are accepted but never signed as attributes.
pub const IGNORED_KEYS: &[&str] = &[CONSUMER_SECRET, TOKEN_SECRET, SIGNATURE, REALM];

/// Keys recognized when parsing a header or a form body: attributes plus the signature.
pub const PARSE_KEYS: &[&str] = &[
    BODY_HASH,
    CALLBACK,
    CONSUMER_KEY,
    NONCE,
    SIGNATURE,
    SIGNATURE_METHOD,
    TIMESTAMP,
    TOKEN,
    VERIFIER,
    VERSION,
];
