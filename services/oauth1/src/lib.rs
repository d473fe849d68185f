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

//! OAuth 1.0 signer
//!
//! Builds, parses and validates [RFC 5849](https://www.rfc-editor.org/rfc/rfc5849)
//! `Authorization` headers.
//!
//! ## Signing
//!
//! ```
//! use oauthsign_oauth1::{Header, Options};
//!
//! let options = Options::from([
//!     ("consumer_key", "dpf43f3p2l4k3l03"),
//!     ("consumer_secret", "kd94hf93k423kf44"),
//!     ("token", "nnch734d00sl2jdk"),
//!     ("token_secret", "pfkkdhi9sl3r4s00"),
//! ]);
//! let header = Header::new("GET", "http://photos.example.net/photos", &[("size", "original")], options)?;
//! let value = header.to_header()?;
//! assert!(value.starts_with("OAuth oauth_consumer_key=\"dpf43f3p2l4k3l03\""));
//! # Ok::<(), oauthsign_core::Error>(())
//! ```
//!
//! ## Verifying
//!
//! ```
//! use oauthsign_oauth1::{Header, OauthOptions, Options};
//!
//! # let options = Options::from([("consumer_key", "key"), ("consumer_secret", "secret")]);
//! # let received = Header::new("GET", "https://api.example.com/", &[], options)?.to_header()?;
//! let header = Header::new("GET", "https://api.example.com/", &[], OauthOptions::FromHeader(received))?;
//! assert!(header.valid(&Options::from([("consumer_secret", "secret")]))?);
//! assert!(!header.valid(&Options::from([("consumer_secret", "wrong")]))?);
//! # Ok::<(), oauthsign_core::Error>(())
//! ```
//!
//! Signature methods are looked up in a [`Registry`]. `HMAC-SHA1`,
//! `HMAC-SHA256`, `RSA-SHA1` and `PLAINTEXT` are built in; more can be added
//! with [`signature::register`].

mod base_string;
pub use base_string::{collect_params, normalize_params, signature_base};

mod config;
pub use config::Config;

mod constants;
pub use constants::{ATTRIBUTE_KEYS, IGNORED_KEYS, PARSE_KEYS};

mod encoding;
pub use encoding::{decode, encode, escape, escape_bytes, unescape};

mod header;
pub use header::{BodyHashAlgorithm, Header};

mod options;
pub use options::{OauthOptions, Options};

mod parser;
pub use parser::{parse, parse_form_body, parse_with_keys, ParseError};

pub mod signature;
pub use signature::{Registry, SignatureMethod};

mod sign_request;
pub use sign_request::RequestSigner;
