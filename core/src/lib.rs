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

//! Core components for signing API requests.
//!
//! This crate provides the service-independent pieces of the oauthsign
//! workspace: the shared error type, hashing helpers, time helpers,
//! request normalization and the traits signers implement.
//!
//! ## Overview
//!
//! - [`SigningRequest`]: a request target normalized for signing (lowercase
//!   scheme and host, default port removed, query decomposed into pairs).
//! - [`SignRequest`]: implemented by service signers to sign `http` request parts.
//! - [`SigningCredential`]: implemented by credentials to report validity.
//! - [`Error`]: the error returned by every fallible operation, classified by [`ErrorKind`].
//!
//! ## Example
//!
//! ```
//! use oauthsign_core::SigningRequest;
//!
//! let req = SigningRequest::from_url("get", "HTTPS://Example.com:443/a?b=c#frag")?;
//! assert_eq!(req.base_url(), "https://example.com/a");
//! assert_eq!(req.query, vec![("b".to_string(), "c".to_string())]);
//! # Ok::<(), oauthsign_core::Error>(())
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{SignRequest, SigningCredential};
mod request;
pub use request::SigningRequest;
