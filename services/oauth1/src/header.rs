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

use std::collections::BTreeMap;

use http::header::AUTHORIZATION;
use log::{debug, warn};
use oauthsign_core::hash::{base64_sha1, base64_sha256};
use oauthsign_core::time::{format_unix_timestamp, now};
use oauthsign_core::{Error, Result, SigningRequest};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::base_string::{collect_params, normalize_params, signature_base};
use crate::constants::*;
use crate::encoding::escape;
use crate::options::{OauthOptions, Options};
use crate::parser;
use crate::signature::Registry;

/// Digest used for the `oauth_body_hash` extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyHashAlgorithm {
    /// SHA-1, the digest the extension was specified with.
    #[default]
    Sha1,
    /// SHA-256.
    Sha256,
}

/// An OAuth 1.0 `Authorization` header for one request.
///
/// A header is built either to sign an outgoing request, from explicit
/// [`Options`] merged over fresh defaults, or to verify an incoming one,
/// from the `Authorization` value it carried. Inputs never change after
/// construction: [`Header::valid`] computes over a merged copy.
///
/// ```
/// use oauthsign_oauth1::{Header, Options};
///
/// let options = Options::from([
///     ("consumer_key", "key"),
///     ("consumer_secret", "secret"),
///     ("nonce", "abc"),
///     ("timestamp", "1286830180"),
/// ]);
/// let header = Header::new("GET", "https://api.example.com/items?page=2", &[], options)?;
///
/// let value = header.to_header()?;
/// assert!(value.starts_with(r#"OAuth oauth_consumer_key="key", oauth_nonce="abc""#));
/// # Ok::<(), oauthsign_core::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Header {
    request: SigningRequest,
    params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    options: Options,
    registry: Registry,
}

impl Header {
    /// Create a header for `method` and `url` with form `params`.
    pub fn new(
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        oauth: impl Into<OauthOptions>,
    ) -> Result<Self> {
        let request = SigningRequest::from_url(method, url)?;
        Self::build(request, params, oauth.into(), None)
    }

    /// Create a header for a request carrying a non form `body`.
    ///
    /// With explicit options, `body_hash` defaults to the SHA-1 body hash of
    /// `body`; a `body_hash` option supplied by the caller wins.
    pub fn with_body(
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        oauth: impl Into<OauthOptions>,
        body: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        let request = SigningRequest::from_url(method, url)?;
        Self::build(request, params, oauth.into(), Some(body.into()))
    }

    /// Wrap a received request for verification.
    ///
    /// The request must carry an `Authorization` header. A uri in origin form
    /// is resolved against the `Host` header with an `http` scheme. `params`
    /// are the form parameters of its body.
    pub fn from_request(parts: &http::request::Parts, params: &[(&str, &str)]) -> Result<Self> {
        let value = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| Error::malformed_header("request has no Authorization header"))?
            .to_str()?;

        let request = SigningRequest::build(parts)?;
        Self::build(
            request,
            params,
            OauthOptions::FromHeader(value.to_string()),
            None,
        )
    }

    pub(crate) fn build(
        request: SigningRequest,
        params: &[(&str, &str)],
        oauth: OauthOptions,
        body: Option<Vec<u8>>,
    ) -> Result<Self> {
        let options = match oauth {
            OauthOptions::Explicit(options) => {
                defaults_for(&options, body.as_deref()).merged(&options)
            }
            OauthOptions::FromHeader(header) => parser::parse(&header)?,
        };

        Ok(Self {
            request,
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body,
            options,
            registry: Registry::global().clone(),
        })
    }

    /// Sign with `registry` instead of the process-wide registry.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Fresh defaults: a random nonce, the current timestamp, `HMAC-SHA1`,
    /// version `1.0`, and the body hash when a body is given.
    pub fn default_options(body: Option<&[u8]>) -> Options {
        let mut options = Options::from([
            (NONCE, generate_nonce()),
            (SIGNATURE_METHOD, DEFAULT_SIGNATURE_METHOD.to_string()),
            (TIMESTAMP, format_unix_timestamp(now())),
            (VERSION, OAUTH_VERSION.to_string()),
        ]);
        if let Some(body) = body {
            options.insert(BODY_HASH, Self::body_hash(body));
        }
        options
    }

    /// Base64 of the SHA-1 digest of `body`.
    pub fn body_hash(body: &[u8]) -> String {
        Self::body_hash_with(body, BodyHashAlgorithm::Sha1)
    }

    /// Base64 of the `algorithm` digest of `body`.
    pub fn body_hash_with(body: &[u8], algorithm: BodyHashAlgorithm) -> String {
        match algorithm {
            BodyHashAlgorithm::Sha1 => base64_sha1(body),
            BodyHashAlgorithm::Sha256 => base64_sha256(body),
        }
    }

    /// See [`crate::parse`].
    pub fn parse(header: &str) -> Result<Options> {
        parser::parse(header)
    }

    /// See [`crate::parse_form_body`].
    pub fn parse_form_body(body: impl AsRef<[u8]>) -> Options {
        parser::parse_form_body(body)
    }

    /// Uppercase HTTP method.
    pub fn method(&self) -> &str {
        self.request.method.as_str()
    }

    /// Base url: no query, no fragment, no default port.
    pub fn url(&self) -> String {
        self.request.base_url()
    }

    /// Parameters decoded from the url query, duplicates kept.
    pub fn url_params(&self) -> &[(String, String)] {
        &self.request.query
    }

    /// Form parameters of the request.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Raw body, if the header was built with one.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// The effective options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Signing attributes, keyed `oauth_<name>`.
    ///
    /// Fails with [`ErrorKind::InvalidOptions`](oauthsign_core::ErrorKind::InvalidOptions)
    /// if an option key is unknown and `ignore_extra_keys` is not set.
    pub fn attributes(&self) -> Result<BTreeMap<String, String>> {
        attributes_of(&self.options)
    }

    /// [`Header::attributes`] plus `realm`, which is rendered but never signed.
    pub fn header_attributes(&self) -> Result<BTreeMap<String, String>> {
        let mut attributes = self.attributes()?;
        if let Some(realm) = self.options.get(REALM) {
            attributes.insert(REALM.to_string(), realm.to_string());
        }
        Ok(attributes)
    }

    /// Escaped consumer secret and token secret joined with `&`.
    pub fn secret(&self) -> String {
        secret_of(&self.options)
    }

    /// The signature base string.
    pub fn signature_base(&self) -> Result<String> {
        self.signature_base_of(&self.options)
    }

    /// Compute `oauth_signature`.
    pub fn signature(&self) -> Result<String> {
        self.signature_of(&self.options)
    }

    /// [`Header::header_attributes`] plus `oauth_signature`.
    pub fn signed_attributes(&self) -> Result<BTreeMap<String, String>> {
        let mut attributes = self.header_attributes()?;
        attributes.insert(format!("{OAUTH_PREFIX}{SIGNATURE}"), self.signature()?);
        Ok(attributes)
    }

    /// Render the `Authorization` header value: attributes sorted by key,
    /// values escaped.
    pub fn to_header(&self) -> Result<String> {
        let attributes = self
            .signed_attributes()?
            .iter()
            .map(|(k, v)| format!("{k}=\"{}\"", escape(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("{OAUTH_SCHEME} {attributes}"))
    }

    /// Check the received signature against one recomputed with `secrets`
    /// merged over the options.
    ///
    /// A mismatch is `Ok(false)`. Errors raised while computing the candidate
    /// signature, such as an unusable RSA key, are returned as is. Fails with
    /// [`ErrorKind::InvalidOptions`](oauthsign_core::ErrorKind::InvalidOptions)
    /// if there is no signature to compare with.
    pub fn valid(&self, secrets: &Options) -> Result<bool> {
        let options = self.options.merged(secrets);
        let expected = options
            .get(SIGNATURE)
            .ok_or_else(|| Error::invalid_options("no signature to validate"))?;

        Ok(self.signature_of(&options)? == expected)
    }

    fn signature_base_of(&self, options: &Options) -> Result<String> {
        let attributes: Vec<(String, String)> = attributes_of(options)?.into_iter().collect();
        let params = collect_params(&attributes, &self.params, self.url_params());

        Ok(signature_base(
            self.method(),
            &self.url(),
            &normalize_params(&params),
        ))
    }

    fn signature_of(&self, options: &Options) -> Result<String> {
        let method = options.get(SIGNATURE_METHOD).ok_or_else(|| {
            Error::invalid_options(format!("{SIGNATURE_METHOD} is required for signing"))
        })?;

        let base = self.signature_base_of(options)?;
        debug!("calculated signature base string: {base}");

        // RSA methods are keyed with the raw private key.
        if self.registry.is_rsa(method) {
            debug!("signing with rsa method: {method}");
            let key = options.get(CONSUMER_SECRET).unwrap_or_default();
            self.registry.sign(method, key, &base)
        } else {
            debug!("signing with method: {method}");
            self.registry.sign(method, &secret_of(options), &base)
        }
    }
}

/// Defaults to merge `options` over. The body is only hashed when no
/// `body_hash` was supplied.
fn defaults_for(options: &Options, body: Option<&[u8]>) -> Options {
    let body = body.filter(|_| !options.contains_key(BODY_HASH));
    Header::default_options(body)
}

fn attributes_of(options: &Options) -> Result<BTreeMap<String, String>> {
    let extra_keys = options.extra_keys();
    if !extra_keys.is_empty() {
        if !options.ignore_extra_keys() {
            return Err(Error::invalid_options(format!(
                "found extra option keys not matching attribute keys: [{}]",
                extra_keys.join(", ")
            )));
        }
        warn!("ignoring extra option keys: {extra_keys:?}");
    }

    Ok(options
        .iter()
        .filter(|(k, _)| ATTRIBUTE_KEYS.contains(k))
        .map(|(k, v)| (format!("{OAUTH_PREFIX}{k}"), v.to_string()))
        .collect())
}

fn secret_of(options: &Options) -> String {
    format!(
        "{}&{}",
        escape(options.get(CONSUMER_SECRET).unwrap_or_default()),
        escape(options.get(TOKEN_SECRET).unwrap_or_default())
    )
}

fn generate_nonce() -> String {
    let bytes: [u8; 16] = rand::thread_rng().gen();
    hex::encode(bytes)
}
