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

use http::header::AUTHORIZATION;
use http::request::Parts;
use http::HeaderValue;
use log::debug;
use oauthsign_core::{Error, Result, SignRequest, SigningCredential, SigningRequest};

use crate::config::Config;
use crate::constants::{BODY_HASH, CONSUMER_KEY};
use crate::header::Header;
use crate::options::{OauthOptions, Options};
use crate::signature::Registry;

/// RequestSigner that signs requests with an OAuth 1.0 `Authorization` header.
///
/// - [RFC 5849: The OAuth 1.0 Protocol](https://www.rfc-editor.org/rfc/rfc5849)
#[derive(Debug, Clone)]
pub struct RequestSigner {
    registry: Registry,
}

impl RequestSigner {
    /// Create a new signer using the process-wide signature registry.
    pub fn new() -> Self {
        Self {
            registry: Registry::global().clone(),
        }
    }

    /// Sign with methods from `registry`.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Sign a request whose body is part of the signature.
    ///
    /// `params` are the form parameters of an `application/x-www-form-urlencoded`
    /// body. Any other `body` is bound through `oauth_body_hash`, computed with
    /// the configured digest.
    pub fn sign_with_body(
        &self,
        req: &mut Parts,
        credential: Option<&Config>,
        params: &[(&str, &str)],
        body: Option<&[u8]>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Ok(());
        };
        if !cred.is_valid() {
            return Err(Error::invalid_options(format!(
                "{CONSUMER_KEY} is required for signing"
            )));
        }

        let mut options = Options::from(cred);
        if let Some(body) = body {
            options.insert(
                BODY_HASH,
                Header::body_hash_with(body, cred.body_hash_algorithm),
            );
        }

        let signing_req = SigningRequest::build(req)?;
        let header = Header::build(
            signing_req,
            params,
            OauthOptions::Explicit(options),
            body.map(<[u8]>::to_vec),
        )?
        .with_registry(self.registry.clone());

        let value = header.to_header()?;
        debug!(
            "signed {} {} for consumer {}",
            header.method(),
            header.url(),
            cred.consumer_key
        );

        let mut value: HeaderValue = value.parse()?;
        value.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, value);

        Ok(())
    }
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl SignRequest for RequestSigner {
    type Credential = Config;

    fn sign_request(&self, req: &mut Parts, credential: Option<&Self::Credential>) -> Result<()> {
        self.sign_with_body(req, credential, &[], None)
    }
}
