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

use std::fmt::{Debug, Formatter};

use oauthsign_core::utils::Redact;
use oauthsign_core::SigningCredential;
use serde::Deserialize;

use crate::constants::*;
use crate::header::BodyHashAlgorithm;
use crate::options::Options;

/// Config for signing requests with OAuth 1.0.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Client identifier, sent as `oauth_consumer_key`.
    pub consumer_key: String,
    /// Client shared secret, or the PEM encoded private key for RSA methods.
    pub consumer_secret: Option<String>,
    /// Token identifier, sent as `oauth_token`.
    pub token: Option<String>,
    /// Token shared secret.
    pub token_secret: Option<String>,
    /// Signature method, `HMAC-SHA1` if unset.
    pub signature_method: Option<String>,
    /// Protection realm, rendered in the header but never signed.
    pub realm: Option<String>,
    /// Callback URI for temporary credential requests.
    pub callback: Option<String>,
    /// Verification code for token requests.
    pub verifier: Option<String>,
    /// Digest for `oauth_body_hash` when a body is signed.
    pub body_hash_algorithm: BodyHashAlgorithm,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("token", &self.token)
            .field("token_secret", &Redact::from(&self.token_secret))
            .field("signature_method", &self.signature_method)
            .field("realm", &self.realm)
            .field("callback", &self.callback)
            .field("verifier", &self.verifier)
            .field("body_hash_algorithm", &self.body_hash_algorithm)
            .finish()
    }
}

impl SigningCredential for Config {
    fn is_valid(&self) -> bool {
        !self.consumer_key.is_empty()
    }
}

impl From<&Config> for Options {
    fn from(config: &Config) -> Self {
        let mut options = Options::new().with(CONSUMER_KEY, &config.consumer_key);

        for (key, value) in [
            (CONSUMER_SECRET, &config.consumer_secret),
            (TOKEN, &config.token),
            (TOKEN_SECRET, &config.token_secret),
            (SIGNATURE_METHOD, &config.signature_method),
            (REALM, &config.realm),
            (CALLBACK, &config.callback),
            (VERIFIER, &config.verifier),
        ] {
            if let Some(value) = value {
                options.insert(key, value);
            }
        }
        options
    }
}
