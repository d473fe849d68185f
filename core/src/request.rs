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

use http::header::HOST;
use http::uri::Authority;
use http::uri::Scheme;
use http::Method;
use http::Uri;

use crate::Error;
use crate::Result;

/// Signing context for request.
///
/// Holds the request target in the normalized form signature base strings
/// are built from: lowercase scheme and host, no userinfo, no default port,
/// no fragment, and the query string decomposed into pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// Lowercase scheme, e.g. `https`.
    pub scheme: String,
    /// Lowercase host with an optional non-default port.
    pub authority: String,
    /// HTTP path, `/` when the url has none.
    pub path: String,
    /// Decoded query pairs in their original order, duplicates kept.
    pub query: Vec<(String, String)>,
}

impl SigningRequest {
    /// Build a signing context from a method and a url string.
    ///
    /// The method is uppercased before parsing.
    pub fn from_url(method: &str, url: &str) -> Result<Self> {
        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;

        // Fragments never take part in signing.
        let url = url.split('#').next().unwrap_or_default();
        let uri: Uri = url.parse()?;

        Self::from_uri(method, &uri, None)
    }

    /// Build a signing context from http::request::Parts.
    ///
    /// A request received in origin form (`/path?query`) takes its authority
    /// from the `Host` header. Such a request carries no scheme, so `http`
    /// is assumed.
    pub fn build(parts: &http::request::Parts) -> Result<Self> {
        let host = match parts.uri.authority() {
            Some(_) => None,
            None => parts
                .headers
                .get(HOST)
                .map(|v| -> Result<Authority> { Ok(v.to_str()?.parse()?) })
                .transpose()?,
        };

        Self::from_uri(parts.method.clone(), &parts.uri, host.as_ref())
    }

    fn from_uri(method: Method, uri: &Uri, host: Option<&Authority>) -> Result<Self> {
        let scheme = uri
            .scheme()
            .unwrap_or(&Scheme::HTTP)
            .as_str()
            .to_ascii_lowercase();
        let authority = uri.authority().or(host).ok_or_else(|| {
            Error::request_invalid(format!(
                "request without authority is invalid for signing: {uri}"
            ))
        })?;

        let host = authority.host().to_ascii_lowercase();
        let authority = match (scheme.as_str(), authority.port_u16()) {
            ("http", Some(80)) | ("https", Some(443)) | (_, None) => host,
            (_, Some(port)) => format!("{host}:{port}"),
        };

        let path = match uri.path() {
            "" => "/".to_string(),
            v => v.to_string(),
        };

        let query = uri
            .query()
            .map(|v| {
                form_urlencoded::parse(v.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(SigningRequest {
            method,
            scheme,
            authority,
            path,
            query,
        })
    }

    /// Url without query and fragment: `scheme://authority/path`.
    pub fn base_url(&self) -> String {
        format!("{}://{}{}", self.scheme, self.authority, self.path)
    }
}
