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

//! [Signature base string](https://www.rfc-editor.org/rfc/rfc5849#section-3.4.1)
//! construction.

use crate::encoding::escape;

/// Normalize request parameters.
///
/// Keys and values are encoded first, then the encoded pairs are sorted by
/// key and then value, and joined as `k=v` with `&`.
pub fn normalize_params<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut encoded: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (escape(k.as_ref()), escape(v.as_ref())))
        .collect();
    encoded.sort();

    encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the signature base string from an uppercase method, the base url
/// and already normalized parameters.
pub fn signature_base(method: &str, url: &str, normalized_params: &str) -> String {
    format!(
        "{}&{}&{}",
        escape(method),
        escape(url),
        escape(normalized_params)
    )
}

/// Concatenate the three parameter sources in order. Every occurrence is
/// kept, duplicates included.
pub fn collect_params(
    attributes: &[(String, String)],
    body_params: &[(String, String)],
    url_params: &[(String, String)],
) -> Vec<(String, String)> {
    attributes
        .iter()
        .chain(body_params)
        .chain(url_params)
        .cloned()
        .collect()
}
