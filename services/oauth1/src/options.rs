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
use std::fmt::{Debug, Formatter};

use oauthsign_core::utils::Redact;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// OAuth options: credentials plus protocol attributes, keyed by their bare
/// name (`consumer_key`, not `oauth_consumer_key`).
///
/// Known keys are listed in [`ATTRIBUTE_KEYS`] (signed and rendered) and
/// [`IGNORED_KEYS`] (never signed). Anything else is an extra key, which
/// fails signing unless `ignore_extra_keys` is set.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    ignore_extra_keys: bool,
}

impl Options {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, returning the previous value.
    ///
    /// The `ignore_extra_keys` key sets the flag instead of storing a value:
    /// anything other than `""`, `"0"` and `"false"` turns it on.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        if key == IGNORE_EXTRA_KEYS {
            self.ignore_extra_keys = !matches!(value.as_str(), "" | "0" | "false");
            return None;
        }
        self.values.insert(key, value)
    }

    /// Builder style [`Options::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get the value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Check if `key` is set.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no value is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether unknown keys are tolerated.
    pub fn ignore_extra_keys(&self) -> bool {
        self.ignore_extra_keys
    }

    /// Set whether unknown keys are tolerated.
    pub fn set_ignore_extra_keys(&mut self, ignore: bool) {
        self.ignore_extra_keys = ignore;
    }

    /// Return a copy of `self` with every value of `overlay` applied on top.
    ///
    /// `ignore_extra_keys` is set if either side sets it.
    pub fn merged(&self, overlay: &Options) -> Options {
        let mut merged = self.clone();
        merged.extend_from(overlay);
        merged
    }

    /// Apply every value of `overlay` on top of `self`.
    pub fn extend_from(&mut self, overlay: &Options) {
        for (k, v) in overlay.iter() {
            self.values.insert(k.to_string(), v.to_string());
        }
        self.ignore_extra_keys |= overlay.ignore_extra_keys;
    }

    /// Keys that are neither signing attributes nor known non-signing keys.
    pub fn extra_keys(&self) -> Vec<&str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|k| !ATTRIBUTE_KEYS.contains(k) && !IGNORED_KEYS.contains(k))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Options
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut options = Options::new();
        for (k, v) in iter {
            options.insert(k, v);
        }
        options
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Options
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for Options {
    fn from(values: BTreeMap<String, String>) -> Self {
        values.into_iter().collect()
    }
}

impl Debug for Options {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in &self.values {
            match k.as_str() {
                CONSUMER_SECRET | TOKEN_SECRET | SIGNATURE => map.entry(k, &Redact::from(v)),
                _ => map.entry(k, v),
            };
        }
        if self.ignore_extra_keys {
            map.entry(&IGNORE_EXTRA_KEYS, &true);
        }
        map.finish()
    }
}

/// Where a [`Header`](crate::Header) gets its OAuth options from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OauthOptions {
    /// Options supplied by the caller, merged over freshly generated defaults.
    Explicit(Options),
    /// An existing `Authorization` header to parse, used to verify a received
    /// request. No defaults are generated.
    FromHeader(String),
}

impl From<Options> for OauthOptions {
    fn from(options: Options) -> Self {
        OauthOptions::Explicit(options)
    }
}
