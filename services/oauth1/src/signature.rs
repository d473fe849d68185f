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

//! Signature method registry.
//!
//! Methods are looked up by a normalized name: lowercase with `-` replaced
//! by `_`, so `HMAC-SHA1`, `hmac_sha1` and `Hmac-Sha1` are the same method.
//!
//! A process-wide registry is available through [`Registry::global`] and the
//! free functions of this module. A [`Registry`] is a cheap handle: clones
//! share the same table.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, RwLock};

use log::debug;
use oauthsign_core::hash::{base64_encode, base64_hmac_sha1, base64_hmac_sha256};
use oauthsign_core::{Error, Result};
use once_cell::sync::Lazy;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha1::Sha1;

/// Signing function: `(secret, signature_base) -> signature`.
pub type SignFn = Arc<dyn Fn(&str, &str) -> Result<String> + Send + Sync>;

/// A registered signature method.
#[derive(Clone)]
pub struct SignatureMethod {
    name: String,
    rsa: bool,
    sign: SignFn,
}

impl SignatureMethod {
    fn new<F>(name: impl Into<String>, rsa: bool, sign: F) -> Self
    where
        F: Fn(&str, &str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            rsa,
            sign: Arc::new(sign),
        }
    }

    /// Normalized name of this method.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this method is keyed with a raw RSA private key instead of
    /// the escaped secret pair.
    pub fn is_rsa(&self) -> bool {
        self.rsa
    }

    /// Sign `signature_base` with `secret`.
    pub fn sign(&self, secret: &str, signature_base: &str) -> Result<String> {
        (self.sign)(secret, signature_base)
    }
}

impl Debug for SignatureMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureMethod")
            .field("name", &self.name)
            .field("rsa", &self.rsa)
            .finish_non_exhaustive()
    }
}

/// Normalize a signature method name for lookup.
pub fn normalize_name(name: &str) -> String {
    name.to_ascii_lowercase().replace('-', "_")
}

/// Table of signature methods guarded by a single lock.
///
/// Lookups clone the method out and release the lock before signing, so a
/// signing function may itself use the registry.
#[derive(Clone)]
pub struct Registry {
    methods: Arc<RwLock<BTreeMap<String, SignatureMethod>>>,
}

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

impl Registry {
    /// Create a registry holding the built-in methods:
    /// `HMAC-SHA1`, `HMAC-SHA256`, `RSA-SHA1` and `PLAINTEXT`.
    pub fn new() -> Self {
        Self {
            methods: Arc::new(RwLock::new(builtins())),
        }
    }

    /// Create a registry without any method.
    pub fn empty() -> Self {
        Self {
            methods: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Register `sign` under `name`, replacing any method with the same
    /// normalized name.
    pub fn register<F>(&self, name: &str, rsa: bool, sign: F)
    where
        F: Fn(&str, &str) -> Result<String> + Send + Sync + 'static,
    {
        let name = normalize_name(name);
        debug!("register signature method: {name}, rsa: {rsa}");

        let method = SignatureMethod::new(name.clone(), rsa, sign);
        self.methods
            .write()
            .expect("lock poisoned")
            .insert(name, method);
    }

    /// Remove the method registered under `name`.
    ///
    /// Returns whether a method was removed.
    pub fn unregister(&self, name: &str) -> bool {
        let name = normalize_name(name);
        debug!("unregister signature method: {name}");

        self.methods
            .write()
            .expect("lock poisoned")
            .remove(&name)
            .is_some()
    }

    /// Check if a method is registered under `name`.
    pub fn is_registered(&self, name: &str) -> bool {
        self.methods
            .read()
            .expect("lock poisoned")
            .contains_key(&normalize_name(name))
    }

    /// Normalized names of all registered methods, sorted.
    pub fn methods(&self) -> Vec<String> {
        self.methods
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Whether `name` is a registered RSA-keyed method.
    ///
    /// Unknown names are not RSA methods.
    pub fn is_rsa(&self, name: &str) -> bool {
        self.get(name).is_some_and(|m| m.is_rsa())
    }

    /// Get the method registered under `name`.
    pub fn get(&self, name: &str) -> Option<SignatureMethod> {
        self.methods
            .read()
            .expect("lock poisoned")
            .get(&normalize_name(name))
            .cloned()
    }

    /// Sign `signature_base` with the method registered under `name`.
    pub fn sign(&self, name: &str, secret: &str, signature_base: &str) -> Result<String> {
        let method = self.get(name).ok_or_else(|| {
            Error::unknown_signature_method(format!(
                "Unknown signature method: {name}. Registered methods: {}",
                self.methods().join(", ")
            ))
        })?;

        method.sign(secret, signature_base)
    }

    /// Drop every custom method and restore exactly the built-in ones.
    ///
    /// The table is swapped under a single write guard: concurrent lookups
    /// see either the old table or the built-ins, never an empty one.
    pub fn reset(&self) {
        debug!("reset signature methods to built-ins");

        let builtins = builtins();
        *self.methods.write().expect("lock poisoned") = builtins;
    }
}

fn builtins() -> BTreeMap<String, SignatureMethod> {
    [
        SignatureMethod::new("hmac_sha1", false, hmac_sha1),
        SignatureMethod::new("hmac_sha256", false, hmac_sha256),
        SignatureMethod::new("rsa_sha1", true, rsa_sha1),
        SignatureMethod::new("plaintext", false, plaintext),
    ]
    .into_iter()
    .map(|m| (m.name.clone(), m))
    .collect()
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("methods", &self.methods())
            .finish()
    }
}

/// Register a method in the process-wide registry.
pub fn register<F>(name: &str, rsa: bool, sign: F)
where
    F: Fn(&str, &str) -> Result<String> + Send + Sync + 'static,
{
    Registry::global().register(name, rsa, sign)
}

/// Remove a method from the process-wide registry.
pub fn unregister(name: &str) -> bool {
    Registry::global().unregister(name)
}

/// Check the process-wide registry for `name`.
pub fn is_registered(name: &str) -> bool {
    Registry::global().is_registered(name)
}

/// Names registered in the process-wide registry.
pub fn methods() -> Vec<String> {
    Registry::global().methods()
}

/// Whether `name` is an RSA-keyed method of the process-wide registry.
pub fn is_rsa(name: &str) -> bool {
    Registry::global().is_rsa(name)
}

/// Sign with a method of the process-wide registry.
pub fn sign(name: &str, secret: &str, signature_base: &str) -> Result<String> {
    Registry::global().sign(name, secret, signature_base)
}

/// Restore the process-wide registry to the built-in methods.
pub fn reset() {
    Registry::global().reset()
}

/// `HMAC-SHA1`: Base64 of HMAC-SHA1 keyed with the secret.
pub fn hmac_sha1(secret: &str, signature_base: &str) -> Result<String> {
    Ok(base64_hmac_sha1(secret.as_bytes(), signature_base.as_bytes()))
}

/// `HMAC-SHA256`: Base64 of HMAC-SHA256 keyed with the secret.
pub fn hmac_sha256(secret: &str, signature_base: &str) -> Result<String> {
    Ok(base64_hmac_sha256(
        secret.as_bytes(),
        signature_base.as_bytes(),
    ))
}

/// `RSA-SHA1`: Base64 of an RSASSA-PKCS1-v1_5 SHA1 signature.
///
/// `private_key_pem` is a PKCS#8 (`BEGIN PRIVATE KEY`) or PKCS#1
/// (`BEGIN RSA PRIVATE KEY`) PEM document.
pub fn rsa_sha1(private_key_pem: &str, signature_base: &str) -> Result<String> {
    let private_key = load_private_key(private_key_pem)?;

    let signing_key = SigningKey::<Sha1>::new(private_key);
    let signature = signing_key
        .try_sign(signature_base.as_bytes())
        .map_err(|e| Error::key_invalid("failed to sign with RSA-SHA1").with_source(e))?;

    Ok(base64_encode(&signature.to_bytes()))
}

/// `PLAINTEXT`: the escaped, `&`-joined secret itself.
pub fn plaintext(secret: &str, _signature_base: &str) -> Result<String> {
    Ok(secret.to_string())
}

/// Load an RSA private key from PEM, trying PKCS#8 before PKCS#1.
pub fn load_private_key(pem: &str) -> Result<RsaPrivateKey> {
    if let Ok(key) = RsaPrivateKey::from_pkcs8_pem(pem) {
        return Ok(key);
    }

    RsaPrivateKey::from_pkcs1_pem(pem).map_err(|e| {
        Error::key_invalid("consumer_secret is not a PEM encoded RSA private key").with_source(e)
    })
}
