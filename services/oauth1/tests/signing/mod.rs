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

use anyhow::Result;
use log::debug;
use oauthsign_core::ErrorKind;
use oauthsign_oauth1::{parse, BodyHashAlgorithm, Header, Options};
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_twitter_get() -> Result<()> {
    init();

    let header = Header::new("GET", TWITTER_FRIENDS_URL, &[], twitter_options())?;
    let value = header.to_header()?;
    debug!("signed header: {value}");

    assert_eq!(
        value,
        r#"OAuth oauth_consumer_key="8karQBlMg6gFOwcf8kcoYw", oauth_nonce="547fed103e122eecf84c080843eedfe6", oauth_signature="i9CT6ahDRAlfGX3hKYf78QzXsaw%3D", oauth_signature_method="HMAC-SHA1", oauth_timestamp="1286830180", oauth_token="201425800-Sv4sTcgoffmHGkTCue0JnURT8vrm4DiFAkeFNDkh", oauth_version="1.0""#
    );
    Ok(())
}

#[test]
fn test_twitter_post_with_params() -> Result<()> {
    init();

    let options = twitter_options()
        .with("nonce", "b40a3e0f18590ecdcc0e273f7d7c82f8")
        .with("timestamp", "1286830181");
    let header = Header::new("POST", TWITTER_UPDATE_URL, &[("status", "hi, again")], options)?;

    assert_eq!(
        header.signed_attributes()?.get("oauth_signature").map(String::as_str),
        Some("mPqSFKejrWWk3ZT9bTQjhO5b2xI=")
    );
    assert!(header
        .to_header()?
        .contains(r#"oauth_signature="mPqSFKejrWWk3ZT9bTQjhO5b2xI%3D""#));
    Ok(())
}

#[test]
fn test_query_params_are_signed() -> Result<()> {
    let options = Options::from([
        ("consumer_key", "dpf43f3p2l4k3l03"),
        ("consumer_secret", "kd94hf93k423kf44"),
        ("nonce", "kllo9940pd9333jh"),
        ("timestamp", "1191242096"),
        ("token", "nnch734d00sl2jdk"),
        ("token_secret", "pfkkdhi9sl3r4s00"),
    ]);

    let from_query = Header::new(
        "GET",
        "http://photos.example.net/photos?size=original&file=vacation.jpg",
        &[],
        options.clone(),
    )?;
    let from_params = Header::new(
        "GET",
        "http://photos.example.net/photos",
        &[("file", "vacation.jpg"), ("size", "original")],
        options,
    )?;

    assert_eq!(from_query.signature()?, "tR3+Ty81lMeYAr/Fid0kMTYa/WM=");
    assert_eq!(from_query.signature()?, from_params.signature()?);
    Ok(())
}

#[test]
fn test_plaintext() -> Result<()> {
    let options = Options::from([
        ("consumer_key", "key"),
        ("consumer_secret", "efgh"),
        ("token_secret", "mnop"),
        ("signature_method", "PLAINTEXT"),
    ]);
    let header = Header::new("GET", TWITTER_FRIENDS_URL, &[], options)?;

    assert_eq!(header.signature()?, "efgh&mnop");
    assert!(header.to_header()?.contains(r#"oauth_signature="efgh%26mnop""#));
    Ok(())
}

#[test]
fn test_plaintext_without_token_secret() -> Result<()> {
    let options = Options::from([
        ("consumer_key", "jd83jd92dhsh93js"),
        ("consumer_secret", "ja893SD9"),
        ("signature_method", "PLAINTEXT"),
        ("callback", "http://client.example.net/cb?x=1"),
    ]);
    let header = Header::new(
        "POST",
        "http://server.example.com/request_temp_credentials",
        &[],
        options,
    )?;

    let value = header.to_header()?;
    assert!(value.contains(r#"oauth_signature="ja893SD9%26""#));
    assert!(value.starts_with(
        r#"OAuth oauth_callback="http%3A%2F%2Fclient.example.net%2Fcb%3Fx%3D1", oauth_consumer_key="jd83jd92dhsh93js""#
    ));
    Ok(())
}

#[test]
fn test_hmac_sha256() -> Result<()> {
    let options = twitter_options().with("signature_method", "HMAC-SHA256");
    let header = Header::new("GET", TWITTER_FRIENDS_URL, &[], options)?;

    assert_eq!(
        header.signature()?,
        "PNzEtEcjBwCTw36Msb0dYCVwXPGZqaapda+FAXzznHg="
    );
    Ok(())
}

#[test]
fn test_rsa_sha1() -> Result<()> {
    let header = Header::new(
        "GET",
        "http://photos.example.net/photos",
        &[("file", "vacation.jpg"), ("size", "original")],
        rsa_options(RSA_PRIVATE_KEY),
    )?;

    assert_eq!(
        header.signature_base()?,
        "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg%26oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3D13917289812797014437%26oauth_signature_method%3DRSA-SHA1%26oauth_timestamp%3D1196666512%26oauth_version%3D1.0%26size%3Doriginal"
    );
    assert_eq!(
        header.signature()?,
        "sHDaWQ2iBGpwzanmx2Ex+h/2G+jTHOECB2imWl/q4uKF0+pl1wK/9qxcUX1Nf63nBlfMmRGERjfwPg4qyDV2HjUHz7x0Xl7MeS6pJThXB/X6mNI4rIFgWGM5iWfMZZLQKWgfl82yAYuMRH/yFYF+G3p9mUJAomQa1zVx18jYrwHXI0AD0FVLRWnTe2vBZiHW05SZEU9rbQScrEFTb0Y4aQbuDL0WFattNnG+ssQud3M4bneld6IM6+COL8EGvjXQQDmZ0ca+hkuCEjfQxklqJIVBYIcXqcGfbuNuKWTXBxVvDksnstySslod+RYkQFc5WfagDZ+HLe1ydRRhIU6VOA=="
    );
    Ok(())
}

#[test]
fn test_rsa_sha1_accepts_pkcs1_key() -> Result<()> {
    let params = [("file", "vacation.jpg"), ("size", "original")];
    let pkcs8 = Header::new(
        "GET",
        "http://photos.example.net/photos",
        &params,
        rsa_options(RSA_PRIVATE_KEY),
    )?;
    let pkcs1 = Header::new(
        "GET",
        "http://photos.example.net/photos",
        &params,
        rsa_options(RSA_PRIVATE_KEY_PKCS1),
    )?;

    assert_eq!(pkcs8.signature()?, pkcs1.signature()?);
    Ok(())
}

#[test]
fn test_rsa_sha1_rejects_invalid_key() -> Result<()> {
    let header = Header::new(
        "GET",
        "http://photos.example.net/photos",
        &[],
        rsa_options("not a pem key"),
    )?;

    let err = header.signature().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyInvalid);
    assert!(std::error::Error::source(&err).is_some());
    Ok(())
}

#[test]
fn test_realm_is_rendered_but_not_signed() -> Result<()> {
    let plain = Header::new("GET", TWITTER_FRIENDS_URL, &[], twitter_options())?;
    let with_realm = Header::new(
        "GET",
        TWITTER_FRIENDS_URL,
        &[],
        twitter_options().with("realm", "Twitter API"),
    )?;

    assert_eq!(plain.signature()?, with_realm.signature()?);

    let value = with_realm.to_header()?;
    assert!(value.ends_with(r#"oauth_version="1.0", realm="Twitter%20API""#));
    assert!(!value.contains("oauth_realm"));
    Ok(())
}

#[test]
fn test_signature_is_deterministic() -> Result<()> {
    let header = Header::new("GET", TWITTER_FRIENDS_URL, &[], twitter_options())?;

    assert_eq!(header.to_header()?, header.to_header()?);
    Ok(())
}

#[test]
fn test_defaults_vary_between_headers() -> Result<()> {
    let options = Options::from([("consumer_key", "key"), ("consumer_secret", "secret")]);
    let first = Header::new("GET", TWITTER_FRIENDS_URL, &[], options.clone())?;
    let second = Header::new("GET", TWITTER_FRIENDS_URL, &[], options)?;

    assert_ne!(first.options().get("nonce"), second.options().get("nonce"));
    assert_ne!(first.signature()?, second.signature()?);
    Ok(())
}

#[test]
fn test_round_trip() -> Result<()> {
    let options = twitter_options()
        .with("callback", "http://printer.example.com/ready")
        .with("verifier", "hfdp7dh39dks9884")
        .with("version", "1.0");
    let header = Header::new("POST", TWITTER_UPDATE_URL, &[("status", "hi")], options.clone())?;

    let mut parsed = parse(&header.to_header()?)?;
    assert_eq!(parsed.remove("signature").as_deref(), Some(header.signature()?.as_str()));

    let mut expected = options;
    expected.remove("consumer_secret");
    expected.remove("token_secret");
    assert_eq!(parsed, expected);
    Ok(())
}

#[test]
fn test_special_characters_are_escaped() -> Result<()> {
    let options = twitter_options().with("callback", "http://a.example/?q=a b&c=é~");
    let header = Header::new("GET", TWITTER_FRIENDS_URL, &[], options)?;

    let value = header.to_header()?;
    assert!(value.contains(
        r#"oauth_callback="http%3A%2F%2Fa.example%2F%3Fq%3Da%20b%26c%3D%C3%A9~""#
    ));

    let parsed = parse(&value)?;
    assert_eq!(parsed.get("callback"), Some("http://a.example/?q=a b&c=é~"));
    Ok(())
}

#[test]
fn test_body_hash() -> Result<()> {
    let header = Header::with_body(
        "POST",
        "https://api.example.com/upload",
        &[],
        twitter_options().with("version", "1.0"),
        r#"{"a":1}"#,
    )?;

    assert_eq!(header.body(), Some(br#"{"a":1}"#.as_slice()));
    assert_eq!(
        header.options().get("body_hash"),
        Some("n4nHQM60bXQYySSnisV5QdXpZSA=")
    );
    assert_eq!(
        header.to_header()?,
        r#"OAuth oauth_body_hash="n4nHQM60bXQYySSnisV5QdXpZSA%3D", oauth_consumer_key="8karQBlMg6gFOwcf8kcoYw", oauth_nonce="547fed103e122eecf84c080843eedfe6", oauth_signature="eaK5YrrqHj%2BubQmyywXVl1LxZ%2B0%3D", oauth_signature_method="HMAC-SHA1", oauth_timestamp="1286830180", oauth_token="201425800-Sv4sTcgoffmHGkTCue0JnURT8vrm4DiFAkeFNDkh", oauth_version="1.0""#
    );
    Ok(())
}

#[test]
fn test_body_hash_supplied_option_wins() -> Result<()> {
    let sha256 = Header::body_hash_with(br#"{"a":1}"#, BodyHashAlgorithm::Sha256);
    assert_eq!(sha256, "AVq9f1zFei3ZS3WQ8ErYCEJzkF7jPsXOvq5iJ2qX+GI=");

    let header = Header::with_body(
        "POST",
        "https://api.example.com/upload",
        &[],
        twitter_options().with("body_hash", sha256.as_str()),
        r#"{"a":1}"#,
    )?;

    assert_eq!(header.options().get("body_hash"), Some(sha256.as_str()));
    Ok(())
}

#[test]
fn test_no_body_hash_without_body() -> Result<()> {
    let header = Header::new("POST", TWITTER_UPDATE_URL, &[], twitter_options())?;

    assert!(!header.attributes()?.contains_key("oauth_body_hash"));
    Ok(())
}
