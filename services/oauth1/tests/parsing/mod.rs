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
use oauthsign_core::ErrorKind;
use oauthsign_oauth1::{parse_with_keys, Header, OauthOptions, ParseError, PARSE_KEYS};
use pretty_assertions::assert_eq;
use test_case::test_case;

use super::*;

fn parse_error(header: &str) -> ParseError {
    parse_with_keys(header, PARSE_KEYS).unwrap_err()
}

#[test]
fn test_parse_signed_header() -> Result<()> {
    let value = Header::new("GET", TWITTER_FRIENDS_URL, &[], twitter_options())?.to_header()?;
    let parsed = Header::parse(&value)?;

    assert_eq!(parsed.get("signature"), Some("i9CT6ahDRAlfGX3hKYf78QzXsaw="));
    assert_eq!(parsed.get("consumer_key"), Some("8karQBlMg6gFOwcf8kcoYw"));
    assert_eq!(parsed.get("version"), Some("1.0"));
    assert!(!parsed.contains_key("consumer_secret"));
    Ok(())
}

#[test]
fn test_parse_ignores_realm() -> Result<()> {
    let parsed = Header::parse(r#"OAuth realm="Photos", oauth_token="abc""#)?;

    assert_eq!(parsed.iter().collect::<Vec<_>>(), vec![("token", "abc")]);
    Ok(())
}

#[test_case("Bearer xyz" ; "other scheme")]
#[test_case("Basic dXNlcjpwYXNz" ; "basic")]
#[test_case("OAuth" ; "no whitespace")]
#[test_case(" OAuth oauth_token=\"a\"" ; "leading whitespace")]
fn test_parse_rejects_non_oauth(header: &str) {
    let err = Header::parse(header).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedHeader);
    assert!(err.to_string().contains("must start with 'OAuth '"));
}

#[test]
fn test_parse_missing_comma_reports_position() {
    let err = parse_error(r#"OAuth k="v" k2="v2""#);

    assert_eq!(err.position(), 12);
    assert_eq!(err.rest(), r#"k2="v2""#);
    assert_eq!(
        err.to_string(),
        r#"Expected comma after 'k' parameter at position 12: "k2=\"v2\"""#
    );
}

#[test]
fn test_parse_missing_comma_after_tight_quote() {
    let err = parse_error(r#"OAuth oauth_token="a"oauth_nonce="b""#);

    assert_eq!(err.position(), 21);
    assert!(err.to_string().starts_with("Expected comma after 'oauth_token'"));
}

#[test_case(r#"OAuth oauth_token="a", garbage"#, 23, "garbage" ; "trailing garbage")]
#[test_case(r#"OAuth oauth_token='a'"#, 6, "oauth_token='a'" ; "single quotes")]
#[test_case(r#"OAuth oauth-token="a""#, 6, r#"oauth-token="a""# ; "dash in key")]
#[test_case(r#"OAuth oauth_token = "a""#, 6, r#"oauth_token = "a""# ; "space around equals")]
#[test_case(r#"OAuth oauth_token="a", , oauth_nonce="b""#, 23, r#", oauth_nonce="b""# ; "double comma")]
fn test_parse_reports_unparsed_rest(header: &str, position: usize, rest: &str) {
    let err = parse_error(header);

    assert_eq!(err.position(), position);
    assert_eq!(err.rest(), rest);
    assert_eq!(
        err.to_string(),
        format!("Could not parse parameter at position {position}: {rest:?}")
    );
}

#[test]
fn test_parse_error_through_header_constructor() {
    let err = Header::new(
        "GET",
        TWITTER_FRIENDS_URL,
        &[],
        OauthOptions::FromHeader(r#"OAuth oauth_token="a" oauth_nonce="b""#.to_string()),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedHeader);
}

#[test]
fn test_parse_form_body() {
    let parsed = Header::parse_form_body(
        "status=hi&oauth_consumer_key=key&oauth_signature=abc%3D&oauth_nonce=first&oauth_nonce=second&oauth_callback=http%3A%2F%2Fa.example%2F%3Fx%3Da+b",
    );

    assert_eq!(
        parsed.iter().collect::<Vec<_>>(),
        vec![
            ("callback", "http://a.example/?x=a b"),
            ("consumer_key", "key"),
            ("nonce", "first"),
            ("signature", "abc="),
        ]
    );
}

#[test]
fn test_verify_from_form_body() -> Result<()> {
    let signed = Header::new("POST", TWITTER_UPDATE_URL, &[], twitter_options())?;
    let body = signed
        .signed_attributes()?
        .iter()
        .map(|(k, v)| format!("{k}={}", oauthsign_oauth1::escape(v)))
        .collect::<Vec<_>>()
        .join("&");

    let received = Header::parse_form_body(&body);
    let header = Header::new(
        "POST",
        TWITTER_UPDATE_URL,
        &[],
        OauthOptions::Explicit(received),
    )?;

    assert!(header.valid(&twitter_secrets())?);
    Ok(())
}
