//! # Header Inspection
//!
//! Reads the `alg` field of a compact token before any key material is
//! involved, so that `none` and foreign algorithms are refused up front.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;

use super::errors::AuthError;

/// The only algorithm this service signs with or accepts.
pub const EXPECTED_ALGORITHM: &str = "HS256";

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Decode the header segment and return its `alg` value.
pub fn peek_algorithm(token: &str) -> Result<String, AuthError> {
    let mut segments = token.split('.');
    let (Some(header), Some(_claims), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::MalformedToken(
            "expected three dot-separated segments".to_string(),
        ));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| AuthError::MalformedToken(format!("header encoding: {e}")))?;
    let raw: RawHeader = serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::MalformedToken(format!("header json: {e}")))?;
    Ok(raw.alg)
}

/// Fail with `UnexpectedAlgorithm` unless the header says HS256.
pub fn require_expected_algorithm(token: &str) -> Result<(), AuthError> {
    let alg = peek_algorithm(token)?;
    if alg == EXPECTED_ALGORITHM {
        Ok(())
    } else {
        Err(AuthError::UnexpectedAlgorithm(alg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(json: &str) -> String {
        URL_SAFE_NO_PAD.encode(json)
    }

    #[test]
    fn test_reads_alg() {
        let token = format!("{}.e30.sig", segment(r#"{"alg":"HS256","typ":"JWT"}"#));
        assert_eq!(peek_algorithm(&token).unwrap(), "HS256");
        assert!(require_expected_algorithm(&token).is_ok());
    }

    #[test]
    fn test_rejects_none() {
        let token = format!("{}.e30.", segment(r#"{"alg":"none"}"#));
        assert_eq!(
            require_expected_algorithm(&token),
            Err(AuthError::UnexpectedAlgorithm("none".to_string()))
        );
    }

    #[test]
    fn test_rejects_wrong_segment_count() {
        assert!(matches!(
            peek_algorithm("abc.def"),
            Err(AuthError::MalformedToken(_))
        ));
        assert!(matches!(
            peek_algorithm("a.b.c.d"),
            Err(AuthError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_rejects_non_json_header() {
        let token = format!("{}.e30.sig", segment("not json"));
        assert!(matches!(
            peek_algorithm(&token),
            Err(AuthError::MalformedToken(_))
        ));
    }
}
