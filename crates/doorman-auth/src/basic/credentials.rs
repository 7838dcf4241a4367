//! Basic auth header parsing.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Credentials carried by a Basic auth header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    /// Email (the part before the first colon).
    pub email: String,
    /// Password (everything after the first colon, colons included).
    pub password: String,
}

/// Parse an `Authorization` header value into Basic credentials.
///
/// The header must carry the `"Basic "` scheme, a base64 payload in the
/// standard alphabet, valid UTF-8 after decoding, and at least one colon.
/// A failure at any stage yields `None` — never a partial pair.
pub fn extract_credentials(header: &str) -> Option<BasicCredentials> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(payload: &str) -> String {
        format!("Basic {}", BASE64.encode(payload))
    }

    #[test]
    fn test_valid_header_decodes() {
        let creds = extract_credentials(&encode("a@b.com:pw")).expect("credentials");
        assert_eq!(creds.email, "a@b.com");
        assert_eq!(creds.password, "pw");
    }

    #[test]
    fn test_password_keeps_later_colons() {
        let creds = extract_credentials(&encode("a@b.com:pw:with:colons")).expect("credentials");
        assert_eq!(creds.email, "a@b.com");
        assert_eq!(creds.password, "pw:with:colons");
    }

    #[test]
    fn test_missing_or_wrong_prefix() {
        assert_eq!(extract_credentials(""), None);
        assert_eq!(extract_credentials(BASE64.encode("a@b.com:pw").as_str()), None);
        assert_eq!(
            extract_credentials(&format!("Bearer {}", BASE64.encode("a@b.com:pw"))),
            None
        );
        // Scheme is case-sensitive, matching the prefix check.
        assert_eq!(
            extract_credentials(&format!("basic {}", BASE64.encode("a@b.com:pw"))),
            None
        );
    }

    #[test]
    fn test_undecodable_payload() {
        assert_eq!(extract_credentials("Basic !!!not-base64!!!"), None);
    }

    #[test]
    fn test_non_utf8_payload() {
        let header = format!("Basic {}", BASE64.encode([0xff, 0xfe, 0x3a, 0x80]));
        assert_eq!(extract_credentials(&header), None);
    }

    #[test]
    fn test_payload_without_colon() {
        assert_eq!(extract_credentials(&encode("no-colon-here")), None);
    }
}
