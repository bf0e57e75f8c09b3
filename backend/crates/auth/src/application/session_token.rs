//! Session Token Signing
//!
//! The client-held token is `<session_id>.<base64url(HMAC-SHA256)>`.
//! The signature is verified before the session ID ever reaches the
//! database, so forged tokens cost no lookup.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Produce the signed token for a session ID
pub fn sign_session_token(session_id: Uuid, secret: &[u8; 32]) -> String {
    let session_id = session_id.to_string();

    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(signature))
}

/// Verify a token's signature and return the session ID
pub fn verify_session_token(token: &str, secret: &[u8; 32]) -> AuthResult<Uuid> {
    let (session_id_str, signature_b64) = token
        .split_once('.')
        .ok_or(AuthError::SessionInvalid)?;

    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| AuthError::SessionInvalid)?;

    mac.verify_slice(&signature)
        .map_err(|_| AuthError::SessionInvalid)?;

    session_id_str
        .parse()
        .map_err(|_| AuthError::SessionInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_sign_verify_roundtrip() {
        let id = Uuid::new_v4();
        let token = sign_session_token(id, &SECRET);
        assert_eq!(verify_session_token(&token, &SECRET).unwrap(), id);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = sign_session_token(Uuid::new_v4(), &SECRET);

        let mut tampered = token.clone();
        tampered.replace_range(0..1, if token.starts_with('0') { "1" } else { "0" });
        assert!(matches!(
            verify_session_token(&tampered, &SECRET),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign_session_token(Uuid::new_v4(), &SECRET);
        let other = [8u8; 32];
        assert!(verify_session_token(&token, &other).is_err());
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert!(verify_session_token("", &SECRET).is_err());
        assert!(verify_session_token("no-dot-here", &SECRET).is_err());
        assert!(verify_session_token("a.b.c", &SECRET).is_err());
        assert!(verify_session_token("not-a-uuid.!!!", &SECRET).is_err());
    }
}
