use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::config::AUTH_TOKEN_SECRET;
use super::errors::TokenError;
use super::types::Claims;

/// Mint a signed access token for `subject` carrying `role`, valid for
/// `validity_secs` from now.
pub fn mint_token(subject: &str, role: &str, validity_secs: u64) -> Result<String, TokenError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: subject.to_string(),
        role: role.to_string(),
        iat: now,
        exp: now + validity_secs as i64,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&AUTH_TOKEN_SECRET),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify signature and expiry, returning the embedded claims.
///
/// No claim may be trusted before this succeeds. Expiry is checked with zero
/// leeway.
pub fn verify_token(token: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&AUTH_TOKEN_SECRET),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| TokenError::InvalidToken)
}

/// Subject of a verified token
pub fn token_subject(token: &str) -> Result<String, TokenError> {
    verify_token(token).map(|claims| claims.sub)
}

/// Role claim of a verified token
pub fn token_role(token: &str) -> Result<String, TokenError> {
    verify_token(token).map(|claims| claims.role)
}

/// True iff the token parses, the signature holds and it is unexpired
pub fn is_token_valid(token: &str) -> bool {
    verify_token(token).is_ok()
}

/// True iff the validated claims carry the required role
pub fn has_role(claims: &Claims, required: &str) -> bool {
    claims.role == required
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::load_test_env;

    /// Flip one character inside the signature segment of a JWT
    fn tamper_signature(token: &str) -> String {
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3, "A compact JWT has three segments");

        let sig = parts[2].clone();
        let target = sig.chars().next().expect("signature is non-empty");
        let replacement = if target == 'A' { 'B' } else { 'A' };
        parts[2] = format!("{replacement}{}", &sig[1..]);
        parts.join(".")
    }

    /// Token round-trip: claims read back from a freshly minted token
    #[test]
    fn test_mint_and_read_back() {
        load_test_env();

        let token = mint_token("a@b.com", "USER", 3600).expect("Minting should succeed");

        assert_eq!(token_subject(&token).expect("subject should verify"), "a@b.com");
        assert_eq!(token_role(&token).expect("role should verify"), "USER");
        assert!(is_token_valid(&token));

        let claims = verify_token(&token).expect("token should verify");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    /// A token with zero validity fails validation once the issuing second
    /// has passed.
    #[test]
    fn test_zero_validity_token_expires() {
        load_test_env();

        let token = mint_token("a@b.com", "USER", 0).expect("Minting should succeed");

        // Step past the expiry instant
        std::thread::sleep(std::time::Duration::from_secs(2));

        assert!(!is_token_valid(&token));
        assert!(matches!(
            token_subject(&token),
            Err(TokenError::InvalidToken)
        ));
    }

    /// Flipping a bit in the signature segment invalidates the token
    #[test]
    fn test_tampered_signature_rejected() {
        load_test_env();

        let token = mint_token("a@b.com", "ADMIN", 3600).expect("Minting should succeed");
        let tampered = tamper_signature(&token);

        assert!(matches!(
            token_subject(&tampered),
            Err(TokenError::InvalidToken)
        ));
        assert!(!is_token_valid(&tampered));
    }

    /// Altering the payload without re-signing invalidates the token
    #[test]
    fn test_tampered_payload_rejected() {
        load_test_env();

        let token = mint_token("a@b.com", "USER", 3600).expect("Minting should succeed");
        let parts: Vec<&str> = token.split('.').collect();

        // Re-encode a payload claiming ADMIN, keep the original signature
        use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
        let payload = serde_json::json!({
            "sub": "a@b.com",
            "role": "ADMIN",
            "iat": 0,
            "exp": i64::MAX,
        });
        let forged_payload = URL_SAFE_NO_PAD.encode(payload.to_string());
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert!(matches!(verify_token(&forged), Err(TokenError::InvalidToken)));
    }

    /// Structural garbage is InvalidToken, not a panic or a distinct error
    #[test]
    fn test_garbage_tokens_rejected() {
        load_test_env();

        for garbage in ["", "not-a-token", "a.b", "a.b.c.d", "....."] {
            assert!(
                matches!(verify_token(garbage), Err(TokenError::InvalidToken)),
                "Expected InvalidToken for {garbage:?}"
            );
        }
    }

    /// has_role is a pure comparison on the role claim
    #[test]
    fn test_has_role() {
        let claims = Claims {
            sub: "a@b.com".to_string(),
            role: "ADMIN".to_string(),
            iat: 0,
            exp: 0,
        };

        assert!(has_role(&claims, "ADMIN"));
        assert!(!has_role(&claims, "USER"));
    }
}
