use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Signs and parses compact claim tokens.
///
/// Tokens are JWTs (`header.payload.signature`, base64url segments) signed
/// with HS256 over `header + "." + payload`. Parsing checks the signature
/// only; time and purpose rules live in [`super::TokenValidator`].
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec with a shared secret.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims into a compact token.
    ///
    /// Identical claims and secret always produce the identical token.
    ///
    /// # Errors
    /// * `SigningFailed` - Claims could not be serialized or signed
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token's signature and expose its claims.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match or algorithm is unexpected
    /// * `MalformedToken` - Token cannot be decoded into claims
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        TokenError::InvalidSignature
                    }
                    _ => TokenError::MalformedToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::token::TokenPurpose;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn access_claims() -> Claims {
        let issued_at = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        Claims::access("user123", "bob@example.com", issued_at, Duration::hours(1))
    }

    #[test]
    fn test_issue_and_parse() {
        let codec = TokenCodec::new(SECRET);
        let claims = access_claims();

        let token = codec.issue(&claims).expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let parsed = codec.parse(&token).expect("Failed to parse token");
        assert_eq!(parsed, claims);
    }

    #[test]
    fn test_issue_is_deterministic() {
        let codec = TokenCodec::new(SECRET);
        let claims = access_claims();

        assert_eq!(codec.issue(&claims).unwrap(), codec.issue(&claims).unwrap());
    }

    #[test]
    fn test_parse_ignores_expiry() {
        let codec = TokenCodec::new(SECRET);
        let issued_at = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
        let claims = Claims::password_reset("bob@example.com", issued_at, Duration::minutes(15));

        let token = codec.issue(&claims).unwrap();
        assert_eq!(codec.parse(&token).unwrap(), claims);
    }

    #[test]
    fn test_parse_with_wrong_secret() {
        let issuer = TokenCodec::new(b"secret1_at_least_32_bytes_long_key!");
        let other = TokenCodec::new(b"secret2_at_least_32_bytes_long_key!");

        let token = issuer.issue(&access_claims()).unwrap();
        assert_eq!(other.parse(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_parse_swapped_payload() {
        let codec = TokenCodec::new(SECRET);
        let original = codec.issue(&access_claims()).unwrap();

        let mut forged_claims = access_claims();
        forged_claims.purpose = TokenPurpose::PasswordReset;
        let forged = codec.issue(&forged_claims).unwrap();

        let original_parts: Vec<&str> = original.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let tampered = format!(
            "{}.{}.{}",
            original_parts[0], forged_parts[1], original_parts[2]
        );

        assert_eq!(codec.parse(&tampered), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_parse_garbage() {
        let codec = TokenCodec::new(SECRET);

        assert!(matches!(
            codec.parse("not-a-token"),
            Err(TokenError::MalformedToken(_))
        ));
        assert!(matches!(
            codec.parse("invalid.token.here"),
            Err(TokenError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_parse_missing_purpose() {
        #[derive(serde::Serialize)]
        struct Bare {
            sub: String,
            exp: i64,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &Bare {
                sub: "user123".to_string(),
                exp: 4_102_444_800,
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let codec = TokenCodec::new(SECRET);
        assert!(matches!(
            codec.parse(&token),
            Err(TokenError::MalformedToken(_))
        ));
    }
}
