use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Token generation failed: {0}")]
    GenerationFailed(jsonwebtoken::errors::Error),
    #[error("Token verification failed: {0}")]
    VerificationFailed(jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id
    pub sub: i32,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
}

impl JwtManager {
    pub fn new(secret: &str, expiration_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            expiration_hours,
        }
    }

    /// Génère un access token avec la durée configurée
    pub fn generate_access_token(&self, user_id: i32) -> Result<String, JwtError> {
        self.generate_token(user_id, self.expiration_hours)
    }

    pub fn expiration_hours(&self) -> i64 {
        self.expiration_hours
    }

    pub fn generate_token(&self, user_id: i32, expires_in_hours: i64) -> Result<String, JwtError> {
        let now = Utc::now();
        let exp = (now + Duration::hours(expires_in_hours)).timestamp();

        let claims = Claims {
            sub: user_id,
            exp,
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(JwtError::GenerationFailed)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(JwtError::VerificationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::{JwtError, JwtManager};

    fn make_jwt_manager() -> JwtManager {
        JwtManager::new("my_secret_key_for_tests", 1)
    }

    #[test]
    fn generated_token_verifies_back_to_the_user() {
        let jwt = make_jwt_manager();
        let token = jwt.generate_access_token(42).expect("Token generation failed");

        let claims = jwt.verify_token(&token).expect("Token verification failed");

        assert_eq!(claims.sub, 42);
        assert!(claims.exp > claims.iat, "Expiry should be after issued time");
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = JwtManager::new("other_secret", 1)
            .generate_access_token(1)
            .unwrap();

        let result = make_jwt_manager().verify_token(&token);

        assert!(matches!(result, Err(JwtError::VerificationFailed(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = make_jwt_manager();
        let token = jwt.generate_token(1, -2).unwrap();

        assert!(jwt.verify_token(&token).is_err());
    }

    #[test]
    fn verify_token_fails_with_invalid_input() {
        let result = make_jwt_manager().verify_token("invalid.token.here");

        assert!(matches!(result.unwrap_err(), JwtError::VerificationFailed(_)));
    }
}
