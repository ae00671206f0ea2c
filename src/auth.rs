//! JWT-backed user identity.
//!
//! Sign-in happens on the external auth service; this application only
//! verifies the token carried in the identity cookie. Role names in the
//! claims are resolved to permissions against the roles table per request.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{Error, FromRequest, HttpRequest, web};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    /// Subject, the account identifier on the auth service.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub school_id: i32,
    /// Role names as granted on the auth service.
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn from_jwt(token: &str, secret: &str) -> Option<Self> {
        let key = DecodingKey::from_secret(secret.as_bytes());
        decode::<AuthenticatedUser>(token, &key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .ok()
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let key = EncodingKey::from_secret(secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), self, &key)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = Identity::from_request(req, payload).into_inner();
        let config = req.app_data::<web::Data<ServerConfig>>();

        let result = match (identity, config) {
            (Ok(identity), Some(config)) => match identity.id() {
                Ok(token) => AuthenticatedUser::from_jwt(&token, &config.secret)
                    .ok_or_else(|| ErrorUnauthorized("Invalid token")),
                Err(_) => Err(ErrorUnauthorized("Invalid session")),
            },
            _ => Err(ErrorUnauthorized("Unauthorized")),
        };

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@school.test".to_string(),
            name: "Admin".to_string(),
            school_id: 1,
            roles: vec!["administrator".to_string()],
            exp: 10_000_000_000,
        }
    }

    #[test]
    fn jwt_round_trip() {
        let user = sample_user();
        let token = user.to_jwt("secret").unwrap();
        let decoded = AuthenticatedUser::from_jwt(&token, "secret").unwrap();
        assert_eq!(decoded, user);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sample_user().to_jwt("secret").unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, "other").is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut user = sample_user();
        user.exp = 1;
        let token = user.to_jwt("secret").unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, "secret").is_none());
    }
}
