use chrono::{Duration, Utc};
use jsonwebtoken::{decode, decode_header, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config;

pub mod keys;
pub mod password;

pub use keys::{KeyRing, KeyRingError, SigningKey};

/// Fixed role set carried in the `rol` claim and checked by the route matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Boss,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Boss => "BOSS",
            Role::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "BOSS" => Ok(Role::Boss),
            "USER" => Ok(Role::User),
            _ => Err(()),
        }
    }
}

/// Token payload: subject, role claim, issue and expiry instants (unix secs)
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub rol: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(username: &str, role: Role) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        Self {
            sub: username.to_string(),
            rol: role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidSecret,
}

impl fmt::Display for JwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

/// Sign a fresh token for {username, role} with the ring's active key. The
/// key id travels in the token header so the verifier can pick the right
/// secret after a rotation.
pub fn issue_token(keys: &KeyRing, username: &str, role: Role) -> Result<String, JwtError> {
    sign(keys, &Claims::new(username, role))
}

fn sign(keys: &KeyRing, claims: &Claims) -> Result<String, JwtError> {
    let key = keys.active();
    if key.secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let mut header = Header::default();
    header.kid = Some(key.id.clone());

    encode(&header, claims, &EncodingKey::from_secret(key.secret.as_bytes()))
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Decide whether a token is currently valid and recover its claims.
///
/// Valid means: the signature verifies under one of the ring's secrets AND the
/// current instant is strictly before `exp`. No leeway is applied; any parse
/// failure, signature mismatch or malformed structure collapses to `None`.
pub fn verify_token(keys: &KeyRing, token: &str) -> Option<Claims> {
    let kid = decode_header(token).ok().and_then(|h| h.kid);

    let mut validation = Validation::default();
    validation.leeway = 0;

    for key in keys.candidates(kid.as_deref()) {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(key.secret.as_bytes()),
            &validation,
        );
        if let Ok(data) = decoded {
            // jsonwebtoken accepts exp == now; the contract here is strict
            if data.claims.exp <= Utc::now().timestamp() {
                return None;
            }
            return Some(data.claims);
        }
    }
    None
}
