use std::env;

use thiserror::Error;

/// Errors raised while assembling the signing key ring
#[derive(Debug, Error)]
pub enum KeyRingError {
    #[error("Missing configuration: set SONIDOX_JWT_KEYS or SONIDOX_JWT_SECRET")]
    ConfigMissing,

    #[error("Malformed key entry (expected id:secret): {0}")]
    MalformedEntry(String),

    #[error("Active key id not present in key set: {0}")]
    UnknownActiveKey(String),
}

/// One HMAC-SHA256 signing secret, identified by a stable key id that is
/// stamped into the `kid` header of every token it signs.
#[derive(Debug, Clone)]
pub struct SigningKey {
    pub id: String,
    pub secret: String,
}

/// Versioned signing keys shared by issuer and verifier.
///
/// The active key signs new tokens; verification accepts any key in the set so
/// the secret can be rotated without invalidating every outstanding token at
/// once. Keys are read-only after process start.
#[derive(Debug, Clone)]
pub struct KeyRing {
    active: usize,
    keys: Vec<SigningKey>,
}

impl KeyRing {
    pub fn new(active_id: &str, keys: Vec<SigningKey>) -> Result<Self, KeyRingError> {
        if keys.is_empty() {
            return Err(KeyRingError::ConfigMissing);
        }
        let active = keys
            .iter()
            .position(|k| k.id == active_id)
            .ok_or_else(|| KeyRingError::UnknownActiveKey(active_id.to_string()))?;
        Ok(Self { active, keys })
    }

    /// Single-key ring, for deployments that have not rotated yet.
    pub fn single(id: &str, secret: &str) -> Self {
        Self {
            active: 0,
            keys: vec![SigningKey { id: id.to_string(), secret: secret.to_string() }],
        }
    }

    /// Build the ring from the environment.
    ///
    /// `SONIDOX_JWT_KEYS` holds `id:secret` pairs separated by commas and
    /// `SONIDOX_JWT_ACTIVE_KEY` names the signing key (defaults to the first
    /// entry). A plain `SONIDOX_JWT_SECRET` is accepted as a one-key ring
    /// under the id `v1`.
    pub fn from_env() -> Result<Self, KeyRingError> {
        if let Ok(raw) = env::var("SONIDOX_JWT_KEYS") {
            let mut keys = Vec::new();
            for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
                let (id, secret) = entry
                    .split_once(':')
                    .ok_or_else(|| KeyRingError::MalformedEntry(entry.to_string()))?;
                if id.is_empty() || secret.is_empty() {
                    return Err(KeyRingError::MalformedEntry(entry.to_string()));
                }
                keys.push(SigningKey { id: id.to_string(), secret: secret.to_string() });
            }
            if keys.is_empty() {
                return Err(KeyRingError::ConfigMissing);
            }
            let active_id = env::var("SONIDOX_JWT_ACTIVE_KEY").unwrap_or_else(|_| keys[0].id.clone());
            return Self::new(&active_id, keys);
        }

        match env::var("SONIDOX_JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => Ok(Self::single("v1", &secret)),
            _ => Err(KeyRingError::ConfigMissing),
        }
    }

    /// Key used to sign newly issued tokens
    pub fn active(&self) -> &SigningKey {
        &self.keys[self.active]
    }

    /// Candidate keys for verifying a token. A `kid` header narrows the set to
    /// that key; tokens without one (pre-rotation issuers) are tried against
    /// every key. Empty secrets never take part in verification.
    pub fn candidates(&self, kid: Option<&str>) -> Vec<&SigningKey> {
        self.keys
            .iter()
            .filter(|k| !k.secret.is_empty())
            .filter(|k| kid.map_or(true, |kid| k.id == kid))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_key_ring_signs_and_verifies_with_same_key() {
        let ring = KeyRing::single("v1", "secret");
        assert_eq!(ring.active().id, "v1");
        assert_eq!(ring.candidates(Some("v1")).len(), 1);
        assert_eq!(ring.candidates(None).len(), 1);
        assert!(ring.candidates(Some("v2")).is_empty());
    }

    #[test]
    fn active_key_selected_by_id() {
        let keys = vec![
            SigningKey { id: "v1".into(), secret: "old".into() },
            SigningKey { id: "v2".into(), secret: "new".into() },
        ];
        let ring = KeyRing::new("v2", keys).unwrap();
        assert_eq!(ring.active().secret, "new");
        // Old key still verifies
        assert_eq!(ring.candidates(Some("v1")).len(), 1);
    }

    #[test]
    fn unknown_active_key_rejected() {
        let keys = vec![SigningKey { id: "v1".into(), secret: "s".into() }];
        assert!(matches!(KeyRing::new("v9", keys), Err(KeyRingError::UnknownActiveKey(_))));
    }
}
