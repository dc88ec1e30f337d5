pub mod auth;
pub mod authorize;

pub use auth::{require_auth, AuthUser};
pub use authorize::enforce_roles;

/// Paths that bypass the gate and the route matrix entirely. Documentation
/// and discovery endpoints plus the token-acquisition route; everything else
/// requires a bearer token.
pub fn is_public_path(path: &str) -> bool {
    path == "/" || path == "/health" || path == "/auth/login" || path == "/docs"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docs_and_login_are_public() {
        assert!(is_public_path("/"));
        assert!(is_public_path("/health"));
        assert!(is_public_path("/auth/login"));
        assert!(is_public_path("/docs"));
    }

    #[test]
    fn api_paths_are_not_public() {
        assert!(!is_public_path("/api/discos"));
        assert!(!is_public_path("/api/artistas/3"));
        assert!(!is_public_path("/docsomething"));
        assert!(!is_public_path("/auth/login/extra"));
    }
}
