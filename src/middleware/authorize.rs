//! Role-based route authorization, applied after the gate has attached an
//! `AuthUser`. Denials are 403 and are distinct from the gate's 401: the gate
//! answers "who are you", this layer answers "you may not do this".

use axum::{extract::Request, middleware::Next, response::Response};

use crate::auth::Role;
use crate::error::ApiError;

use super::{is_public_path, AuthUser};

const ALL_ROLES: &[Role] = &[Role::Admin, Role::Boss, Role::User];
const ELEVATED: &[Role] = &[Role::Admin, Role::Boss];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

struct Rule {
    method: &'static str,
    prefix: &'static str,
    roles: &'static [Role],
}

/// One block per catalog resource. Reads and creates are open to every role;
/// updates need ADMIN or BOSS; deletes are ADMIN only. Genres carry no block
/// and fall through to the default any-authenticated rule.
const RULES: &[Rule] = &[
    // ======= ALBUMS =======
    Rule { method: "GET", prefix: "/api/discos", roles: ALL_ROLES },
    Rule { method: "POST", prefix: "/api/discos", roles: ALL_ROLES },
    Rule { method: "PUT", prefix: "/api/discos", roles: ELEVATED },
    Rule { method: "DELETE", prefix: "/api/discos", roles: ADMIN_ONLY },
    // ======= LABELS =======
    Rule { method: "GET", prefix: "/api/discograficas", roles: ALL_ROLES },
    Rule { method: "POST", prefix: "/api/discograficas", roles: ALL_ROLES },
    Rule { method: "PUT", prefix: "/api/discograficas", roles: ELEVATED },
    Rule { method: "DELETE", prefix: "/api/discograficas", roles: ADMIN_ONLY },
    // ======= PRODUCERS =======
    Rule { method: "GET", prefix: "/api/productores", roles: ALL_ROLES },
    Rule { method: "POST", prefix: "/api/productores", roles: ALL_ROLES },
    Rule { method: "PUT", prefix: "/api/productores", roles: ELEVATED },
    Rule { method: "DELETE", prefix: "/api/productores", roles: ADMIN_ONLY },
    // ======= ARTISTS =======
    Rule { method: "GET", prefix: "/api/artistas", roles: ALL_ROLES },
    Rule { method: "POST", prefix: "/api/artistas", roles: ALL_ROLES },
    Rule { method: "PUT", prefix: "/api/artistas", roles: ELEVATED },
    Rule { method: "DELETE", prefix: "/api/artistas", roles: ADMIN_ONLY },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Deny,
}

/// Evaluate the matrix for one request. Rules are checked in declaration
/// order, first match wins; unlisted routes permit any authenticated
/// principal and deny the rest.
pub fn check(method: &str, path: &str, role: Option<Role>) -> Decision {
    if is_public_path(path) {
        return Decision::Permit;
    }

    for rule in RULES {
        if rule.method == method && path.starts_with(rule.prefix) {
            return match role {
                Some(r) if rule.roles.contains(&r) => Decision::Permit,
                _ => Decision::Deny,
            };
        }
    }

    // Default rule: any valid principal
    match role {
        Some(_) => Decision::Permit,
        None => Decision::Deny,
    }
}

/// Middleware wrapper around [`check`]
pub async fn enforce_roles(request: Request, next: Next) -> Result<Response, ApiError> {
    let method = request.method().as_str().to_owned();
    let path = request.uri().path().to_owned();
    let role = request.extensions().get::<AuthUser>().map(|u| u.role);

    match check(&method, &path, role) {
        Decision::Permit => Ok(next.run(request).await),
        Decision::Deny => {
            tracing::debug!("Role {:?} denied for {} {}", role, method, path);
            Err(ApiError::forbidden("Insufficient role for this operation"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_and_creates_open_to_all_roles() {
        for role in [Role::Admin, Role::Boss, Role::User] {
            assert_eq!(check("GET", "/api/discos", Some(role)), Decision::Permit);
            assert_eq!(check("GET", "/api/discos/7", Some(role)), Decision::Permit);
            assert_eq!(check("POST", "/api/artistas", Some(role)), Decision::Permit);
            assert_eq!(check("GET", "/api/artistas/3/discos", Some(role)), Decision::Permit);
        }
    }

    #[test]
    fn updates_require_elevated_role() {
        assert_eq!(check("PUT", "/api/discos", Some(Role::Admin)), Decision::Permit);
        assert_eq!(check("PUT", "/api/discos", Some(Role::Boss)), Decision::Permit);
        assert_eq!(check("PUT", "/api/discos", Some(Role::User)), Decision::Deny);
        assert_eq!(check("PUT", "/api/productores", Some(Role::User)), Decision::Deny);
    }

    #[test]
    fn deletes_are_admin_only() {
        assert_eq!(check("DELETE", "/api/artistas/1", Some(Role::Admin)), Decision::Permit);
        assert_eq!(check("DELETE", "/api/artistas/1", Some(Role::Boss)), Decision::Deny);
        assert_eq!(check("DELETE", "/api/artistas/1", Some(Role::User)), Decision::Deny);
        assert_eq!(check("DELETE", "/api/discograficas/9", Some(Role::User)), Decision::Deny);
    }

    #[test]
    fn docs_permitted_without_principal() {
        assert_eq!(check("GET", "/docs", None), Decision::Permit);
        assert_eq!(check("POST", "/auth/login", None), Decision::Permit);
    }

    #[test]
    fn unlisted_routes_use_default_rule() {
        // Genres have no explicit block: any authenticated principal passes
        assert_eq!(check("DELETE", "/api/generos/2", Some(Role::User)), Decision::Permit);
        assert_eq!(check("GET", "/api/generos", Some(Role::User)), Decision::Permit);
        assert_eq!(check("GET", "/api/generos", None), Decision::Deny);
    }

    #[test]
    fn label_prefix_does_not_shadow_album_prefix() {
        // "/api/discograficas" must not match the "/api/discos" rules
        assert_eq!(check("DELETE", "/api/discograficas/1", Some(Role::Boss)), Decision::Deny);
        assert_eq!(check("PUT", "/api/discograficas", Some(Role::Boss)), Decision::Permit);
    }
}
