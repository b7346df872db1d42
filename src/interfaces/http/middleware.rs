//! Authentication and authorization middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, Request},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};

use crate::domain::{authorize, AuthErrorCode, Caller, CommonErrorCode, DomainError, Policy};
use crate::infrastructure::crypto::jwt::{TokenClaims, TokenError, TokenIssuer};
use crate::interfaces::http::common::ApiError;

/// Authentication state containing the token issuer
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenIssuer>,
}

/// Identity established by a valid bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub caller: Caller,
    /// Token id (`jti`)
    pub token_id: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            caller: Caller {
                user_id: claims.user_id(),
                email: Some(claims.email.clone()).filter(|e| !e.is_empty()),
                role: claims.role.parse().ok(),
            },
            token_id: claims.jti,
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError(AuthErrorCode::TokenMissing.into()))
    }
}

/// `{id}` path segment of an employee route
#[derive(Debug, Clone, Copy)]
pub struct EmployeeId(pub i32);

impl<S: Send + Sync> FromRequestParts<S> for EmployeeId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i32>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| EmployeeId(id))
            .map_err(|e| {
                ApiError(DomainError::with_details(
                    CommonErrorCode::BadRequest,
                    e.body_text(),
                ))
            })
    }
}

/// Accepts `Bearer <token>` with any casing of the scheme.
fn extract_token(auth_header: &str) -> Option<&str> {
    let (scheme, token) = auth_header.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("Bearer")
        .then(|| token.trim())
}

fn token_error(err: TokenError) -> DomainError {
    match err {
        TokenError::Expired => AuthErrorCode::TokenExpired.into(),
        _ => AuthErrorCode::TokenInvalid.into(),
    }
}

/// Bearer token authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_token)
        .map(String::from);
    let Some(token) = token else {
        return ApiError(AuthErrorCode::TokenMissing.into()).into_response();
    };

    match auth_state.tokens.validate(&token) {
        Ok(claims) => {
            request
                .extensions_mut()
                .insert(AuthenticatedUser::from_claims(claims));
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Bearer token rejected");
            ApiError(token_error(e)).into_response()
        }
    }
}

/// Enforces a named policy on an authenticated route.
///
/// For `SameUserOrHr` the owner is the `{id}` path segment; a missing or
/// non-numeric segment leaves the owner unresolved.
pub async fn require_policy(
    State(policy): State<Policy>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let user = match AuthenticatedUser::from_request_parts(&mut parts, &()).await {
        Ok(user) => user,
        Err(rejection) => return rejection.into_response(),
    };

    let owner = match policy {
        Policy::SameUserOrHr => EmployeeId::from_request_parts(&mut parts, &())
            .await
            .ok()
            .map(|EmployeeId(id)| id),
        Policy::HrOnly => None,
    };

    if let Err(denied) = authorize(policy, &user.caller, owner) {
        return ApiError(denied).into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}

/// Wraps the handlers already on `route` with a policy check.
pub fn guarded<S>(route: MethodRouter<S>, policy: Policy) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(middleware::from_fn_with_state(policy, require_policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        assert_eq!(extract_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_token("bearer abc"), Some("abc"));
        assert_eq!(extract_token("Basic abc"), None);
        assert_eq!(extract_token("abc"), None);
    }

    #[test]
    fn claims_map_to_caller() {
        let user = AuthenticatedUser::from_claims(TokenClaims {
            sub: "7".to_string(),
            email: "a@b.co".to_string(),
            role: "HR".to_string(),
            jti: "j".to_string(),
            iat: 0,
            exp: 0,
            iss: String::new(),
            aud: String::new(),
        });
        assert_eq!(user.caller.user_id, Some(7));
        assert!(user.caller.is_hr());

        let user = AuthenticatedUser::from_claims(TokenClaims {
            sub: "abc".to_string(),
            role: "Manager".to_string(),
            ..user_claims()
        });
        assert_eq!(user.caller.user_id, None);
        assert_eq!(user.caller.role, None);
    }

    fn user_claims() -> TokenClaims {
        TokenClaims {
            sub: "1".to_string(),
            email: "x@y.z".to_string(),
            role: "Employee".to_string(),
            jti: "j".to_string(),
            iat: 0,
            exp: 0,
            iss: String::new(),
            aud: String::new(),
        }
    }

    #[test]
    fn expired_tokens_keep_their_own_code() {
        assert!(token_error(TokenError::Expired).is(AuthErrorCode::TokenExpired));
        assert!(token_error(TokenError::Invalid("sig".into())).is(AuthErrorCode::TokenInvalid));
    }
}
