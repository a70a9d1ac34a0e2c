use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::roles::Role;
use crate::auth::token::{AuthError, TokenIdentity, TokenService};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller context extracted from a validated token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub roles: Vec<String>,
}

impl AuthUser {
    /// Case-sensitive exact match against the closed role set.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }

    pub fn require_any(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.iter().any(|role| self.has_role(*role)) {
            Ok(())
        } else {
            Err(ApiError::forbidden(
                "You do not have the role required for this operation.",
            ))
        }
    }
}

impl From<TokenIdentity> for AuthUser {
    fn from(identity: TokenIdentity) -> Self {
        Self {
            user_id: identity.user_id,
            roles: identity.roles,
        }
    }
}

/// Authorization gate: every authenticated route passes through here before
/// any owner-scoped read or write. Validates the bearer credential and
/// injects the caller's identity into the request.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = identity_from_headers(&headers, &state.tokens)?;

    request.extensions_mut().insert(AuthUser::from(identity));

    Ok(next.run(request).await)
}

/// Extract the bearer credential from the Authorization header and delegate
/// to the token validator.
pub fn identity_from_headers(
    headers: &HeaderMap,
    tokens: &TokenService,
) -> Result<TokenIdentity, AuthError> {
    let token = bearer_token(headers)?;
    tokens.validate(token)
}

/// The credential is the last space-separated segment of the header value
/// (`<scheme> <token>`). A header with no token segment at all is malformed;
/// an empty token segment is left for the validator to reject.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?;

    let value = header
        .to_str()
        .map_err(|_| AuthError::MalformedCredential)?;

    let mut segments = value.split(' ');
    let _scheme = segments.next();

    segments.last().ok_or(AuthError::MalformedCredential)
}
