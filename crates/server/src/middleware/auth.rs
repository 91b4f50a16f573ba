//! Authentication middleware and extractors.
//!
//! [`CurrentUser`] resolves the caller from the `Authorization: Bearer`
//! header: verify the token, then look the subject up in the credential
//! store. A token that verifies but whose account no longer exists is a
//! 404, not a 401 - a deleted account with an outstanding token is a real
//! race, surfaced honestly.
//!
//! [`authorize`] is the role gate. Handlers compose the two:
//!
//! ```rust,ignore
//! async fn place_order(
//!     CurrentUser(user): CurrentUser,
//!     State(state): State<AppState>,
//! ) -> Result<Json<OrderResponse>> {
//!     authorize(&user, &[Role::Customer])?;
//!     // ...
//! }
//! ```
//!
//! That composition is the only place role policy appears.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use cartify_core::Role;

use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::user::Identity;
use crate::state::AppState;

/// Extractor that requires a valid bearer token and a live account.
pub struct CurrentUser(pub Identity);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let user_id = state.tokens().verify(token)?;

        let user = UserRepository::new(state.pool())
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user".to_owned()))?;

        Ok(Self(user.identity()))
    }
}

/// Extract the bearer token from the `Authorization` header.
///
/// # Errors
///
/// Returns `AppError::Unauthenticated` if the header is missing, carries a
/// different scheme, or has an empty value.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthenticated("missing bearer token".to_owned()))?;

    let value = value
        .to_str()
        .map_err(|_| AppError::Unauthenticated("invalid authorization header".to_owned()))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthenticated("invalid authentication scheme".to_owned()))?;

    if token.is_empty() {
        return Err(AppError::Unauthenticated("missing bearer token".to_owned()));
    }

    Ok(token)
}

/// Pure role-membership check.
///
/// # Errors
///
/// Returns `AppError::Forbidden` if the caller's role is not in `allowed`.
pub fn authorize<'a>(identity: &'a Identity, allowed: &[Role]) -> Result<&'a Identity, AppError> {
    if allowed.contains(&identity.role) {
        Ok(identity)
    } else {
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;
    use cartify_core::UserId;

    use super::*;

    fn headers_with_authorization(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn identity(role: Role) -> Identity {
        Identity {
            id: UserId::new(1),
            role,
        }
    }

    #[test]
    fn test_bearer_token_extracts_value() {
        let headers = headers_with_authorization("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(AppError::Unauthenticated(_))
        ));
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let headers = headers_with_authorization("Basic dXNlcjpwYXNz");
        assert!(matches!(
            bearer_token(&headers),
            Err(AppError::Unauthenticated(_))
        ));
    }

    #[test]
    fn test_bearer_token_no_scheme() {
        let headers = headers_with_authorization("abc.def.ghi");
        assert!(matches!(
            bearer_token(&headers),
            Err(AppError::Unauthenticated(_))
        ));
    }

    #[test]
    fn test_bearer_token_empty_value() {
        let headers = headers_with_authorization("Bearer ");
        assert!(matches!(
            bearer_token(&headers),
            Err(AppError::Unauthenticated(_))
        ));
    }

    #[test]
    fn test_authorize_allows_member_role() {
        let user = identity(Role::Customer);
        assert!(authorize(&user, &[Role::Customer]).is_ok());
        assert!(authorize(&user, &[Role::Customer, Role::Admin]).is_ok());
    }

    #[test]
    fn test_authorize_forbids_every_non_admin_role() {
        for role in [Role::Customer, Role::Seller, Role::Delivery] {
            let user = identity(role);
            assert!(matches!(
                authorize(&user, &[Role::Admin]),
                Err(AppError::Forbidden)
            ));
        }
        assert!(authorize(&identity(Role::Admin), &[Role::Admin]).is_ok());
    }

    #[test]
    fn test_authorize_with_empty_set_forbids_everyone() {
        for role in Role::ALL {
            assert!(matches!(
                authorize(&identity(role), &[]),
                Err(AppError::Forbidden)
            ));
        }
    }
}
