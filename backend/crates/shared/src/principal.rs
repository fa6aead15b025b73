//! Authenticated Principal
//!
//! [`CurrentUser`] is inserted into request extensions by the auth
//! middleware (session or bearer) and extracted by handlers that need to
//! know who is calling. Both domain crates consume it, so it lives in the
//! shared kernel.

use crate::id::UserId;

/// The authenticated user for the current request
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: UserId,
}

impl CurrentUser {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = crate::error::app_error::AppError;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or_else(|| {
                crate::error::app_error::AppError::unauthorized("Authentication required")
            })
    }
}

#[cfg(feature = "axum")]
impl<S> axum::extract::OptionalFromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<CurrentUser>().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_holds_id() {
        let user_id = UserId::new();
        let principal = CurrentUser::new(user_id);
        assert_eq!(principal.user_id, user_id);
    }
}
