//! Signed-in user extraction
//!
//! The identity gateway in front of the server authenticates the caller and
//! forwards the user id and role as headers.

use super::error::Problem;
use crate::contract::{CurrentUser, Role};
use axum::extract::FromRequestParts;
use http::request::Parts;
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Extractor for the user asserted by the identity gateway
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id: Uuid = header(parts, USER_ID_HEADER)?
            .parse()
            .map_err(|_| Problem::unauthorized(format!("{USER_ID_HEADER} is not a valid UUID")))?;
        let role: Role = header(parts, USER_ROLE_HEADER)?
            .parse()
            .map_err(|e| Problem::unauthorized(format!("{USER_ROLE_HEADER}: {e}")))?;

        Ok(Self(CurrentUser::new(id, role)))
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, Problem> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| Problem::unauthorized(format!("missing {name} header")))?
        .to_str()
        .map(str::trim)
        .map_err(|_| Problem::unauthorized(format!("{name} header is not valid text")))
}
