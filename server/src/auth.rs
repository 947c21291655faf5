//! JWT-decoded caller identity, feeding `tpe_core::actor::Actor`'s
//! role/ownership guards. Minting tokens (login, signup) lives outside this
//! service — this module only verifies.
use crate::state::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tpe_core::actor::{Actor, Role};
use tpe_core::ids::{TeamId, UserId};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClaimsRole {
    Admin,
    Coach,
    Viewer,
}

impl From<ClaimsRole> for Role {
    fn from(value: ClaimsRole) -> Self {
        match value {
            ClaimsRole::Admin => Role::Admin,
            ClaimsRole::Coach => Role::Coach,
            ClaimsRole::Viewer => Role::Viewer,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub role: ClaimsRole,
    pub team_id: Option<i64>,
    pub exp: usize,
}

impl From<Claims> for Actor {
    fn from(claims: Claims) -> Self {
        Actor {
            user_id: UserId::new(claims.sub),
            role: claims.role.into(),
            team_id: claims.team_id.map(TeamId::new),
        }
    }
}

/// Admin-only middleware: requires `Authorization: Bearer <ADMIN_SECRET>`,
/// for the fixture/draw generation endpoints the outer layer restricts to
/// operators.
pub async fn admin_auth_middleware(State(state): State<AppState>, req: Request, next: Next) -> Result<Response, StatusCode> {
    let provided = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match provided {
        Some(token) if token == state.config.admin_secret => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Extracts an [`Actor`] from a `Bearer` JWT, for handlers that need to know
/// who's calling (the coach-ownership guard). Falls back to a Viewer
/// actor with no identity when no token is presented, so read-only routes
/// stay open.
#[derive(Clone, Copy)]
pub struct CallerActor(pub Actor);

impl FromRequestParts<AppState> for CallerActor {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(header::AUTHORIZATION).and_then(|h| h.to_str().ok());
        let Some(token) = header.and_then(|h| h.strip_prefix("Bearer ")) else {
            return Ok(CallerActor(Actor {
                user_id: UserId::new(0),
                role: Role::Viewer,
                team_id: None,
            }));
        };

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            tracing::warn!(error = %e, "jwt validation failed");
            StatusCode::UNAUTHORIZED
        })?;

        Ok(CallerActor(data.claims.into()))
    }
}
