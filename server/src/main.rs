//! HTTP entry point for the tournament progression engine.
//!
//! Wires `tpe_db`'s storage/orchestration layer and `tpe_core`'s pure
//! domain logic to an `axum` router. Request routing, body validation and
//! CORS live here; everything else is delegated to `tpe_core`/`tpe_db`.
mod auth;
mod config;
mod err;
mod handlers;
mod state;

use crate::auth::admin_auth_middleware;
use crate::config::Config;
use crate::state::AppState;
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tpe_db::events::EventBus;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive("tpe_server=info".parse().unwrap()))
        .init();

    let config = Config::from_env();
    let pool = tpe_db::pool::create_pool().await.expect("failed to connect to database");
    let events = EventBus::new();

    let state = AppState {
        pool,
        events,
        config: Arc::new(config.clone()),
    };

    let cors = if config.cors_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(tower_http::cors::Any)
    };

    let admin_routes = Router::new()
        .route(
            "/competitions/:id/generate-fixtures",
            post(handlers::fixtures::generate_round_robin),
        )
        .route(
            "/competitions/:id/generate-county-fixtures",
            post(handlers::fixtures::generate_round_robin),
        )
        .route(
            "/competitions/:id/generate-regional-groups",
            post(handlers::fixtures::generate_group_draw),
        )
        .route("/competitions/:id/generate-groups", post(handlers::fixtures::generate_group_draw))
        .route("/competitions/:id/generate-knockout", post(handlers::fixtures::generate_cl_bracket))
        .route("/competitions/:id/generate-cup-draw", post(handlers::fixtures::generate_cup_draw))
        .route("/competitions/:id/advance-knockout", post(handlers::qualification::advance_cl_knockout))
        .route("/competitions/:id/bracket", delete(handlers::fixtures::reset_bracket))
        .route("/seasons/:id/qualify-for-cl", post(handlers::qualification::qualify_for_champions_league))
        .route("/seasons/:id/qualify-for-regional", post(handlers::qualification::qualify_for_regional))
        .route("/regions", post(handlers::entities::create_region))
        .route("/counties", post(handlers::entities::create_county))
        .route("/seasons", post(handlers::entities::create_season))
        .route("/teams", post(handlers::entities::create_team))
        .route("/teams/:id/status", post(handlers::entities::set_team_status))
        .route("/teams/:id", delete(handlers::entities::delete_team))
        .route("/competitions", post(handlers::entities::create_competition))
        .route("/competitions/:id/teams", post(handlers::entities::add_teams))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware));

    let public_routes = Router::new()
        .route("/regions", get(handlers::entities::list_regions))
        .route("/regions/:id", get(handlers::entities::get_region))
        .route("/counties", get(handlers::entities::list_counties))
        .route("/regions/:id/counties", get(handlers::entities::list_counties_by_region))
        .route("/seasons", get(handlers::entities::list_seasons))
        .route("/seasons/active", get(handlers::entities::active_season))
        .route("/teams/:id", get(handlers::entities::get_team))
        .route("/counties/:id/teams", get(handlers::entities::list_teams_by_county))
        .route("/competitions/:id", get(handlers::entities::get_competition))
        .route("/competitions", get(handlers::entities::list_competitions))
        .route("/competitions/:id/teams", get(handlers::entities::list_competition_teams))
        .route("/competitions/:id/bracket", get(handlers::fixtures::get_bracket))
        .route("/competitions/:id/status", get(handlers::qualification::get_competition_status))
        .route("/competitions/:id/top-teams", get(handlers::qualification::get_top_teams))
        .route("/matches", get(handlers::matches::list_matches))
        .route("/matches/:id", get(handlers::matches::get_match))
        .route("/matches/:id/submit-result", post(handlers::matches::submit_result))
        .route("/matches/:id/confirm-result", post(handlers::matches::confirm_result))
        .route("/standings", get(handlers::standings::get_standings))
        .route("/events/stream", get(handlers::events::stream));

    let app = Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await.expect("failed to bind");
    tracing::info!(addr = %config.bind_addr, "tournament progression engine listening");
    axum::serve(listener, app).await.expect("server error");
}
