mod health;
mod home;
mod players;
mod registrations;
mod test_utility;
mod tournaments;

use axum::Router;

use crate::state::AppState;

/// Build the complete application router.
///
/// Structure:
/// - `GET /` and `GET /api` — discovery links
/// - `GET /health` — health check with database connectivity
/// - `/api/players`, `/api/tournaments`, `/api/registrations` — resources
/// - `/api/testutility` — reset and status helpers (development only)
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(home::router())
        .merge(health::router())
        .nest("/api/players", players::router())
        .nest(
            "/api/tournaments",
            tournaments::router().merge(registrations::tournament_router()),
        )
        .nest("/api/registrations", registrations::router())
        .nest("/api/testutility", test_utility::router())
}
