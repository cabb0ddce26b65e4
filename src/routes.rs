use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(deal_routes())
        .merge(dashboard_routes())
        .merge(note_routes())
        .merge(stage_routes())
        .merge(people_routes())
        // Only matched routes are gated; unknown paths still 404
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware));

    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected
        .merge(api);

    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security));
    }

    router.with_state(state)
}

fn deal_routes() -> Router<AppState> {
    use protected::deals;

    Router::new()
        .route("/api/deals/by-sales-rep/:sales_rep", get(deals::by_sales_rep))
        .route("/api/deals/:sales_rep/stage/:permit_stage", get(deals::by_stage))
        .route("/api/deal/:deal_id", get(deals::detail))
}

fn dashboard_routes() -> Router<AppState> {
    use protected::{deals, people};

    Router::new()
        .route("/api/dashboard/by-email/:email", get(people::dashboard_by_email))
        .route("/api/dashboard/:sales_rep", get(deals::dashboard))
        .route("/api/me/dashboard", get(people::my_dashboard))
}

fn note_routes() -> Router<AppState> {
    use protected::notes;

    Router::new()
        .route("/api/notes", get(notes::list))
        .route("/api/notes/:note_id", get(notes::get))
}

fn stage_routes() -> Router<AppState> {
    use protected::stages;

    Router::new()
        .route("/api/stages/:sales_rep", get(stages::distinct))
        .route("/api/stages/:sales_rep/deals", get(stages::per_deal))
}

fn people_routes() -> Router<AppState> {
    use protected::people;

    Router::new()
        .route("/api/owners/by-email/:email", get(people::owner_by_email))
        .route("/api/contacts/verify/:email", get(people::verify_contact))
        .route("/api/pm/:email/sales-reps", get(people::pm_sales_reps))
        .route("/api/gm/:email/dashboard", get(people::gm_dashboard))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
