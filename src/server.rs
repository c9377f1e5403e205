use crate::apis::{GeocodingApi, KakaoClient};
use crate::config::Config;
use crate::constants;
use crate::error::GeoError;
use axum::{
    extract::Query,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Extension, Router,
};
use hyper::Server;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Shared handler state. `api` is `None` when the provider credential is
/// absent; every geocode request then fails with the configuration error,
/// matching the upstream contract (500 + descriptive message) without
/// leaking anything about the credential itself.
pub struct AppState {
    api: Option<Arc<dyn GeocodingApi>>,
}

#[derive(Deserialize)]
struct SearchParams {
    query: Option<String>,
}

#[derive(Deserialize)]
struct ReverseParams {
    x: Option<String>,
    y: Option<String>,
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "geo-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Maps a gateway failure onto the wire: validation is the caller's fault,
/// configuration is ours, and upstream failures forward the provider's
/// status when it sent one.
fn error_response(e: GeoError) -> Response {
    match e {
        GeoError::Validation(message) => error_body(StatusCode::BAD_REQUEST, &message),
        GeoError::Config(message) => error_body(StatusCode::INTERNAL_SERVER_ERROR, &message),
        GeoError::Upstream { status, message } => {
            let status = status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            error_body(status, &message)
        }
        GeoError::NotFound(message) => error_body(StatusCode::NOT_FOUND, &message),
        other => {
            error!("Unexpected handler error: {}", other);
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                constants::MSG_PROVIDER_CALL_FAILED,
            )
        }
    }
}

fn require_api(state: &AppState) -> Result<Arc<dyn GeocodingApi>, Response> {
    state.api.clone().ok_or_else(|| {
        error!("{} is not set", constants::KAKAO_API_KEY_ENV);
        error_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            constants::MSG_API_KEY_MISSING,
        )
    })
}

/// GET /geocode/address?query=<text>
async fn search_address(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let Some(query) = params.query.filter(|q| !q.is_empty()) else {
        return error_body(StatusCode::BAD_REQUEST, constants::MSG_QUERY_REQUIRED);
    };
    let api = match require_api(&state) {
        Ok(api) => api,
        Err(response) => return response,
    };
    match api.search_address(&query).await {
        Ok(data) => Json(data).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /geocode/keyword?query=<text>
async fn search_keyword(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let Some(query) = params.query.filter(|q| !q.is_empty()) else {
        return error_body(StatusCode::BAD_REQUEST, constants::MSG_QUERY_REQUIRED);
    };
    let api = match require_api(&state) {
        Ok(api) => api,
        Err(response) => return response,
    };
    match api.search_keyword(&query).await {
        Ok(data) => Json(data).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /geocode/reverse?x=<lon>&y=<lat>
async fn reverse(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<ReverseParams>,
) -> Response {
    let coords = match (params.x, params.y) {
        (Some(x), Some(y)) if !x.is_empty() && !y.is_empty() => (x, y),
        _ => return error_body(StatusCode::BAD_REQUEST, constants::MSG_COORDS_REQUIRED),
    };
    let (Ok(longitude), Ok(latitude)) = (coords.0.parse::<f64>(), coords.1.parse::<f64>()) else {
        return error_body(StatusCode::BAD_REQUEST, constants::MSG_COORDS_REQUIRED);
    };
    let api = match require_api(&state) {
        Ok(api) => api,
        Err(response) => return response,
    };
    match api.coord_to_address(longitude, latitude).await {
        Ok(data) => Json(data).into_response(),
        Err(e) => error_response(e),
    }
}

/// Create the HTTP server with all routes.
pub fn create_server(api: Option<Arc<dyn GeocodingApi>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let state = Arc::new(AppState { api });

    Router::new()
        .route("/health", get(health))
        .route("/geocode/address", get(search_address))
        .route("/geocode/keyword", get(search_keyword))
        .route("/geocode/reverse", get(reverse))
        .layer(Extension(state))
        .layer(ServiceBuilder::new().layer(cors))
}

/// Start the HTTP server on the specified port
pub async fn start_server(config: &Config, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let api: Option<Arc<dyn GeocodingApi>> = match Config::api_key() {
        Ok(key) => Some(Arc::new(KakaoClient::new(&config.kakao, key)?)),
        Err(_) => {
            // Serve anyway; each geocode request reports the missing
            // credential as a 500 the way the widget expects.
            error!("{} is not set; geocode endpoints will return 500", constants::KAKAO_API_KEY_ENV);
            None
        }
    };

    let app = create_server(api);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Geocoding gateway listening on {}", addr);
    println!("🚀 HTTP server running on http://localhost:{port}");
    println!("💚 Health check: http://localhost:{port}/health");
    println!("📍 Address:      http://localhost:{port}/geocode/address?query=...");
    println!("🏢 Keyword:      http://localhost:{port}/geocode/keyword?query=...");
    println!("🧭 Reverse:      http://localhost:{port}/geocode/reverse?x=...&y=...");

    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
