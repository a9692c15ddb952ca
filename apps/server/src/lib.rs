//! User directory server library
//!
//! This module exposes the server components so the binary and the
//! integration tests build the same application.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use std::any::Any;

use axum::{http::HeaderValue, response::IntoResponse, response::Response, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use config::{LogFormat, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use state::AppState;

/// Creates the application router with all routes and middleware configured.
pub fn create_app(state: AppState) -> Router {
    api::create_router()
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Builds the CORS layer from configuration.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if !config.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);
    if origins.is_empty() {
        layer.allow_origin(cors::Any)
    } else {
        layer.allow_origin(origins)
    }
}

/// Maps a handler panic to the generic 500 response.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    ServerError::Internal(detail).into_response()
}

/// Initializes tracing from the configured level and format.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "userdir_server={level},user_store={level},tower_http=debug",
            level = config.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}
