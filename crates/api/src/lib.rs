//! SmtpMailer API Server Library

pub mod config;
pub mod error;
mod routes;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use mailer::Mailer;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<Mailer>,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SmtpMailer - Email Service API",
        description = "API RESTful stateless para envío de correos electrónicos a través de un relay SMTP configurado"
    ),
    paths(
        routes::health::health_check,
        routes::otp::send_otp,
        routes::otp::send_otp_legacy,
        routes::waitlist::send_confirmation,
    ),
    components(schemas(
        smtpmailer_core::OtpEmailRequest,
        smtpmailer_core::LegacyOtpRequest,
        smtpmailer_core::WaitlistEmailRequest,
        smtpmailer_core::OtpEmailResponse,
        smtpmailer_core::LegacyOtpResponse,
        smtpmailer_core::WaitlistEmailResponse,
        smtpmailer_core::MessageType,
        routes::health::HealthResponse,
    )),
    tags(
        (name = "email", description = "Envío de códigos OTP de verificación"),
        (name = "waitlist", description = "Confirmación de registro en lista de espera"),
        (name = "health", description = "Estado del servicio")
    )
)]
struct ApiDoc;

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello World" }))
}

/// Create the application router
pub fn create_router(state: AppState, cors_origin: &str) -> Router {
    let cors = if cors_origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        match cors_origin.parse::<axum::http::HeaderValue>() {
            Ok(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(e) => {
                // Startup configuration error, nothing sensible to serve
                panic!("Invalid CORS origin configuration: {}", e);
            }
        }
    };

    Router::new()
        .route("/", get(root))
        .merge(routes::health::routes())
        .merge(routes::otp::routes())
        .merge(routes::waitlist::routes())
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let remote_addr = request
                        .extensions()
                        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
                        .map(|ci| ci.0.to_string())
                        .unwrap_or_else(|| "unknown".into());

                    let user_agent = request
                        .headers()
                        .get(axum::http::header::USER_AGENT)
                        .and_then(|h| h.to_str().ok())
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                        remote_addr = %remote_addr,
                        user_agent = %user_agent,
                    )
                })
                .on_request(|_request: &axum::http::Request<_>, _span: &tracing::Span| {
                    tracing::info!("started processing request");
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::info!(
                            latency_ms = %latency.as_millis(),
                            status = %response.status(),
                            "finished processing request"
                        );
                    },
                ),
        )
        .with_state(state)
}

/// Run the API server
///
/// This function starts the HTTP server and blocks until it exits.
pub async fn run_api(state: AppState, config: &config::Config) -> Result<(), std::io::Error> {
    let app = create_router(state, &config.cors_allowed_origin);
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
}
