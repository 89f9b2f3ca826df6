//! HTTP host for the service: base routes, the middleware stack, RFC 9457
//! problem responses and the listener loop.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use axum::{http::header, middleware::from_fn, response::IntoResponse, routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod config;
pub mod problem;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;
pub use problem::{Problem, ProblemInstance, ProblemResponse};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Owns the ingress configuration and turns module routes into a served router.
pub struct ApiIngress {
    config: ApiIngressConfig,
    request_timeout: Duration,
    openapi: Option<utoipa::openapi::OpenApi>,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self {
            config,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            openapi: None,
        }
    }

    /// Override the per-request timeout; zero keeps the default.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.request_timeout = timeout;
        }
        self
    }

    /// Attach an OpenAPI document, served at `/openapi.json` when docs are enabled.
    pub fn with_openapi(mut self, doc: utoipa::openapi::OpenApi) -> Self {
        self.openapi = Some(doc);
        self
    }

    /// Build the HTTP router: base routes + module routes + middleware.
    pub fn build_router(&self, module_routes: Router) -> Result<Router> {
        tracing::debug!("Building router");
        let mut router = Router::new()
            .route("/", get(web::hello_world))
            .route("/health", get(web::health_check))
            .merge(module_routes);

        if self.config.enable_docs {
            if let Some(doc) = &self.openapi {
                let body = serde_json::to_value(doc)?;
                tracing::info!("Serving OpenAPI document at /openapi.json");
                router = router.route(
                    "/openapi.json",
                    get(move || async move {
                        ([(header::CACHE_CONTROL, "no-store")], axum::Json(body)).into_response()
                    }),
                );
            }
        }

        // Layers are added innermost first; the request passes through them as
        // SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions -> BodyLimit -> CORS -> Timeout
        let x_request_id = request_id::header();

        router = router.layer(TimeoutLayer::new(self.request_timeout));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        // request_id into extensions and into the span opened by the trace layer
        router = router.layer(from_fn(request_id::push_req_id_to_extensions));

        router = router.layer(
            TraceLayer::new_for_http()
                .make_span_with(request_id::make_request_span)
                .on_response(request_id::record_response),
        );

        // Echo x-request-id on the response
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));

        // Generate x-request-id when the client did not send one
        router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        Ok(router)
    }

    /// Bind `addr` and serve `router` until `shutdown` resolves.
    pub async fn serve<F>(&self, router: Router, addr: SocketAddr, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening at http://{}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("HTTP server shutting down gracefully");
}
