//! HTTP API for the weather service
//!
//! Public routes: signup, signin, weather lookup, health. Protected routes
//! (bearer session token): the saved-city history. Swagger UI and the
//! OpenAPI document are served alongside the API.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use skycast_weather::WeatherClient;

/// Application state shared across handlers
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub weather: WeatherClient,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Skycast API",
        version = "0.1.0",
        description = "Weather lookup service with per-user saved-city history",
        contact(
            name = "Skycast Team",
            email = "team@skycast.dev"
        )
    ),
    modifiers(&SecurityAddon),
    paths(
        handlers::signup,
        handlers::signin,
        handlers::get_history,
        handlers::add_city,
        handlers::remove_city,
        handlers::get_weather,
        handlers::health_check,
    ),
    components(
        schemas(
            models::SignupRequest,
            models::SigninRequest,
            models::SigninResponse,
            models::HistoryRequest,
            models::WeatherResponse,
            models::MessageResponse,
            models::ErrorResponse,
            models::HealthResponse,
        )
    ),
    tags(
        (name = "auth", description = "Signup and signin endpoints"),
        (name = "history", description = "Saved-city history endpoints"),
        (name = "weather", description = "Weather lookup endpoints"),
        (name = "system", description = "System health endpoints")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// API server configuration
pub struct ApiServerConfig {
    /// Address to bind the API server
    pub bind_addr: SocketAddr,
    /// Enable CORS (for development)
    pub enable_cors: bool,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".parse().unwrap(),
            enable_cors: true,
        }
    }
}

/// API Server
pub struct ApiServer {
    config: ApiServerConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(
        config: ApiServerConfig,
        db: DatabaseConnection,
        jwt_secret: String,
        weather: WeatherClient,
    ) -> Self {
        let state = Arc::new(AppState {
            db,
            jwt_secret,
            weather,
        });

        Self { config, state }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let api_doc = ApiDoc::openapi();

        // JWT state for the authentication middleware; same secret as the
        // signin issuance path.
        let jwt_state = Arc::new(middleware::JwtState::new(
            self.state.jwt_secret.as_bytes(),
        ));

        // PUBLIC routes (no authentication required)
        let public_router = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/signup", post(handlers::signup))
            .route("/signin", post(handlers::signin))
            .route("/weather/{city}", get(handlers::get_weather))
            .with_state(self.state.clone());

        // PROTECTED routes (require a bearer session token)
        let protected_router = Router::new()
            .route(
                "/history",
                get(handlers::get_history)
                    .post(handlers::add_city)
                    .delete(handlers::remove_city),
            )
            .with_state(self.state.clone())
            .layer(axum_middleware::from_fn_with_state(
                jwt_state.clone(),
                middleware::require_auth,
            ));

        let api_router = public_router.merge(protected_router);

        let router = Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", api_doc))
            .merge(api_router);

        let mut router = router.layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            // Token auth only, no cookies, so a permissive policy is fine
            let cors = CorsLayer::new()
                .allow_methods(Any)
                .allow_headers(Any)
                .allow_origin(Any);
            router = router.layer(cors);
        }

        router
    }

    /// Start the API server
    pub async fn start(self) -> Result<(), anyhow::Error> {
        let router = self.build_router();

        info!("Starting API server on {}", self.config.bind_addr);
        info!(
            "OpenAPI spec: http://{}/api/openapi.json",
            self.config.bind_addr
        );
        info!("Swagger UI: http://{}/swagger-ui", self.config.bind_addr);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        axum::serve(listener, router)
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

        Ok(())
    }
}
