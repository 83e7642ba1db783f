//! Taskfolio server binary.
//!
//! Loads configuration, connects storage, wires adapters into the routers,
//! and serves the API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use taskfolio::adapters::apple::HttpReceiptGateway;
use taskfolio::adapters::google::UnimplementedPurchaseGateway;
use taskfolio::adapters::http::middleware::{auth_middleware, AuthState};
use taskfolio::adapters::http::{
    billing_router, labels_router, projects_router, tasks_router, users_router, BillingAppState,
    ProjectsAppState, TasksAppState, UsersAppState,
};
use taskfolio::adapters::postgres::{
    PostgresLabelRepository, PostgresProjectRepository, PostgresTaskRepository, PostgresUserStore,
};
use taskfolio::adapters::stripe::{StripeCheckoutConfig, StripeCheckoutGateway};
use taskfolio::application::handlers::billing::{
    CreateCheckoutHandler, HandleStripeWebhookHandler, VerifyAppleReceiptHandler,
    VerifyGooglePurchaseHandler,
};
use taskfolio::config::AppConfig;
use taskfolio::domain::auth::{ManagedIssuer, TokenVerifier};
use taskfolio::domain::billing::{AppleReceiptVerifier, GooglePurchaseVerifier};
use taskfolio::ports::{CheckoutGateway, UserStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    tracing::info!(environment = ?config.server.environment, "starting taskfolio");

    // Storage
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let users: Arc<dyn UserStore> = Arc::new(PostgresUserStore::new(pool.clone()));

    // Token verification
    let managed_issuer = if config.auth.managed_issuer_enabled() {
        config
            .auth
            .managed_issuer_secret
            .clone()
            .map(|secret| ManagedIssuer::new(config.auth.managed_issuer_url.clone(), secret))
    } else {
        None
    };
    let verifier: AuthState = Arc::new(TokenVerifier::new(
        managed_issuer,
        config.auth.jwt_secret.clone(),
    ));

    // Entitlement reconciliation
    let checkout_gateway: Option<Arc<dyn CheckoutGateway>> = match (
        config.billing.checkout_enabled(),
        config.billing.stripe_secret_key.clone(),
        config.billing.stripe_price_id.clone(),
    ) {
        (true, Some(api_key), Some(price_id)) => Some(Arc::new(StripeCheckoutGateway::new(
            StripeCheckoutConfig::new(api_key, price_id),
        ))),
        _ => None,
    };

    let apple_verifier = AppleReceiptVerifier::new(
        config.billing.apple_shared_secret().cloned(),
        Arc::new(HttpReceiptGateway::new()),
    );
    let google_verifier = GooglePurchaseVerifier::new(
        config.billing.google_package_name.clone(),
        config.billing.google_service_account_json.clone(),
        Arc::new(UnimplementedPurchaseGateway::new()),
    );

    let billing_state = BillingAppState {
        webhook: Arc::new(HandleStripeWebhookHandler::new(
            config.billing.webhook_secret().cloned(),
            users.clone(),
        )),
        apple: Arc::new(VerifyAppleReceiptHandler::new(
            Arc::new(apple_verifier),
            users.clone(),
        )),
        google: Arc::new(VerifyGooglePurchaseHandler::new(
            Arc::new(google_verifier),
            users.clone(),
        )),
        checkout: Arc::new(CreateCheckoutHandler::new(checkout_gateway)),
    };

    let tasks_state = TasksAppState {
        tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
    };
    let projects_state = ProjectsAppState {
        projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
        labels: Arc::new(PostgresLabelRepository::new(pool)),
    };

    // CORS: explicit origin list when configured, permissive otherwise.
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    let cors = if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = Router::new()
        .nest("/api", billing_router())
        .with_state(billing_state)
        .merge(
            Router::new()
                .nest("/api/tasks", tasks_router())
                .with_state(tasks_state),
        )
        .merge(
            Router::new()
                .nest("/api/projects", projects_router())
                .nest("/api/labels", labels_router())
                .with_state(projects_state),
        )
        .merge(
            Router::new()
                .nest("/api", users_router())
                .with_state(UsersAppState {
                    users: users.clone(),
                }),
        )
        .route("/health", get(health))
        .layer(axum::middleware::from_fn_with_state(
            verifier,
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> &'static str {
    "ok"
}
