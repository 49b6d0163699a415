use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::{AppConfig, StoreBackend};
use crate::database::{MemoryStore, PgStore, Store, StoreError};
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;

/// Shared per-request state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Build the full router: public routes, the gated API and global layers.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let gated = Router::new()
        .merge(income_routes())
        .merge(expense_routes())
        .merge(budget_routes())
        .merge(goal_routes())
        .merge(user_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/login", post(public::auth::login_post))
        .route("/register", post(public::auth::register_post))
        // Protected
        .merge(gated)
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(parsed)
}

fn income_routes() -> Router<AppState> {
    use protected::entries::{self, Incomes};

    Router::new()
        .route("/incomes", post(entries::create::<Incomes>))
        .route(
            "/incomes/:id",
            get(entries::list::<Incomes>)
                .put(entries::update::<Incomes>)
                .delete(entries::delete::<Incomes>),
        )
        .route("/incomes/single/:id", get(entries::get::<Incomes>))
        .route("/incomes/total/:id", get(entries::total::<Incomes>))
}

fn expense_routes() -> Router<AppState> {
    use protected::entries::{self, Expenses};

    Router::new()
        .route("/expenses", post(entries::create::<Expenses>))
        .route(
            "/expenses/:id",
            get(entries::list::<Expenses>)
                .put(entries::update::<Expenses>)
                .delete(entries::delete::<Expenses>),
        )
        .route("/expenses/single/:id", get(entries::get::<Expenses>))
        .route("/expenses/total/:id", get(entries::total::<Expenses>))
}

fn budget_routes() -> Router<AppState> {
    use protected::budgets;

    Router::new()
        .route("/budgets", post(budgets::create))
        .route(
            "/budgets/:id",
            get(budgets::list).put(budgets::update).delete(budgets::delete),
        )
        .route("/budgets/single/:id", get(budgets::get))
        .route("/budgets/:id/:month/:year", get(budgets::by_month))
}

fn goal_routes() -> Router<AppState> {
    use protected::goals;

    Router::new()
        .route("/goals", post(goals::create))
        .route(
            "/goals/:id",
            get(goals::list).put(goals::update).delete(goals::delete),
        )
        .route("/goals/single/:id", get(goals::get))
}

fn user_routes() -> Router<AppState> {
    use protected::users;

    Router::new()
        .route("/users", put(users::update))
        .route("/users/:id", get(users::get))
}

async fn root() -> Json<Value> {
    Json(json!({
        "msg": "SUCCESS",
        "data": {
            "name": "Wallet API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "public": "/login, /register, /health",
                "incomes": "/incomes[/:userId | /single/:id | /total/:userId]",
                "expenses": "/expenses[/:userId | /single/:id | /total/:userId]",
                "budgets": "/budgets[/:userId | /single/:id | /:userId/:month/:year]",
                "goals": "/goals[/:userId | /single/:id]",
                "users": "/users[/:id]",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "msg": "OK",
                "data": { "status": "ok", "timestamp": now, "database": "ok" }
            })),
        ),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "msg": "Database unavailable" })),
            )
        }
    }
}

/// Open the configured store backend. Postgres is migrated before use.
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn Store>, StoreError> {
    match config.database.store {
        StoreBackend::Memory => {
            info!("Using in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let store = PgStore::connect(&config.database).await?;
            store.migrate().await?;
            Ok(Arc::new(store))
        }
    }
}
