/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskdeck_api::{app::{build_router, AppState}, config::Config};
/// use taskdeck_shared::models::{task::Task, user::User};
/// use taskdeck_shared::store::{CredentialStore, JsonFile, TaskStore};
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let users = CredentialStore::with_cost(
///     Arc::new(JsonFile::<User>::new(config.storage.users_file())),
///     config.auth.hash_cost,
/// );
/// let tasks = TaskStore::new(Arc::new(JsonFile::<Task>::new(config.storage.tasks_file())));
/// let app = build_router(AppState::new(users, tasks, config));
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, routes};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use taskdeck_shared::auth::{jwt, middleware::AuthContext};
use taskdeck_shared::store::{CredentialStore, TaskStore};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. The
/// stores hold `Arc`s internally, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Registered credentials
    pub users: CredentialStore,

    /// Task records
    pub tasks: TaskStore,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(users: CredentialStore, tasks: TaskStore, config: Config) -> Self {
        Self {
            users,
            tasks,
            config: Arc::new(config),
        }
    }

    /// Gets the secret used to sign and verify session tokens
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /health          # Health check (public)
/// ├── POST /register        # Registration (public)
/// ├── POST /login           # Login (public)
/// ├── GET  /tasks           # List visible tasks (token)
/// ├── POST /tasks           # Create task (token)
/// ├── PUT    /tasks/:id     # Partial update (token)
/// └── DELETE /tasks/:id     # Delete (token)
/// ```
///
/// Unknown routes fall through to a JSON 404. The middleware stack is
/// request tracing, permissive CORS (browser clients are served from
/// another origin), and per-route token authentication.
pub fn build_router(state: AppState) -> Router {
    // Public routes, no auth
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Task routes, token required
    let task_routes = Router::new()
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/:id",
            put(routes::tasks::update_task).delete(routes::tasks::delete_task),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            token_auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .merge(task_routes)
        .fallback(unknown_route)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Token authentication middleware layer
///
/// Pulls the token out of the Authorization header (raw or with a
/// `Bearer ` prefix), validates it, and injects the caller's
/// [`AuthContext`] into the request extensions. A missing token is 401;
/// a token that fails validation is 403.
async fn token_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = taskdeck_shared::auth::middleware::bearer_token(req.headers())?;

    let claims = jwt::validate_token(token, state.jwt_secret())?;

    req.extensions_mut().insert(AuthContext::new(claims.sub));

    Ok(next.run(req).await)
}

/// Fallback for unknown routes
async fn unknown_route() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
