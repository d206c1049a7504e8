//! # Taskdeck API Server
//!
//! HTTP server for the Taskdeck task-tracking service: registration,
//! login, and token-gated task CRUD with creator/assignee visibility.
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=$(openssl rand -hex 32) cargo run -p taskdeck-api
//! ```

use std::sync::Arc;

use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::Config;
use taskdeck_shared::models::{task::Task, user::User};
use taskdeck_shared::store::{CredentialStore, JsonFile, TaskStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Taskdeck API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    // The JSON record files live under the data directory; make sure it
    // exists before the first write.
    tokio::fs::create_dir_all(&config.storage.data_dir).await?;

    let users = CredentialStore::with_cost(
        Arc::new(JsonFile::<User>::new(config.storage.users_file())),
        config.auth.hash_cost,
    );
    let tasks = TaskStore::new(Arc::new(JsonFile::<Task>::new(config.storage.tasks_file())));

    let app = build_router(AppState::new(users, tasks, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
