use std::sync::Arc;

use anyhow::Context;

use gatehouse_api::config::{self, ApiConfig};
use gatehouse_auth::InMemoryIdentityStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gatehouse_observability::init();

    let config = ApiConfig::from_env()?;

    let store = Arc::new(InMemoryIdentityStore::new());
    match &config.policy_file {
        Some(path) => {
            let snapshot = config::load_snapshot(path)?;
            snapshot.apply_to(store.as_ref());
            tracing::info!(
                path = %path.display(),
                bindings = snapshot.bindings.len(),
                roles = snapshot.roles.len(),
                "policy snapshot loaded"
            );
        }
        None => tracing::warn!("GATEHOUSE_POLICY_FILE not set; starting with an empty identity store"),
    }

    tracing::warn!(
        header = %config.identity_header,
        "identity header is trusted as-is; an upstream authentication stage must set it"
    );

    let app = gatehouse_api::app::build_app(store, config.identity_header.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}
