//! HaulDesk Server — application entry point.

mod config;

use std::sync::Arc;
use std::time::Duration;

use hauldesk_access::TenantAccessGuard;
use hauldesk_audit::AuditRecorder;
use hauldesk_auth::password;
use hauldesk_auth::provider::{HttpIdentityProvider, IdentityProvider, StaticIdentityProvider};
use hauldesk_auth::service::AuthService;
use hauldesk_auth::store::{TokenLifecycleStore, TokenStore};
use hauldesk_auth::verifier::CredentialVerifier;
use hauldesk_http::{AppState, default_route_table, router};
use hauldesk_store_mem::{
    MemAccountRepository, MemAuditLogRepository, MemBusinessRepository, MemVehicleRepository,
    seed::seed,
};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("hauldesk=info".parse()?),
        )
        .json()
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(bind_addr = %config.bind_addr, "starting HaulDesk server");

    let accounts = MemAccountRepository::new();
    let businesses = MemBusinessRepository::new();
    let vehicles = MemVehicleRepository::new();
    let audit_logs = MemAuditLogRepository::new();
    let tokens: Arc<TokenLifecycleStore> = Arc::new(TokenLifecycleStore::new());

    if config.seed {
        let hash = password::hash_password(&config.seed_password, config.auth.pepper.as_deref())?;
        let data = seed(&accounts, &businesses, &vehicles, hash.clone(), hash).await?;
        tracing::info!(
            business_id = data.business.id,
            admin_email = %data.admin.email,
            "seeded demo data"
        );
    }

    let provider: Arc<dyn IdentityProvider> = match &config.idp_userinfo_url {
        Some(url) => {
            tracing::info!(userinfo_url = %url, "external identity provider enabled");
            Arc::new(HttpIdentityProvider::new(url.clone()))
        }
        // No provider configured: external-identity credentials resolve
        // to nothing and only self-issued tokens authenticate.
        None => Arc::new(StaticIdentityProvider::new()),
    };

    let verifier = Arc::new(CredentialVerifier::new(
        accounts.clone(),
        businesses.clone(),
        provider,
        config.auth.clone(),
    ));
    let auth = Arc::new(AuthService::new(
        accounts.clone(),
        businesses.clone(),
        tokens.clone() as Arc<dyn TokenStore>,
        config.auth.clone(),
    ));
    let guard = Arc::new(TenantAccessGuard::new(businesses.clone()));
    let (recorder, _audit_worker) = AuditRecorder::spawn(audit_logs.clone());

    // Periodic expired-pair sweep; safe alongside ordinary store
    // mutations.
    let sweep_tokens = tokens.clone();
    let sweep_interval = config.sweep_interval_secs;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(sweep_interval));
        loop {
            interval.tick().await;
            let evicted = sweep_tokens.sweep_expired();
            if evicted > 0 {
                tracing::debug!(evicted, "swept expired credential pairs");
            }
        }
    });

    let state = AppState {
        verifier,
        auth,
        tokens,
        guard,
        vehicles,
        audit_logs,
        recorder,
        routes: Arc::new(default_route_table()),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HaulDesk server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot listen for shutdown signal");
    }
}
