use axum_extra::extract::cookie::Key;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use opal::db::NewUser;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &*opal::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel
    );

    let storage = opal::CmsStorage::connect(&cfg.database_url).await?;
    storage.init_schema().await?;

    // First start: seed an admin so the login flow has a principal.
    if storage.list_users().await?.is_empty() {
        let password_hash = opal::password::hash_password(&cfg.admin_password)?;
        let id = storage
            .insert_user(&NewUser {
                username: cfg.admin_username.clone(),
                password_hash,
            })
            .await?;
        info!(id, username = %cfg.admin_username, "seeded initial admin user");
    }

    let key = match cfg.cookie_key.as_deref() {
        Some(secret) if secret.len() >= 32 => Key::derive_from(secret.as_bytes()),
        Some(_) => {
            warn!("cookie_key shorter than 32 bytes; generating a random key instead");
            Key::generate()
        }
        None => {
            warn!("no cookie_key configured; sessions will not survive a restart");
            Key::generate()
        }
    };

    let state = opal::router::OpalState::new(storage, key);
    let app = opal::router::opal_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
