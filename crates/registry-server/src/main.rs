mod config;

use std::sync::Arc;

use tracing::{info, warn};

use registry_api::{AppState, AppStateInner, RouterOptions};
use registry_crypto::Cipher;
use registry_db::SubmissionStore;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "registry_server=debug,registry_api=debug,registry_db=info,registry_crypto=info,tower_http=debug"
                    .into()
            }),
        )
        .init();

    // Config; no key, no service
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: {:#}", e);
            std::process::exit(1);
        }
    };

    let cipher = match Cipher::from_passphrase(&config.secret_passphrase) {
        Ok(cipher) => cipher,
        Err(e) => {
            eprintln!("FATAL: {}", e);
            std::process::exit(1);
        }
    };

    if config.admin_token.is_none() {
        warn!("ADMIN_TOKEN is not set; /admin endpoints will reject every request");
    }

    let store = SubmissionStore::open(&config.data_dir)?;
    let existing = store.count()?;
    info!("{} submissions on record", existing);

    let options = RouterOptions {
        secure_headers: config.secure_headers,
        static_dir: config.static_dir.is_dir().then(|| config.static_dir.clone()),
    };
    if options.secure_headers {
        info!("Secure response headers enabled");
    }
    if options.static_dir.is_none() {
        info!("No static directory at {}, /static disabled", config.static_dir.display());
    }

    let state: AppState = Arc::new(AppStateInner {
        store,
        cipher,
        admin_token: config.admin_token.clone(),
    });

    let app = registry_api::router(state, &options);

    let addr = config.listen_addr()?;
    info!("Registry listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    ctrl_c.await.ok();
                    info!("Received Ctrl+C, shutting down...");
                    return;
                }
            };
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
