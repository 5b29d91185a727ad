//! folio site service
//!
//! Backs the portfolio front end: relays contact form submissions by email
//! and serves the precomputed backdrop scenes.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use folio_notify::{DefaultChain, EnvConfig, EnvReport, Pipeline};
use folio_site::{api, config, state::AppState};
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::Config::from_env()?;

    // Initialize tracing (prefer RUST_LOG, fallback to FOLIO_LOG_LEVEL)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting folio site");
    info!(
        listen_addr = %config.listen_addr,
        environment = %config.environment,
        "Configuration loaded"
    );

    let report = EnvReport::inspect(&EnvConfig);
    if report.has_email_user && report.has_email_pass {
        info!(
            has_fallback_api_key = report.has_fallback_api_key,
            "Mail credentials present"
        );
    } else {
        // Not fatal: the contact endpoint reports it per request.
        warn!(
            has_email_user = report.has_email_user,
            has_email_pass = report.has_email_pass,
            "Mail credentials missing; contact form will fail"
        );
    }

    let backdrop = folio_scene::backdrop();
    info!(
        stars = backdrop.stars.len(),
        constellation = backdrop.constellation.len(),
        particles = backdrop.particles.len(),
        "Backdrop generated"
    );

    let pipeline = Pipeline::new(Arc::new(EnvConfig), Arc::new(DefaultChain::new()?));
    let state = AppState::new(pipeline, config.environment.clone(), backdrop);
    let app = api::create_router(state);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "Listening for connections");

    let mut server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let mut shutdown_rx = shutdown_rx;
                loop {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
                info!("HTTP server shutting down");
            })
            .await
    });

    // Wait for shutdown signal (Ctrl+C)
    let interrupted = tokio::select! {
        _ = tokio::signal::ctrl_c() => true,
        result = &mut server_handle => {
            match result {
                Ok(Ok(())) => info!("Server exited normally"),
                Ok(Err(e)) => error!(error = %e, "Server error"),
                Err(e) => error!(error = %e, "Server task panicked"),
            }
            false
        }
    };

    if interrupted {
        info!("Received shutdown signal");
        let _ = shutdown_tx.send(true);
        if let Err(e) = tokio::time::timeout(SHUTDOWN_TIMEOUT, &mut server_handle).await {
            warn!(error = %e, "HTTP server did not shut down in time");
        }
    }

    info!("folio site shutdown complete");
    Ok(())
}
