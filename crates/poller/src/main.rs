use tokio_util::sync::CancellationToken;

use herald_common::config::AppConfig;
use herald_common::error::ConfigError;
use herald_notifier::TelegramNotifier;
use herald_poller::client::StatusClient;
use herald_poller::poll_loop::PollLoop;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "herald_poller=info,herald_notifier=info,herald_engine=info".into()
            }),
        )
        .json()
        .init();

    tracing::info!("Herald review poller starting...");

    // Load configuration; a missing credential stops us before any request is made
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e @ ConfigError::MissingCredential(_)) => {
            tracing::error!(fatal = true, error = %e, "Credentials unavailable, refusing to start");
            return Err(e.into());
        }
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    tracing::debug!(?config, "Configuration loaded");

    let source = StatusClient::from_config(&config);
    let notifier = TelegramNotifier::new(
        config.telegram_api_url.clone(),
        config.telegram_token.clone(),
        config.http_timeout,
    );
    let mut poller = PollLoop::new(&config, source, notifier);

    // Graceful shutdown on Ctrl+C / SIGTERM
    let cancel = CancellationToken::new();
    tokio::spawn(watch_shutdown(cancel.clone()));

    poller.run(cancel).await?;

    tracing::info!("Herald review poller stopped.");
    Ok(())
}

async fn watch_shutdown(cancel: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cannot listen for SIGTERM, using Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Received shutdown signal, stopping gracefully...");
    cancel.cancel();
}
