use lazy_static::lazy_static;
use std::{env, io};
use tokio::task::JoinHandle;
use tracing::{info, warn, Level};
use tracing_loki::url::Url;
use tracing_loki::{BackgroundTask, BackgroundTaskController};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, fmt};

const SERVICE_NAME: &str = "spring-training-calendar";
const CRATE_TARGET: &str = "spring_training_calendar";

lazy_static! {
    static ref LOKI_URL: Option<String> = env::var("LOKI_URL").ok();
}

fn build_loki_layer(
    base_url: Url,
) -> Result<(tracing_loki::Layer, BackgroundTaskController, BackgroundTask), tracing_loki::Error> {
    tracing_loki::builder()
        .label("service", SERVICE_NAME)?
        .build_controller_url(base_url)
}

/// Logs to stdout, and also ships to Loki when `LOKI_URL` is set and reachable.
/// The returned controller must be shut down before exiting so buffered logs get sent.
pub async fn setup_tracing() -> Option<(BackgroundTaskController, JoinHandle<()>)> {
    let filter = filter::Targets::new()
        .with_target(CRATE_TARGET, Level::TRACE)
        .with_target("parse_games", Level::TRACE)
        .with_default(Level::WARN);

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stdout));

    let Some(base_url) = LOKI_URL.as_ref() else {
        registry.init();
        warn!("Loki URL not provided. Continuing without it.");
        return None;
    };

    let Ok(base_url) = base_url.parse::<Url>() else {
        registry.init();
        warn!("Loki URL '{}' is invalid. Continuing without it.", base_url);
        return None;
    };

    if reqwest::get(base_url.clone()).await.is_err() {
        registry.init();
        warn!("Couldn't connect to Loki. Continuing without it.");
        return None;
    }

    match build_loki_layer(base_url) {
        Ok((layer, controller, task)) => {
            registry.with(layer).init();
            let handle = tokio::spawn(task);

            info!("Loki initialized");

            Some((controller, handle))
        }
        Err(err) => {
            registry.init();
            warn!("Couldn't build the Loki layer ({}). Continuing without it.", err);
            None
        }
    }
}

pub async fn shutdown_tracing(loki: Option<(BackgroundTaskController, JoinHandle<()>)>) {
    if let Some((controller, handle)) = loki {
        controller.shutdown().await;
        if let Err(err) = handle.await {
            warn!("Loki background task ended abnormally: {}", err);
        }
    }
}
