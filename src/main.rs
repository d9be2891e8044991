use spring_training_calendar::component::{Attachment, SpringTrainingCalendar};
use spring_training_calendar::config::env_loader::load_config;
use spring_training_calendar::loader::{DependencyLoader, HttpScriptHost};
use spring_training_calendar::logging::{setup_tracing, shutdown_tracing};
use spring_training_calendar::schedule::api::ScheduleAPI;
use spring_training_calendar::view::grid::DayGridMonth;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let loki = setup_tracing().await;
    let config = load_config();

    let data_url = config
        .data_url()
        .unwrap_or_else(|err| panic!("Invalid data path '{}': {}", config.data_path, err));

    let host = Arc::new(HttpScriptHost::new(config.origin.clone()));
    let loader = Arc::new(DependencyLoader::new(host));
    let source = Arc::new(ScheduleAPI::new(data_url));

    let mut calendar = SpringTrainingCalendar::new(config, loader, source, Arc::new(DayGridMonth));

    match calendar.attach().await {
        Attachment::Rendered { events } => info!("Rendered {} events", events),
        other => error!("Calendar stayed empty: {:?}", other),
    }

    println!("{}", calendar.to_html());

    shutdown_tracing(loki).await;
}
