use crate::config::model::{Config, DEFAULT_ORIGIN};
use crate::modal::OpenPolicy;
use std::env;
use std::time::Duration;
use url::Url;

pub fn load_config() -> Config {
    let origin = load_url_config("CALENDAR_ORIGIN", DEFAULT_ORIGIN);
    let mut config = Config::new(origin);

    if let Ok(data_path) = env::var("CALENDAR_DATA_PATH") {
        config.data_path = data_path;
    }
    if let Some(settle_delay_ms) = load_u64_config("CALENDAR_SETTLE_DELAY_MS") {
        config.settle_delay = Duration::from_millis(settle_delay_ms);
    }
    config.modal_policy = load_policy_config("CALENDAR_MODAL_POLICY", config.modal_policy);

    config
}

fn load_url_config(name: &str, default: &str) -> Url {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or_else(|_| panic!("{} is not a valid URL", name))
}

fn load_u64_config(name: &str) -> Option<u64> {
    match env::var(name) {
        Ok(value) => Some(value.parse().unwrap_or_else(|_| {
            panic!("Invalid config '{}'. Expected a positive integer.", name)
        })),
        Err(_) => None,
    }
}

fn load_policy_config(name: &str, default: OpenPolicy) -> OpenPolicy {
    match env::var(name).as_deref() {
        Err(_) => default,
        Ok("replace") => OpenPolicy::Replace,
        Ok("ignore") => OpenPolicy::IgnoreWhileOpen,
        Ok(_) => panic!(
            "Invalid config '{}'. Expected either 'replace' or 'ignore'",
            name
        ),
    }
}
