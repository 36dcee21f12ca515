use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use nestling_core::config::{AppConfig, LoadOptions};
use toml::Value;

use super::{CommandResult, EXIT_CONFIG};

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult {
                exit_code: EXIT_CONFIG,
                output: format!("config validation failed: {error}"),
            };
        }
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let entries: [(&str, String, &[&str]); 9] = [
        (
            "server.bind_address",
            config.server.bind_address.clone(),
            &["NESTLING_SERVER_BIND_ADDRESS"],
        ),
        ("server.port", config.server.port.to_string(), &["NESTLING_SERVER_PORT"]),
        (
            "server.graceful_shutdown_secs",
            config.server.graceful_shutdown_secs.to_string(),
            &["NESTLING_SERVER_GRACEFUL_SHUTDOWN_SECS"],
        ),
        (
            "logging.level",
            config.logging.level.clone(),
            &["NESTLING_LOGGING_LEVEL", "NESTLING_LOG_LEVEL"],
        ),
        (
            "logging.format",
            format!("{:?}", config.logging.format),
            &["NESTLING_LOGGING_FORMAT", "NESTLING_LOG_FORMAT"],
        ),
        (
            "recommendations.max_results",
            config.recommendations.max_results.to_string(),
            &["NESTLING_RECOMMENDATIONS_MAX_RESULTS"],
        ),
        ("grouping.k", config.grouping.k.to_string(), &["NESTLING_GROUPING_K"]),
        (
            "grouping.min_group_size",
            config.grouping.min_group_size.to_string(),
            &["NESTLING_GROUPING_MIN_GROUP_SIZE"],
        ),
        (
            "grouping.max_group_size",
            config.grouping.max_group_size.to_string(),
            &["NESTLING_GROUPING_MAX_GROUP_SIZE"],
        ),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for (key, value, env_keys) in &entries {
        let source = field_source(
            key,
            env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(key, value, source));
    }

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("nestling.toml"), PathBuf::from("config/nestling.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
