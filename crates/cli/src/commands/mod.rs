pub mod config;
pub mod demand;
pub mod doctor;
pub mod purchase;
pub mod recommend;

use nestling_core::jitter::{JitterSource, SeededJitter, ThreadJitter};
use serde::Serialize;
use serde_json::Value;

pub const EXIT_INVALID_INPUT: u8 = 2;
pub const EXIT_CONFIG: u8 = 3;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            result: None,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    /// Success payload carrying a structured `result` next to the message.
    pub fn success_with(command: &str, message: impl Into<String>, result: impl Serialize) -> Self {
        let result = match serde_json::to_value(result) {
            Ok(value) => value,
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), 1);
            }
        };
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            result: Some(result),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            result: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

/// Seeded jitter when `seed` is given, thread-local randomness otherwise.
pub fn jitter_for(seed: Option<u64>) -> Box<dyn JitterSource> {
    match seed {
        Some(seed) => Box::new(SeededJitter::new(seed)),
        None => Box::new(ThreadJitter),
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
