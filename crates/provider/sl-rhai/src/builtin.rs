//! Built-in Rhai functions and host types available to every plugin script.

use rhai::{Dynamic, Engine};
use sl_types::Packet;

/// Error value a script can assign to report failure, created with `error(msg)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFailure {
    message: String,
}

impl ScriptFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Registers all built-in functions in the Rhai engine.
pub fn register_builtin_functions(engine: &mut Engine) {
    register_host_types(engine);
    register_uuid_functions(engine);
    register_time_functions(engine);
    register_parsing_functions(engine);
}

fn register_host_types(engine: &mut Engine) {
    // Packets are opaque; only the identifier is readable
    engine.register_type_with_name::<Packet>("Packet");
    engine.register_get("id", |p: &mut Packet| p.id.clone());
    engine.register_fn("to_string", |p: &mut Packet| format!("Packet({})", p.id));

    engine.register_type_with_name::<ScriptFailure>("Error");
    engine.register_fn("error", |message: &str| ScriptFailure::new(message));
    engine.register_get("message", |e: &mut ScriptFailure| e.message.clone());
    engine.register_fn("to_string", |e: &mut ScriptFailure| e.message.clone());
}

fn register_uuid_functions(engine: &mut Engine) {
    // UUID v4 generation
    engine.register_fn("uuid", || uuid::Uuid::new_v4().to_string());
}

fn register_time_functions(engine: &mut Engine) {
    // Current timestamp in ISO 8601 format
    engine.register_fn("timestamp", || chrono::Utc::now().to_rfc3339());

    // Unix timestamp in seconds
    engine.register_fn("unix_timestamp", || chrono::Utc::now().timestamp());

    // Unix timestamp in milliseconds
    engine.register_fn("unix_timestamp_ms", || {
        chrono::Utc::now().timestamp_millis()
    });
}

fn register_parsing_functions(engine: &mut Engine) {
    engine.register_fn("parse_int", |s: &str| -> Dynamic {
        s.trim()
            .parse::<i64>()
            .map(Dynamic::from)
            .unwrap_or(Dynamic::UNIT)
    });

    engine.register_fn("parse_float", |s: &str| -> Dynamic {
        s.trim()
            .parse::<f64>()
            .map(Dynamic::from)
            .unwrap_or(Dynamic::UNIT)
    });

    engine.register_fn("parse_bool", |s: &str| -> Dynamic {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Dynamic::from(true),
            "false" | "0" | "no" | "off" => Dynamic::from(false),
            _ => Dynamic::UNIT,
        }
    });
}
