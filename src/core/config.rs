//! Configuration management for the todo chat server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// HTTP listener configuration.
    pub http: HttpConfig,

    /// Database configuration.
    pub database: DatabaseConfig,

    /// Hosted model configuration.
    pub ai: AiConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Host address to bind to.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Whether to enable permissive CORS for browser clients.
    pub enable_cors: bool,
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: String,
}

/// Configuration for the hosted model endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// API key sent as a bearer token.
    pub api_key: String,

    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,

    /// Model identifier to request.
    pub model: String,

    /// Sampling temperature.
    pub temperature: f32,

    /// Maximum tokens to generate per turn.
    pub max_tokens: u32,

    /// Nucleus sampling cutoff.
    pub top_p: f32,

    /// Frequency penalty.
    pub frequency_penalty: f32,

    /// Presence penalty.
    pub presence_penalty: f32,

    /// Stop sequences. Defaults to the reasoning markers some models leak
    /// so they are cut off at the provider instead of post-processed.
    pub stop: Vec<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop: ["<think>", "<thinking>", "<reason>", "<reasoning>"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "todo-chat-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            http: HttpConfig {
                host: "127.0.0.1".to_string(),
                port: 3001,
                enable_cors: true,
            },
            database: DatabaseConfig {
                path: "todos.db".to_string(),
            },
            ai: AiConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `TODO_`.
    /// For example: `TODO_SERVER_NAME`, `TODO_LOG_LEVEL`, `TODO_AI_MODEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("TODO_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("TODO_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(host) = std::env::var("TODO_HTTP_HOST") {
            config.http.host = host;
        }

        if let Ok(port) = std::env::var("TODO_HTTP_PORT") {
            config.http.port = port.parse().unwrap_or(config.http.port);
        }

        if let Ok(enable_cors) = std::env::var("TODO_ENABLE_CORS") {
            config.http.enable_cors = enable_cors.parse().unwrap_or(true);
        }

        if let Ok(path) = std::env::var("TODO_DATABASE_PATH") {
            config.database.path = path;
        }

        // The dedicated variable wins; the conventional OpenAI one is
        // accepted as a fallback.
        if let Ok(api_key) =
            std::env::var("TODO_AI_API_KEY").or_else(|_| std::env::var("OPENAI_API_KEY"))
        {
            config.ai.api_key = api_key;
            info!("Model API key loaded from environment");
        } else {
            warn!("No model API key set - chat requests will be rejected by the provider");
        }

        if let Ok(base_url) = std::env::var("TODO_AI_BASE_URL") {
            config.ai.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Ok(model) = std::env::var("TODO_AI_MODEL") {
            config.ai.model = model;
        }

        if let Ok(temperature) = std::env::var("TODO_AI_TEMPERATURE") {
            config.ai.temperature = temperature.parse().unwrap_or(config.ai.temperature);
        }

        if let Ok(max_tokens) = std::env::var("TODO_AI_MAX_TOKENS") {
            config.ai.max_tokens = max_tokens.parse().unwrap_or(config.ai.max_tokens);
        }

        config
    }
}
