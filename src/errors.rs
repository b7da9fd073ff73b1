use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Connection to {uri} failed: {reason}")]
    Connection { uri: String, reason: String },

    #[error("MongoDB: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("step '{label}' failed: {source}")]
    Step {
        label: String,
        #[source]
        source: Box<DbError>,
    },

    #[error("Logger error: {0}")]
    Logger(String),
}

impl DbError {
    /// Wraps an error raised while executing the step named `label`.
    #[must_use]
    pub fn in_step(label: &str, source: Self) -> Self {
        Self::Step { label: label.to_string(), source: Box::new(source) }
    }
}

impl From<std::io::Error> for DbError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
