use thiserror::Error;

/// Main error type for the replayer library
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Asset resolution and probing errors
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset not found: {name}.{ext} in {dir}")]
    NotFound {
        name: String,
        ext: String,
        dir: String,
    },

    #[error("Failed to probe media file: {path}")]
    ProbeFailed { path: String },

    #[error("Unsupported media format: {format}")]
    UnsupportedFormat { format: String },
}

/// Timeline construction errors
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("Asset exposes no video track")]
    NoVideoTrack,

    #[error("Track insertion rejected: {reason}")]
    InsertionRejected { reason: String },

    #[error("Track {track} exposes no natural size")]
    MissingGeometry { track: u32 },
}

/// Playback session errors
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("No player found on the output layer")]
    NoEngine,

    #[error("Playback item failed: {reason}")]
    ItemFailed { reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using PlayerError
pub type Result<T> = std::result::Result<T, PlayerError>;

impl PlayerError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // IO errors might be temporary
            Self::Io(_) => true,
            // A missing bundle file might appear on retry
            Self::Asset(AssetError::NotFound { .. }) => true,
            // Most other errors are permanent
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Asset(AssetError::NotFound { name, ext, dir }) => {
                format!(
                    "Could not find '{}.{}' in '{}'. Please check the bundle directory.",
                    name, ext, dir
                )
            }
            Self::Timeline(TimelineError::NoVideoTrack) => {
                "The selected asset has no video track to play.".to_string()
            }
            Self::Playback(PlaybackError::NoEngine) => {
                "The output layer has no player attached.".to_string()
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
