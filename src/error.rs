use core::fmt;

/// Startup and platform failures.
///
/// Per-frame simulation never fails; everything here happens before the first
/// tick or at the browser boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// A sprite or sound could not be loaded. Rendering/playback is skipped.
    MissingAsset { path: String },
    /// Settings or viewport make no sense. Startup is aborted.
    InvalidConfiguration { reason: String },
    /// A browser API was unavailable or rejected a call.
    Platform { detail: String },
}

impl GameError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub fn platform(detail: impl Into<String>) -> Self {
        Self::Platform {
            detail: detail.into(),
        }
    }

    /// Whether the game can keep running after this error
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::MissingAsset { .. })
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAsset { path } => write!(f, "missing asset: {path}"),
            Self::InvalidConfiguration { reason } => write!(f, "invalid configuration: {reason}"),
            Self::Platform { detail } => write!(f, "platform error: {detail}"),
        }
    }
}

impl std::error::Error for GameError {}
