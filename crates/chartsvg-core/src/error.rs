use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid chart spec: {message}")]
    InvalidSpec { message: String },

    #[error("Unsupported chart kind: {kind}")]
    UnsupportedKind { kind: String },
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidSpec {
            message: message.into(),
        }
    }

    pub fn reason(&self) -> FailureReason {
        match self {
            Self::InvalidSpec { .. } => FailureReason::InvalidSpec,
            Self::UnsupportedKind { .. } => FailureReason::UnsupportedKind,
        }
    }
}

/// Reason code carried by every surfaced render failure.
///
/// Recoverable conditions (color fallback, skipped smoothing) are not failures and have no code
/// here; see `chartsvg_render::model::Notice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    InvalidSpec,
    UnsupportedKind,
    RenderBackendError,
}

impl FailureReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidSpec => "invalid-spec",
            Self::UnsupportedKind => "unsupported-kind",
            Self::RenderBackendError => "render-backend-error",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
