//! Domain error types.

/// Top-level error type for frontier.
#[derive(Debug, thiserror::Error)]
pub enum FrontierError {
    #[error("insufficient data for {asset}: have {observations} observations, need {minimum}")]
    InsufficientData {
        asset: String,
        observations: usize,
        minimum: usize,
    },

    #[error("length mismatch for {asset}: expected {expected} returns, found {found}")]
    LengthMismatch {
        asset: String,
        expected: usize,
        found: usize,
    },

    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid dimension {dimension}: at least one asset is required")]
    InvalidDimension { dimension: usize },

    #[error("asset order mismatch at index {index}: universe has {expected}, series is {found}")]
    UniverseMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("invalid price series for {asset}: {reason}")]
    InvalidSeries { asset: String, reason: String },

    #[error("invalid weights: {reason}")]
    InvalidWeights { reason: String },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&FrontierError> for std::process::ExitCode {
    fn from(err: &FrontierError) -> Self {
        let code: u8 = match err {
            FrontierError::Io(_) => 1,
            FrontierError::ConfigParse { .. }
            | FrontierError::ConfigMissing { .. }
            | FrontierError::ConfigInvalid { .. } => 2,
            FrontierError::Data { .. } | FrontierError::Report { .. } => 3,
            FrontierError::DimensionMismatch { .. }
            | FrontierError::InvalidDimension { .. }
            | FrontierError::UniverseMismatch { .. }
            | FrontierError::InvalidWeights { .. }
            | FrontierError::InvalidParameter { .. } => 4,
            FrontierError::InsufficientData { .. }
            | FrontierError::LengthMismatch { .. }
            | FrontierError::InvalidSeries { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
