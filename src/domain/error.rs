//! Domain error types.

/// Errors raised while loading the universe table.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("universe table has no entries")]
    Empty,

    #[error("empty field on line {line}")]
    EmptyField { line: usize },

    #[error("malformed row on line {line}")]
    MalformedRow { line: usize },

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

/// Top-level error type for rotrader.
#[derive(Debug, thiserror::Error)]
pub enum RotraderError {
    #[error("data error: {reason}")]
    Data { reason: String },

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

    #[error(transparent)]
    Universe(#[from] UniverseError),

    #[error("need at least 2 annual return rows to rotate, have {years}")]
    NotEnoughYears { years: usize },

    #[error("no stock has returns on both sides of the {year} transition")]
    EmptySelection { year: i32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&RotraderError> for std::process::ExitCode {
    fn from(err: &RotraderError) -> Self {
        let code: u8 = match err {
            RotraderError::Io(_) => 1,
            RotraderError::ConfigParse { .. }
            | RotraderError::ConfigMissing { .. }
            | RotraderError::ConfigInvalid { .. } => 2,
            RotraderError::Data { .. } => 3,
            RotraderError::Universe(_) => 4,
            RotraderError::NotEnoughYears { .. }
            | RotraderError::EmptySelection { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
