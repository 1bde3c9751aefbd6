use thiserror::Error;

/// Every failure is fatal to the file being processed; variants carry enough context
/// to locate the offending row or file.
#[derive(Error, Debug)]
pub enum DeoverlapError {
    #[error("Format error at line {line}: {reason}\n  row: {row}")]
    Format {
        line: usize,
        reason: String,
        row: String,
    },

    #[error("Ordering error at line {line} (target {target}): {reason}")]
    Ordering {
        line: usize,
        target: String,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Clan file error at line {line}: {reason}")]
    ClanFile { line: usize, reason: String },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DeoverlapError {
    pub fn format(line: usize, row: &str, reason: impl Into<String>) -> Self {
        DeoverlapError::Format {
            line,
            reason: reason.into(),
            row: row.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeoverlapError>;
