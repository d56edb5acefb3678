use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_SCHEMA: &str = "AMP-ERR-SCHEMA";
pub const ERR_IO: &str = "AMP-ERR-IO";
pub const ERR_CONFIG: &str = "AMP-ERR-CONFIG";
pub const ERR_OUTPUT: &str = "AMP-ERR-OUTPUT";

/// Every failure aborts the whole generation run. There is no partial output.
#[derive(Error, Debug)]
pub enum GenError {
    #[error("Rule table does not match the expected schema: {0}")]
    SchemaMismatch(#[from] serde_json::Error),

    #[error("Tag '{tag}' references {table}[{index}], but the table has {len} entries")]
    DanglingAttribute {
        tag: String,
        table: &'static str,
        index: u64,
        len: usize,
    },

    #[error("Tag '{tag}' has more than one variant selected by specName '{spec_name}'")]
    DuplicateVariant { tag: String, spec_name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Generated module does not parse: {}", .0.join("; "))]
    InvalidOutput(Vec<String>),
}

impl GenError {
    pub fn code(&self) -> &'static str {
        match self {
            GenError::SchemaMismatch(_)
            | GenError::DanglingAttribute { .. }
            | GenError::DuplicateVariant { .. } => ERR_SCHEMA,
            GenError::Io(_) => ERR_IO,
            GenError::Config(_) => ERR_CONFIG,
            GenError::InvalidOutput(_) => ERR_OUTPUT,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
