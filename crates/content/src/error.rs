#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to load content from {origin}: {err}")]
    Load {
        origin: String,
        err: config::ConfigError,
    },

    #[error("invalid content: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("duplicate {section} id `{id}`")]
    Duplicate { section: &'static str, id: String },
}

pub type Result<T> = std::result::Result<T, ContentError>;
