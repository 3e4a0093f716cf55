pub type ParavelResult<T> = Result<T, ParavelError>;

#[derive(thiserror::Error, Debug)]
pub enum ParavelError {
    #[error("document error: {0}")]
    Document(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ParavelError {
    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ParavelError::document("x")
                .to_string()
                .contains("document error:")
        );
        assert!(
            ParavelError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ParavelError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
