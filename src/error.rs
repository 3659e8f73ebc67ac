pub type VeneerResult<T> = Result<T, VeneerError>;

#[derive(thiserror::Error, Debug)]
pub enum VeneerError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("image decode error: {0}")]
    ImageDecode(String),

    #[error("renderer unavailable: {0}")]
    RendererUnavailable(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VeneerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    pub fn renderer_unavailable(msg: impl Into<String>) -> Self {
        Self::RendererUnavailable(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            VeneerError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            VeneerError::image_decode("x")
                .to_string()
                .contains("image decode error:")
        );
        assert!(
            VeneerError::renderer_unavailable("x")
                .to_string()
                .contains("renderer unavailable:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = VeneerError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
