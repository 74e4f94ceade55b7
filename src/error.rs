use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("{service} doesn't have '{method}' method")]
    MissingCapability {
        service: String,
        method: &'static str,
    },

    #[error("Unsupported data format!")]
    UnsupportedFormat,

    #[error("Failed to convert XML payload: {0}")]
    Xml(String),

    #[error("Invalid car catalog: {0}")]
    Catalog(#[from] toml::de::Error),
}

impl PatternError {
    pub fn missing_capability(service: impl Into<String>, method: &'static str) -> Self {
        Self::MissingCapability {
            service: service.into(),
            method,
        }
    }
}

impl From<quick_xml::Error> for PatternError {
    fn from(err: quick_xml::Error) -> Self {
        PatternError::Xml(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PatternError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_capability_display() {
        let error = PatternError::missing_capability("Adaptee", "request");
        assert_eq!(error.to_string(), "Adaptee doesn't have 'request' method");
    }

    #[test]
    fn test_unsupported_format_display() {
        assert_eq!(
            PatternError::UnsupportedFormat.to_string(),
            "Unsupported data format!"
        );
    }

    #[test]
    fn test_catalog_error_from_toml() {
        let err = toml::from_str::<toml::Value>("[[car]\nbrand = ").unwrap_err();
        let error = PatternError::from(err);
        assert!(error.to_string().starts_with("Invalid car catalog"));
    }
}
