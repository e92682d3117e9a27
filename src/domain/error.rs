use thiserror::Error;

/// Core domain errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Upstream error: {provider} - {message}")]
    Upstream { provider: String, message: String },

    #[error("Analytics error: {message}")]
    Analytics { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn upstream(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn analytics(message: impl Into<String>) -> Self {
        Self::Analytics {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for the variant that maps to a user-facing 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
