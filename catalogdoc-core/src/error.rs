//! Error types for catalogdoc operations.
//!
//! Every stage of the pipeline reports failures through [`CatalogDocError`].
//! The run stops on the first error, so variants carry enough context to
//! explain what was being done when it happened.

use thiserror::Error;

/// Main error type for catalogdoc operations.
#[derive(Debug, Error)]
pub enum CatalogDocError {
    /// Configuration or argument validation failed
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A catalog service request failed
    #[error("Catalog request failed: {context}")]
    Catalog {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Table metadata returned by the catalog cannot be documented
    #[error("Invalid table metadata: {message}")]
    InvalidTable { message: String },

    /// Template rendering failed
    #[error("Template rendering failed: {context}")]
    Render {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization or deserialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The run was interrupted before it finished
    #[error("Operation cancelled")]
    Cancelled,
}

/// Convenience type alias for Results with `CatalogDocError`
pub type Result<T> = std::result::Result<T, CatalogDocError>;

impl CatalogDocError {
    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a catalog request error with context
    pub fn catalog_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Catalog {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates an invalid table error
    pub fn invalid_table(message: impl Into<String>) -> Self {
        Self::InvalidTable {
            message: message.into(),
        }
    }

    /// Creates a rendering error with context
    pub fn render_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Render {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Process exit code for this error.
    ///
    /// Interrupted runs use the conventional 128 + SIGINT status.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Cancelled => 130,
            Self::Configuration { .. } => 2,
            _ => 1,
        }
    }
}
