//! Error and result types shared by the storage and store layers.
//!
//! Library code returns [`Result`] with a boxed error so backends can surface
//! their own error types; [`Context::with_ctx`] attaches a human readable
//! message (usually the storage path or key) without losing the source chain.
use std::fmt::{Display, Formatter};

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

/// Attach a lazily built message to an error.
pub trait Context<T> {
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

/// An error wrapped with what was being attempted, e.g. `write <path>`.
#[derive(Debug)]
pub struct ContextError {
    pub context: String,
    pub source: DynError,
}

impl Display for ContextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

impl std::error::Error for ContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            Box::new(ContextError {
                context: f(),
                source: e.into(),
            }) as DynError
        })
    }
}

/// Failures raised by a [`crate::storage::KeyValueStore`] backend itself,
/// as opposed to I/O or encoding errors it passes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend refused the write; nothing was stored.
    WriteRefused { key: String },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::WriteRefused { key } => {
                write!(f, "storage unavailable: cannot write '{key}'")
            }
        }
    }
}

impl std::error::Error for StorageError {}
