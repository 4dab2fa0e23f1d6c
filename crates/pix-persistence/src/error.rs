use thiserror::Error;

use pix_core::GatewayError;

/// Errores del backend de archivos.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io: {0}")] Io(#[from] std::io::Error),
    #[error("corrupt cache entry at {0}")] CorruptEntry(String),
}

impl From<PersistenceError> for GatewayError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Io(e) => GatewayError::Io(e.to_string()),
            PersistenceError::CorruptEntry(path) => GatewayError::Backend(format!("corrupt entry: {path}")),
        }
    }
}
