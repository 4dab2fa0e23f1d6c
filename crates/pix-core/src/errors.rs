//! Errores específicos del core (simples por ahora).

use thiserror::Error;

use crate::gateway::GatewayError;
use pix_domain::DomainError;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CoreCacheError {
    #[error("unsupported operation `{0}` for this engine")] UnsupportedOperation(String),
    #[error("source not found: {0}")] SourceNotFound(String),
    #[error("argument not deterministically serializable: {0}")] Serialization(String),
    #[error("cache gateway failure: {0}")] Gateway(#[from] GatewayError),
    #[error("call log is empty")] EmptyCallLog,
    #[error("first call must be source kind")] FirstCallMustBeSource,
    #[error("invalid call: {0}")] InvalidCall(#[from] DomainError),
    #[error("internal: {0}")] Internal(String),
}
