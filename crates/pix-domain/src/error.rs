use thiserror::Error;

/// Errores de validación del vocabulario de dominio. Se detectan al
/// construir/registrar una operación, nunca durante el replay.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DomainError {
    #[error("invalid dimensions {0}x{1}")] InvalidDimensions(u32, u32),
    #[error("parameter `{0}` must be finite")] NonFiniteParameter(&'static str),
    #[error("parameter `{name}` out of range: {value}")] ParameterOutOfRange { name: &'static str, value: i64 },
    #[error("transform descriptor needs a non-empty name")] EmptyTransformName,
    #[error("transform params not serializable: {0}")] UnserializableParams(String),
    #[error("empty source path")] EmptySourcePath,
    #[error("source path must be relative: {0}")] AbsoluteSourcePath(String),
    #[error("source path contains traversal segment: {0}")] PathTraversal(String),
    #[error("empty binary source")] EmptyBinarySource,
}
