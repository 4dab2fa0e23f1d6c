//! Fuentes de imagen explícitas.
//!
//! El origen de una imagen se declara con un tag explícito en lugar de
//! inspeccionar la forma de un string: `Path` para archivos bajo los
//! roots de búsqueda y `Bytes` para contenido binario en memoria. La
//! validación de traversal ocurre al construir el `SourcePath`, no al
//! resolverlo.
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

use crate::error::DomainError;

/// Ruta relativa validada hacia un archivo fuente.
///
/// Invariantes (garantizados por el constructor):
/// - no vacía
/// - relativa (se resuelve contra los roots configurados)
/// - sin segmentos `..`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourcePath(String);

impl SourcePath {
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::EmptySourcePath);
        }
        let path = Path::new(&raw);
        if path.is_absolute() {
            return Err(DomainError::AbsoluteSourcePath(raw));
        }
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(DomainError::PathTraversal(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Origen de una operación `Open`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ImageSource {
    /// Archivo bajo los roots de búsqueda del resolver.
    Path(SourcePath),
    /// Contenido binario directo (no pasa por el filesystem).
    Bytes(Vec<u8>),
}

impl ImageSource {
    pub fn path(raw: impl Into<String>) -> Result<Self, DomainError> {
        Ok(ImageSource::Path(SourcePath::new(raw)?))
    }

    pub fn bytes(data: Vec<u8>) -> Result<Self, DomainError> {
        if data.is_empty() {
            return Err(DomainError::EmptyBinarySource);
        }
        Ok(ImageSource::Bytes(data))
    }

    /// Ruta del source si es un archivo.
    pub fn as_path(&self) -> Option<&SourcePath> {
        match self {
            ImageSource::Path(p) => Some(p),
            ImageSource::Bytes(_) => None,
        }
    }
}
