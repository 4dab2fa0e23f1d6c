//! Resolución de archivos fuente bajo roots de búsqueda.
//!
//! Colaborador de filesystem de la sesión: localiza el archivo detrás de
//! un `SourcePath`, lee su contenido (passthrough del original) y expone
//! el mtime que alimenta la propiedad `modified`. Los segmentos de
//! traversal ya son irrepresentables en `SourcePath`; aquí se re-chequea
//! defensivamente de todos modos.
use chrono::{DateTime, Utc};
use std::path::{Component, Path, PathBuf};

use crate::errors::CoreCacheError;
use pix_domain::SourcePath;

#[derive(Debug, Clone)]
pub struct SourceResolver {
    roots: Vec<PathBuf>,
    /// Imagen de reemplazo cuando el source no aparece en ningún root.
    default_source: Option<PathBuf>,
}

impl SourceResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots, default_source: None }
    }

    /// Configura un archivo de fallback (ruta ya resuelta, fuera de los
    /// roots de búsqueda).
    pub fn with_default_source(mut self, path: PathBuf) -> Self {
        self.default_source = Some(path);
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Busca el archivo en orden de roots; primer match gana.
    pub fn resolve(&self, source: &SourcePath) -> Result<PathBuf, CoreCacheError> {
        let relative = Path::new(source.as_str());
        if relative.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(CoreCacheError::SourceNotFound(source.as_str().to_string()));
        }
        for root in &self.roots {
            let candidate = root.join(relative);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
        match &self.default_source {
            Some(fallback) if fallback.is_file() => Ok(fallback.clone()),
            _ => Err(CoreCacheError::SourceNotFound(source.as_str().to_string())),
        }
    }

    /// Contenido del archivo fuente sin procesar.
    pub fn read(&self, source: &SourcePath) -> Result<Vec<u8>, CoreCacheError> {
        let path = self.resolve(source)?;
        std::fs::read(&path).map_err(|e| CoreCacheError::Internal(format!("read {}: {e}", path.display())))
    }

    /// Timestamp unix (segundos) de última modificación. Se consulta al
    /// registrar la llamada, no al calcular el fingerprint: el archivo
    /// puede cambiar entre ambos momentos.
    pub fn last_modified(&self, source: &SourcePath) -> Result<i64, CoreCacheError> {
        let path = self.resolve(source)?;
        let meta = std::fs::metadata(&path)
            .map_err(|e| CoreCacheError::Internal(format!("metadata {}: {e}", path.display())))?;
        let modified = meta.modified()
                           .map_err(|e| CoreCacheError::Internal(format!("mtime {}: {e}", path.display())))?;
        Ok(DateTime::<Utc>::from(modified).timestamp())
    }
}
