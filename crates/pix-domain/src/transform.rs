//! Descriptor de transformación con parámetros serializables.
//!
//! Reemplaza a los callbacks inline: en lugar de capturar un entorno
//! opaco, el caller entrega un nombre de transformación y un struct de
//! parámetros serializable. Dos descriptores con mismo nombre y mismos
//! parámetros producen exactamente los mismos bytes canónicos, sin
//! importar la identidad del objeto que los originó.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;

/// Transformación nombrada + parámetros explícitos.
///
/// - `name`: identifica la transformación en el registro del engine.
/// - `params`: estado capturado, entra completo al fingerprint.
/// - `metadata`: anotación auxiliar (labels de debug, trazas). No entra
///   al fingerprint; el sanitizador la elimina antes de serializar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformDescriptor {
    pub name: String,
    pub params: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl TransformDescriptor {
    /// Construye un descriptor serializando `params` a JSON. Falla si el
    /// tipo de parámetros no se puede representar de forma determinista
    /// (p.ej. mapas con claves no-string).
    pub fn new(name: impl Into<String>, params: impl Serialize) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyTransformName);
        }
        let params = serde_json::to_value(params).map_err(|e| DomainError::UnserializableParams(e.to_string()))?;
        Ok(Self { name, params, metadata: None })
    }

    /// Adjunta metadata auxiliar (excluida del fingerprint).
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
