//! Cálculo del fingerprint de sesión.
//!
//! `FingerprintInput` agrupa los insumos (versión de fórmula,
//! propiedades, llamadas sanitizadas). NO es el fingerprint final
//! (string hash) sino el modelo previo a canonicalizar. La función es
//! pura: sin aleatoriedad y sin depender de orden de iteración de mapas
//! (las propiedades viven en un BTreeMap y la forma canónica reordena
//! claves de todos modos).
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::call::CallLog;
use crate::constants::FORMULA_VERSION;
use crate::errors::CoreCacheError;
use crate::hashing::hash_value;
use crate::props::PropertyBag;
use crate::sanitize::sanitize_calls;

/// Insumos del fingerprint, en el orden en que entran al hash.
#[derive(Serialize)]
pub struct FingerprintInput<'a> {
    pub formula_version: &'a str,
    pub properties: &'a BTreeMap<String, Value>, // orden por clave
    pub calls: &'a [Value],                      // sanitizadas, orden de registro
}

/// Digest estable que identifica (propiedades, secuencia de llamadas).
/// Es la clave bajo la que el gateway guarda los bytes producidos.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reconstruye una clave ya calculada (p.ej. recibida en una URL o
    /// leída de un índice). No valida contenido: una clave ajena solo
    /// producirá misses.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Fingerprint(raw.into())
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calcula el fingerprint del estado actual (propiedades + llamadas).
pub fn fingerprint(props: &PropertyBag, calls: &CallLog) -> Result<Fingerprint, CoreCacheError> {
    let sanitized = sanitize_calls(calls.as_slice())?;
    let input = FingerprintInput { formula_version: FORMULA_VERSION,
                                   properties: props.entries(),
                                   calls: &sanitized };
    let value = serde_json::to_value(&input).map_err(|e| CoreCacheError::Serialization(e.to_string()))?;
    Ok(Fingerprint(hash_value(&value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pix_domain::{ImageOp, ImageSource};

    fn log_open_resize() -> CallLog {
        let mut log = CallLog::new();
        log.append(ImageOp::Open { source: ImageSource::path("foo/bar.jpg").unwrap() });
        log.append(ImageOp::Resize { width: 300, height: 200 });
        log
    }

    #[test]
    fn structurally_equal_sessions_share_fingerprint() {
        let fp1 = fingerprint(&PropertyBag::new(), &log_open_resize()).unwrap();
        let fp2 = fingerprint(&PropertyBag::new(), &log_open_resize()).unwrap();
        assert_eq!(fp1, fp2);
        assert_eq!(fp1.as_str().len(), 64);
    }

    #[test]
    fn fingerprint_is_idempotent_over_unmutated_state() {
        let props = PropertyBag::new();
        let log = log_open_resize();
        assert_eq!(fingerprint(&props, &log).unwrap(), fingerprint(&props, &log).unwrap());
    }

    #[test]
    fn argument_value_changes_fingerprint() {
        let mut other = CallLog::new();
        other.append(ImageOp::Open { source: ImageSource::path("foo/bar.jpg").unwrap() });
        other.append(ImageOp::Resize { width: 300, height: 201 });
        assert_ne!(fingerprint(&PropertyBag::new(), &log_open_resize()).unwrap(),
                   fingerprint(&PropertyBag::new(), &other).unwrap());
    }

    #[test]
    fn call_order_changes_fingerprint() {
        let mut a = CallLog::new();
        a.append(ImageOp::Open { source: ImageSource::path("a.jpg").unwrap() });
        a.append(ImageOp::Blur { sigma: 2.0 });
        a.append(ImageOp::Greyscale);
        let mut b = CallLog::new();
        b.append(ImageOp::Open { source: ImageSource::path("a.jpg").unwrap() });
        b.append(ImageOp::Greyscale);
        b.append(ImageOp::Blur { sigma: 2.0 });
        assert_ne!(fingerprint(&PropertyBag::new(), &a).unwrap(),
                   fingerprint(&PropertyBag::new(), &b).unwrap());
    }

    #[test]
    fn property_changes_fingerprint() {
        let log = log_open_resize();
        let without = fingerprint(&PropertyBag::new(), &log).unwrap();
        let mut props = PropertyBag::new();
        props.set("foo", "bar");
        let with = fingerprint(&props, &log).unwrap();
        assert_ne!(without, with);
    }

    #[test]
    fn empty_log_still_fingerprints() {
        // Una sesión vacía tiene clave propia (como el checksum del
        // estado inicial); el replay es quien exige llamadas.
        let fp = fingerprint(&PropertyBag::new(), &CallLog::new()).unwrap();
        assert_eq!(fp.as_str().len(), 64);
    }
}
