//! Sanitizador de argumentos para serialización estable.
//!
//! Convierte el historial de llamadas en la secuencia de `Value` que
//! entra al fingerprint:
//! - los bytes de un `Open` binario se reemplazan por un surrogate
//!   (hash de contenido): mismo contenido, mismos bytes canónicos,
//!   sin importar la identidad del buffer;
//! - la `metadata` de los descriptores se elimina en cualquier nivel de
//!   anidamiento (es anotación incidental, variaría entre invocaciones
//!   semánticamente idénticas);
//! - todo argumento que serde no pueda representar es un error fatal,
//!   nunca se omite en silencio.
use serde_json::Value;

use crate::errors::CoreCacheError;
use crate::hashing::hash_bytes;
use pix_domain::{ImageOp, ImageSource};

/// Sanitiza el log completo, en orden de registro.
pub fn sanitize_calls(calls: &[ImageOp]) -> Result<Vec<Value>, CoreCacheError> {
    calls.iter().map(sanitize_call).collect()
}

/// Sanitiza una llamada a su `Value` canónico-listo.
pub fn sanitize_call(op: &ImageOp) -> Result<Value, CoreCacheError> {
    let mut value = serde_json::to_value(op).map_err(|e| CoreCacheError::Serialization(e.to_string()))?;

    // Surrogate de contenido para sources binarios. El array de bytes ya
    // serializado se descarta; queda sólo su hash.
    if let ImageOp::Open { source: ImageSource::Bytes(data) } = op {
        value["source"]["value"] = Value::String(hash_bytes(data));
    }

    strip_descriptor_metadata(&mut value);
    Ok(value)
}

/// Recorre el árbol serializado y elimina `metadata` de todo objeto con
/// forma de descriptor (`name` + `params`), incluso anidado dentro de
/// secuencias o mapas de parámetros.
fn strip_descriptor_metadata(value: &mut Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                strip_descriptor_metadata(item);
            }
        }
        Value::Object(map) => {
            if map.contains_key("name") && map.contains_key("params") {
                map.remove("metadata");
            }
            for (_, v) in map.iter_mut() {
                strip_descriptor_metadata(v);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::hash_value;
    use pix_domain::TransformDescriptor;
    use serde_json::json;

    #[test]
    fn bytes_replaced_by_content_surrogate() {
        let data = vec![0xffu8, 0xd8, 0xff];
        let op = ImageOp::Open { source: ImageSource::bytes(data.clone()).unwrap() };
        let v = sanitize_call(&op).unwrap();
        assert_eq!(v["source"]["value"], json!(hash_bytes(&data)));
    }

    #[test]
    fn same_bytes_different_buffers_same_surrogate() {
        let a = ImageOp::Open { source: ImageSource::bytes(vec![1, 2, 3]).unwrap() };
        let b = ImageOp::Open { source: ImageSource::bytes(vec![1, 2, 3]).unwrap() };
        assert_eq!(hash_value(&sanitize_call(&a).unwrap()), hash_value(&sanitize_call(&b).unwrap()));
    }

    #[test]
    fn descriptor_metadata_stripped_at_top_level() {
        let d = TransformDescriptor::new("sharpen", json!({"amount": 5}))
            .unwrap()
            .with_metadata(json!({"trace_id": "abc-123"}));
        let op = ImageOp::Filter { transform: d };
        let v = sanitize_call(&op).unwrap();
        assert!(v["transform"].get("metadata").is_none());
        assert_eq!(v["transform"]["params"], json!({"amount": 5}));
    }

    #[test]
    fn descriptor_metadata_stripped_when_nested_in_params() {
        // Un descriptor puede llevar sub-descriptores dentro de params.
        let inner = json!({"name": "vignette", "params": {"radius": 9}, "metadata": {"label": "x"}});
        let d = TransformDescriptor::new("compose", json!({"stages": [inner]})).unwrap();
        let op = ImageOp::Filter { transform: d };
        let v = sanitize_call(&op).unwrap();
        let stage = &v["transform"]["params"]["stages"][0];
        assert!(stage.get("metadata").is_none());
        assert_eq!(stage["params"], json!({"radius": 9}));
    }

    #[test]
    fn metadata_does_not_change_fingerprint_input() {
        let plain = TransformDescriptor::new("sharpen", json!({"amount": 5})).unwrap();
        let tagged = plain.clone().with_metadata(json!({"requested_by": "session-9"}));
        let a = sanitize_call(&ImageOp::Filter { transform: plain }).unwrap();
        let b = sanitize_call(&ImageOp::Filter { transform: tagged }).unwrap();
        assert_eq!(hash_value(&a), hash_value(&b));
    }

    #[test]
    fn non_callback_arguments_pass_through_unchanged() {
        let op = ImageOp::Crop { width: 10, height: 20, x: 1, y: 2 };
        let v = sanitize_call(&op).unwrap();
        assert_eq!(v, serde_json::to_value(&op).unwrap());
    }
}
