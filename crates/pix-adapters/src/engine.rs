//! Engine sintético determinista.
//!
//! `SketchImage` no manipula pixels: mantiene el estado visible de la
//! imagen (dimensiones, source, formato) más el rastro de operaciones
//! aplicadas. El encode serializa SOLO el estado visible en forma
//! canónica; el rastro es metadata intermedia que se pierde al
//! codificar, igual que un bitmap real no conserva su historial. Eso
//! hace observable la diferencia entre una imagen viva y una
//! reconstruida desde cache.
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeSet;

use pix_core::hashing::{hash_bytes, to_canonical_json};
use pix_core::{CoreCacheError, ImageEngine, ImageSurface};
use pix_domain::{ImageOp, ImageSource, OpKind};

/// Engine sintético. Los filtros nombrados deben registrarse antes de
/// usarse; un `Filter` con nombre no registrado es `UnsupportedOperation`
/// en replay.
#[derive(Debug, Clone, Default)]
pub struct SketchEngine {
    filters: BTreeSet<String>,
}

impl SketchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un filtro nombrado que este engine sabe aplicar.
    pub fn register_filter(mut self, name: impl Into<String>) -> Self {
        self.filters.insert(name.into());
        self
    }

    pub fn supports_filter(&self, name: &str) -> bool {
        self.filters.contains(name)
    }
}

/// Estado visible que sobrevive al encode/decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SketchState {
    width: u32,
    height: u32,
    source: Value,
    format: Option<String>,
    quality: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct SketchImage {
    state: SketchState,
    /// Rastro de operaciones aplicadas en vivo. No entra al encode.
    trail: Vec<Value>,
    filters: BTreeSet<String>,
    /// Bytes arrastrados tras un decode; se invalidan al aplicar.
    encoded: Option<Vec<u8>>,
}

impl SketchImage {
    pub fn width(&self) -> u32 {
        self.state.width
    }

    pub fn height(&self) -> u32 {
        self.state.height
    }

    /// Operaciones aplicadas desde que la superficie existe en memoria.
    /// Una imagen reconstruida desde bytes arranca con rastro vacío.
    pub fn trail(&self) -> &[Value] {
        &self.trail
    }

    fn push_trail(&mut self, op: &ImageOp) {
        // El rastro es informativo; la identidad de cache no depende de él.
        if let Ok(v) = serde_json::to_value(op) {
            self.trail.push(v);
        }
        self.encoded = None;
    }
}

impl ImageSurface for SketchImage {
    fn apply(mut self, op: &ImageOp) -> Result<Self, CoreCacheError> {
        if op.kind() == OpKind::Source {
            // La base ya existe; un segundo source en la cadena no tiene
            // receptor válido.
            return Err(CoreCacheError::UnsupportedOperation(op.name().to_string()));
        }
        match op {
            ImageOp::Resize { width, height } | ImageOp::Fit { width, height } => {
                self.state.width = *width;
                self.state.height = *height;
            }
            ImageOp::Crop { width, height, .. } => {
                self.state.width = *width;
                self.state.height = *height;
            }
            ImageOp::Rotate { degrees } => {
                // Giros de 90/270 intercambian dimensiones.
                let quarter = (degrees.rem_euclid(360.0) / 90.0).round() as i32;
                if quarter % 2 == 1 {
                    std::mem::swap(&mut self.state.width, &mut self.state.height);
                }
            }
            ImageOp::Filter { transform } => {
                if !self.filters.contains(&transform.name) {
                    return Err(CoreCacheError::UnsupportedOperation(transform.name.clone()));
                }
            }
            ImageOp::Encode { format, quality } => {
                self.state.format = Some(format_tag(format));
                self.state.quality = *quality;
            }
            // blur / brightness / contrast / flip / greyscale / text no
            // alteran el estado visible de este engine.
            _ => {}
        }
        self.push_trail(op);
        Ok(self)
    }

    fn encode(&self) -> Result<Vec<u8>, CoreCacheError> {
        let value = serde_json::to_value(&self.state).map_err(|e| CoreCacheError::Serialization(e.to_string()))?;
        Ok(to_canonical_json(&value).into_bytes())
    }

    fn encoded_bytes(&self) -> Option<&[u8]> {
        self.encoded.as_deref()
    }
}

impl ImageEngine for SketchEngine {
    type Image = SketchImage;

    fn make_base(&self, source_call: &ImageOp) -> Result<SketchImage, CoreCacheError> {
        let state = match source_call {
            ImageOp::Open { source } => SketchState { width: 0, // dimensiones reales recién se conocen al decodificar
                                                      height: 0,
                                                      source: source_repr(source),
                                                      format: None,
                                                      quality: None },
            ImageOp::Canvas { width, height, background } => {
                SketchState { width: *width,
                              height: *height,
                              source: json!({"kind": "canvas", "background": background}),
                              format: None,
                              quality: None }
            }
            other => return Err(CoreCacheError::UnsupportedOperation(other.name().to_string())),
        };
        Ok(SketchImage { state,
                         trail: Vec::new(),
                         filters: self.filters.clone(),
                         encoded: None })
    }

    fn decode(&self, bytes: &[u8]) -> Result<SketchImage, CoreCacheError> {
        let state: SketchState =
            serde_json::from_slice(bytes).map_err(|e| CoreCacheError::Internal(format!("decode: {e}")))?;
        Ok(SketchImage { state,
                         trail: Vec::new(),
                         filters: self.filters.clone(),
                         encoded: Some(bytes.to_vec()) })
    }
}

fn source_repr(source: &ImageSource) -> Value {
    match source {
        ImageSource::Path(p) => json!({"kind": "path", "value": p.as_str()}),
        // Contenido binario: el estado guarda el hash, no los bytes.
        ImageSource::Bytes(data) => json!({"kind": "bytes", "value": hash_bytes(data)}),
    }
}

fn format_tag(format: &pix_domain::EncodeFormat) -> String {
    match format {
        pix_domain::EncodeFormat::Jpeg => "jpeg".to_string(),
        pix_domain::EncodeFormat::Png => "png".to_string(),
        pix_domain::EncodeFormat::Webp => "webp".to_string(),
    }
}
