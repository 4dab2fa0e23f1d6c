//! Vocabulario cerrado de operaciones de imagen diferidas.
//!
//! Cada operación es una variante tipada: un nombre desconocido es
//! irrepresentable y los argumentos se validan al registrar, no al
//! ejecutar. La serialización serde (tag `op`) es la superficie canónica
//! que consume el fingerprint; cambiar nombres de campo o de variante
//! cambia todas las claves de cache.
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::source::ImageSource;
use crate::transform::TransformDescriptor;

/// Tipo general de la operación.
///
/// El replay exige que la primera llamada registrada sea `Source` (crea
/// la superficie base); `Transform` y `Encode` se aplican encadenadas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind { Source, Transform, Encode }

/// Eje de volteo para `Flip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipAxis { Horizontal, Vertical }

/// Formato destino de `Encode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodeFormat { Jpeg, Png, Webp }

/// Una invocación diferida sobre la imagen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ImageOp {
    /// Crea la base desde un archivo o bytes en memoria.
    Open { source: ImageSource },
    /// Crea la base como lienzo vacío de `width`x`height`.
    Canvas {
        width: u32,
        height: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        background: Option<String>,
    },
    Resize { width: u32, height: u32 },
    /// Recorte+escala preservando proporción (el combinador de los
    /// presets small/medium/large).
    Fit { width: u32, height: u32 },
    Crop { width: u32, height: u32, x: i32, y: i32 },
    Blur { sigma: f32 },
    Brightness { level: i32 },
    Contrast { level: i32 },
    Rotate { degrees: f32 },
    Flip { axis: FlipAxis },
    Greyscale,
    Text {
        content: String,
        x: i32,
        y: i32,
        #[serde(skip_serializing_if = "Option::is_none")]
        font: Option<TransformDescriptor>,
    },
    /// Aplica una transformación nombrada del registro del engine.
    Filter { transform: TransformDescriptor },
    Encode {
        format: EncodeFormat,
        #[serde(skip_serializing_if = "Option::is_none")]
        quality: Option<u8>,
    },
}

impl ImageOp {
    /// Nombre estable de la operación (coincide con el tag serde).
    pub fn name(&self) -> &'static str {
        match self {
            ImageOp::Open { .. } => "open",
            ImageOp::Canvas { .. } => "canvas",
            ImageOp::Resize { .. } => "resize",
            ImageOp::Fit { .. } => "fit",
            ImageOp::Crop { .. } => "crop",
            ImageOp::Blur { .. } => "blur",
            ImageOp::Brightness { .. } => "brightness",
            ImageOp::Contrast { .. } => "contrast",
            ImageOp::Rotate { .. } => "rotate",
            ImageOp::Flip { .. } => "flip",
            ImageOp::Greyscale => "greyscale",
            ImageOp::Text { .. } => "text",
            ImageOp::Filter { .. } => "filter",
            ImageOp::Encode { .. } => "encode",
        }
    }

    pub fn kind(&self) -> OpKind {
        match self {
            ImageOp::Open { .. } | ImageOp::Canvas { .. } => OpKind::Source,
            ImageOp::Encode { .. } => OpKind::Encode,
            _ => OpKind::Transform,
        }
    }

    /// Validación de argumentos al momento de registrar.
    ///
    /// Rechaza dimensiones cero, niveles fuera de rango y floats no
    /// finitos (un NaN serializado dejaría de distinguir dos llamadas
    /// distintas).
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            ImageOp::Canvas { width, height, .. }
            | ImageOp::Resize { width, height }
            | ImageOp::Fit { width, height }
            | ImageOp::Crop { width, height, .. } => check_dimensions(*width, *height),
            ImageOp::Blur { sigma } => {
                if !sigma.is_finite() {
                    return Err(DomainError::NonFiniteParameter("sigma"));
                }
                if *sigma < 0.0 || *sigma > 100.0 {
                    return Err(DomainError::ParameterOutOfRange { name: "sigma", value: *sigma as i64 });
                }
                Ok(())
            }
            ImageOp::Brightness { level } => check_level("brightness", *level),
            ImageOp::Contrast { level } => check_level("contrast", *level),
            ImageOp::Rotate { degrees } => {
                if degrees.is_finite() {
                    Ok(())
                } else {
                    Err(DomainError::NonFiniteParameter("degrees"))
                }
            }
            ImageOp::Encode { quality, .. } => match quality {
                Some(q) if *q > 100 => Err(DomainError::ParameterOutOfRange { name: "quality", value: *q as i64 }),
                _ => Ok(()),
            },
            ImageOp::Filter { transform } => check_descriptor(transform),
            ImageOp::Text { font, .. } => font.as_ref().map(check_descriptor).unwrap_or(Ok(())),
            ImageOp::Open { .. } | ImageOp::Flip { .. } | ImageOp::Greyscale => Ok(()),
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), DomainError> {
    if width == 0 || height == 0 {
        return Err(DomainError::InvalidDimensions(width, height));
    }
    Ok(())
}

fn check_level(name: &'static str, level: i32) -> Result<(), DomainError> {
    if !(-100..=100).contains(&level) {
        return Err(DomainError::ParameterOutOfRange { name, value: level as i64 });
    }
    Ok(())
}

fn check_descriptor(d: &TransformDescriptor) -> Result<(), DomainError> {
    if d.name.trim().is_empty() {
        return Err(DomainError::EmptyTransformName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn op_names_match_serde_tag() {
        let op = ImageOp::Resize { width: 300, height: 200 };
        let v = serde_json::to_value(&op).unwrap();
        assert_eq!(v["op"], json!(op.name()));
    }

    #[test]
    fn source_kind_is_open_and_canvas() {
        let open = ImageOp::Open { source: ImageSource::path("a.jpg").unwrap() };
        let canvas = ImageOp::Canvas { width: 300, height: 200, background: None };
        assert_eq!(open.kind(), OpKind::Source);
        assert_eq!(canvas.kind(), OpKind::Source);
        assert_eq!(ImageOp::Greyscale.kind(), OpKind::Transform);
        assert_eq!(ImageOp::Encode { format: EncodeFormat::Png, quality: None }.kind(), OpKind::Encode);
    }

    #[test]
    fn validate_rejects_zero_dimensions() {
        let op = ImageOp::Resize { width: 0, height: 200 };
        assert_eq!(op.validate(), Err(DomainError::InvalidDimensions(0, 200)));
    }

    #[test]
    fn validate_rejects_non_finite_blur() {
        let op = ImageOp::Blur { sigma: f32::NAN };
        assert_eq!(op.validate(), Err(DomainError::NonFiniteParameter("sigma")));
    }

    #[test]
    fn validate_rejects_out_of_range_levels() {
        assert!(ImageOp::Brightness { level: 101 }.validate().is_err());
        assert!(ImageOp::Contrast { level: -101 }.validate().is_err());
        assert!(ImageOp::Brightness { level: -100 }.validate().is_ok());
    }

    #[test]
    fn validate_rejects_quality_above_100() {
        let op = ImageOp::Encode { format: EncodeFormat::Jpeg, quality: Some(101) };
        assert!(op.validate().is_err());
    }

    #[test]
    fn canonical_surface_is_stable() {
        // El shape serializado es contrato: cambiarlo invalida claves.
        let op = ImageOp::Crop { width: 100, height: 80, x: 5, y: -3 };
        let v = serde_json::to_value(&op).unwrap();
        assert_eq!(v, json!({"op": "crop", "width": 100, "height": 80, "x": 5, "y": -3}));
    }
}
