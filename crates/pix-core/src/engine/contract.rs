//! Contratos del engine de imagen externo.
//!
//! El core no decodifica ni transforma pixels; delega en un engine
//! inyectado que cumple estos traits. Implementaciones deben ser puras
//! respecto a la operación recibida: misma superficie + misma op, mismo
//! resultado.
use crate::errors::CoreCacheError;
use pix_domain::ImageOp;

/// Superficie de imagen sobre la que se aplican operaciones encadenadas.
pub trait ImageSurface: Sized {
    /// Aplica una operación y devuelve la superficie resultante. Una
    /// operación que esta superficie no soporta es un error terminal
    /// (`UnsupportedOperation`); saltarla en silencio rompería el mapeo
    /// fingerprint→contenido.
    fn apply(self, op: &ImageOp) -> Result<Self, CoreCacheError>;

    /// Codifica la superficie a bytes (el formato lo decide el engine).
    fn encode(&self) -> Result<Vec<u8>, CoreCacheError>;

    /// Bytes ya codificados si la superficie los arrastra (p.ej. tras un
    /// decode). Permite saltar el re-encode al guardar en cache.
    fn encoded_bytes(&self) -> Option<&[u8]> {
        None
    }
}

/// Punto de entrada del engine: crea superficies base y decodifica.
pub trait ImageEngine {
    type Image: ImageSurface;

    /// Crea la superficie base a partir de la llamada Source inicial
    /// (`open` o `canvas`). `source_call.kind()` es `Source` por
    /// contrato del replay.
    fn make_base(&self, source_call: &ImageOp) -> Result<Self::Image, CoreCacheError>;

    /// Reconstruye una superficie desde bytes cacheados.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Image, CoreCacheError>;
}

/// El engine puede compartirse entre sesiones por referencia.
impl<E: ImageEngine> ImageEngine for &E {
    type Image = E::Image;

    fn make_base(&self, source_call: &ImageOp) -> Result<Self::Image, CoreCacheError> {
        (**self).make_base(source_call)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Self::Image, CoreCacheError> {
        (**self).decode(bytes)
    }
}
