//! Resultado del replay con su clave de cache adjunta.
use crate::engine::contract::ImageSurface;
use crate::errors::CoreCacheError;
use crate::fingerprint::Fingerprint;

/// Imagen producida por la sesión, etiquetada con el fingerprint bajo el
/// que se (re)generó. Inmutable una vez etiquetada.
///
/// Limitación conocida: una imagen reconstruida desde bytes cacheados
/// (vía decode del engine) no es idéntica a la producida por ejecución
/// en vivo: pierde la metadata intermedia de procesamiento. Es el
/// comportamiento aceptado, no un defecto a corregir aquí.
#[derive(Debug, Clone)]
pub struct CachedImage<I> {
    surface: I,
    cache_key: Fingerprint,
}

impl<I: ImageSurface> CachedImage<I> {
    pub(crate) fn new(surface: I, cache_key: Fingerprint) -> Self {
        Self { surface, cache_key }
    }

    pub fn cache_key(&self) -> &Fingerprint {
        &self.cache_key
    }

    pub fn surface(&self) -> &I {
        &self.surface
    }

    pub fn into_surface(self) -> I {
        self.surface
    }

    /// Bytes codificados de la imagen. Reusa la forma ya codificada si
    /// la superficie la arrastra (evita el doble encode al guardar).
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreCacheError> {
        match self.surface.encoded_bytes() {
            Some(bytes) => Ok(bytes.to_vec()),
            None => self.surface.encode(),
        }
    }
}
