//! Sesión de cache de transformaciones diferidas.
//!
//! Objeto builder de un solo dueño: se construye, se llena con llamadas
//! encadenadas y se consume dentro de un request. No es seguro mutarlo
//! desde varios hilos; el recurso compartido entre sesiones es el
//! gateway, nunca la sesión. Engine y gateway llegan por inyección en el
//! constructor: no hay lookup global.
use serde_json::Value;
use uuid::Uuid;

use crate::call::CallLog;
use crate::constants::DEFAULT_LIFETIME_MINUTES;
use crate::engine::contract::ImageEngine;
use crate::engine::replay::replay;
use crate::engine::result::CachedImage;
use crate::errors::CoreCacheError;
use crate::fingerprint::{fingerprint, Fingerprint};
use crate::fs::SourceResolver;
use crate::gateway::CacheGateway;
use crate::props::PropertyBag;
use pix_domain::{EncodeFormat, FlipAxis, ImageOp, ImageSource, SourcePath, TransformDescriptor};

#[derive(Debug)]
pub struct CacheSession<E, G>
    where E: ImageEngine,
          G: CacheGateway
{
    session_id: Uuid,
    engine: E,
    gateway: G,
    resolver: SourceResolver,
    calls: CallLog,
    props: PropertyBag,
    lifetime: u32,
}

impl<E, G> CacheSession<E, G>
    where E: ImageEngine,
          G: CacheGateway
{
    pub fn new(engine: E, gateway: G, resolver: SourceResolver) -> Self {
        Self { session_id: Uuid::new_v4(),
               engine,
               gateway,
               resolver,
               calls: CallLog::new(),
               props: PropertyBag::new(),
               lifetime: DEFAULT_LIFETIME_MINUTES }
    }

    /// Cambia el TTL por defecto (minutos) usado cuando `get` no recibe
    /// uno explícito.
    pub fn with_lifetime(mut self, minutes: u32) -> Self {
        self.lifetime = minutes;
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }

    pub fn properties(&self) -> &PropertyBag {
        &self.props
    }

    // ------------------------------------------------------------------
    // Registro de llamadas
    // ------------------------------------------------------------------

    /// Registra una operación validada. Caso especial: un `open` de
    /// archivo consulta el mtime ahora mismo y lo guarda como propiedad
    /// `modified`, para que un cambio en disco invalide el fingerprint
    /// aunque la ruta textual no cambie. Un source irresoluble es fatal
    /// aquí: la llamada no se registra.
    pub fn record(&mut self, op: ImageOp) -> Result<&mut Self, CoreCacheError> {
        op.validate()?;
        if let ImageOp::Open { source } = &op {
            if let Some(path) = source.as_path() {
                let mtime = self.resolver.last_modified(path)?;
                self.props.set("modified", mtime);
            }
        }
        log::debug!("session {}: record {}", self.session_id, op.name());
        self.calls.append(op);
        Ok(self)
    }

    /// Registra una secuencia (p.ej. un preset de template).
    pub fn record_all(&mut self, ops: impl IntoIterator<Item = ImageOp>) -> Result<&mut Self, CoreCacheError> {
        for op in ops {
            self.record(op)?;
        }
        Ok(self)
    }

    pub fn open(&mut self, path: SourcePath) -> Result<&mut Self, CoreCacheError> {
        self.record(ImageOp::Open { source: ImageSource::Path(path) })
    }

    /// Abre contenido binario en memoria (no pasa por el filesystem).
    pub fn open_bytes(&mut self, data: Vec<u8>) -> Result<&mut Self, CoreCacheError> {
        let source = ImageSource::bytes(data)?;
        self.record(ImageOp::Open { source })
    }

    pub fn canvas(&mut self, width: u32, height: u32, background: Option<String>) -> Result<&mut Self, CoreCacheError> {
        self.record(ImageOp::Canvas { width, height, background })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<&mut Self, CoreCacheError> {
        self.record(ImageOp::Resize { width, height })
    }

    pub fn fit(&mut self, width: u32, height: u32) -> Result<&mut Self, CoreCacheError> {
        self.record(ImageOp::Fit { width, height })
    }

    pub fn crop(&mut self, width: u32, height: u32, x: i32, y: i32) -> Result<&mut Self, CoreCacheError> {
        self.record(ImageOp::Crop { width, height, x, y })
    }

    pub fn blur(&mut self, sigma: f32) -> Result<&mut Self, CoreCacheError> {
        self.record(ImageOp::Blur { sigma })
    }

    pub fn brightness(&mut self, level: i32) -> Result<&mut Self, CoreCacheError> {
        self.record(ImageOp::Brightness { level })
    }

    pub fn contrast(&mut self, level: i32) -> Result<&mut Self, CoreCacheError> {
        self.record(ImageOp::Contrast { level })
    }

    pub fn rotate(&mut self, degrees: f32) -> Result<&mut Self, CoreCacheError> {
        self.record(ImageOp::Rotate { degrees })
    }

    pub fn flip(&mut self, axis: FlipAxis) -> Result<&mut Self, CoreCacheError> {
        self.record(ImageOp::Flip { axis })
    }

    pub fn greyscale(&mut self) -> Result<&mut Self, CoreCacheError> {
        self.record(ImageOp::Greyscale)
    }

    pub fn text(&mut self,
                content: impl Into<String>,
                x: i32,
                y: i32,
                font: Option<TransformDescriptor>)
                -> Result<&mut Self, CoreCacheError> {
        self.record(ImageOp::Text { content: content.into(), x, y, font })
    }

    pub fn filter(&mut self, transform: TransformDescriptor) -> Result<&mut Self, CoreCacheError> {
        self.record(ImageOp::Filter { transform })
    }

    pub fn encode_as(&mut self, format: EncodeFormat, quality: Option<u8>) -> Result<&mut Self, CoreCacheError> {
        self.record(ImageOp::Encode { format, quality })
    }

    /// Propiedad auxiliar de sesión. Última escritura gana.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.props.set(key, value);
        self
    }

    // ------------------------------------------------------------------
    // Fingerprint / ejecución / cache
    // ------------------------------------------------------------------

    /// Fingerprint del estado actual (propiedades + llamadas). No muta
    /// la sesión; dos invocaciones seguidas devuelven lo mismo.
    pub fn fingerprint(&self) -> Result<Fingerprint, CoreCacheError> {
        fingerprint(&self.props, &self.calls)
    }

    /// Ejecuta el historial contra el engine y devuelve la imagen
    /// etiquetada. Tras un replay exitoso la sesión queda vacía
    /// (historial y propiedades), lista para descartar.
    pub fn process(&mut self) -> Result<CachedImage<E::Image>, CoreCacheError> {
        let key = self.fingerprint()?;
        self.process_with_key(key)
    }

    fn process_with_key(&mut self, key: Fingerprint) -> Result<CachedImage<E::Image>, CoreCacheError> {
        let surface = replay(&self.engine, &self.calls)?;
        self.calls.clear();
        self.props.clear();
        Ok(CachedImage::new(surface, key))
    }

    /// Bytes de la imagen, desde cache si hay entrada vigente. En miss:
    /// replay, encode (reusando bytes ya codificados si existen), put
    /// con el TTL dado y devolución de los bytes recién guardados.
    pub fn get(&mut self, lifetime: Option<u32>) -> Result<Vec<u8>, CoreCacheError> {
        let lifetime = lifetime.unwrap_or(self.lifetime);
        let key = self.fingerprint()?;

        if let Some(bytes) = self.gateway.get(&key)? {
            log::debug!("session {}: hit {}", self.session_id, key);
            return Ok(bytes);
        }

        log::debug!("session {}: miss {}", self.session_id, key);
        let image = self.process_with_key(key.clone())?;
        let bytes = image.to_bytes()?;
        self.gateway.put(&key, bytes.clone(), lifetime)?;
        Ok(bytes)
    }

    /// Variante objeto de `get`. En hit la imagen se reconstruye vía el
    /// decode del engine y queda etiquetada con el fingerprint; ver la
    /// limitación documentada en `CachedImage`.
    pub fn get_image(&mut self, lifetime: Option<u32>) -> Result<CachedImage<E::Image>, CoreCacheError> {
        let lifetime = lifetime.unwrap_or(self.lifetime);
        let key = self.fingerprint()?;

        if let Some(bytes) = self.gateway.get(&key)? {
            log::debug!("session {}: hit {} (decode)", self.session_id, key);
            let surface = self.engine.decode(&bytes)?;
            return Ok(CachedImage::new(surface, key));
        }

        log::debug!("session {}: miss {}", self.session_id, key);
        let image = self.process_with_key(key.clone())?;
        let bytes = image.to_bytes()?;
        self.gateway.put(&key, bytes, lifetime)?;
        Ok(image)
    }
}
