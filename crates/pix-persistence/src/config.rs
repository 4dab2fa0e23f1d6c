//! Configuración central del cache.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
//! También provee constructores de gateway y resolver basados en esa
//! configuración, para el binario y para quien no quiera armarlos a mano.
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

use crate::error::PersistenceError;
use crate::file_store::FileCacheGateway;
use pix_core::SourceResolver;

/// Configuración global del cache de imágenes.
pub struct CacheConfig {
    /// Directorio del store de archivos.
    pub storage_dir: PathBuf,
    /// TTL por defecto en minutos.
    pub lifetime_minutes: u32,
    /// Roots de búsqueda de archivos fuente, en orden.
    pub source_roots: Vec<PathBuf>,
    /// Imagen de reemplazo cuando un source no aparece (opcional).
    pub default_image: Option<PathBuf>,
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<CacheConfig> = Lazy::new(|| {
    let storage_dir = env::var("PIXCACHE_STORAGE_DIR").unwrap_or_else(|_| "storage/cache".into());
    let lifetime_minutes = env::var("PIXCACHE_LIFETIME_MINUTES").ok()
        .and_then(|v| v.parse().ok()).unwrap_or(43200);
    let source_roots = env::var("PIXCACHE_SOURCE_PATHS")
        .unwrap_or_else(|_| "public/upload:public/images".into())
        .split(':')
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect();
    let default_image = env::var("PIXCACHE_DEFAULT_IMAGE").ok().map(PathBuf::from);
    CacheConfig { storage_dir: PathBuf::from(storage_dir),
                  lifetime_minutes,
                  source_roots,
                  default_image }
});

/// Carga `.env` si existe (no falla si no hay archivo).
pub fn init_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Gateway de archivos apuntando al directorio configurado.
pub fn file_gateway_from_config() -> Result<FileCacheGateway, PersistenceError> {
    FileCacheGateway::new(CONFIG.storage_dir.clone())
}

/// Resolver de sources con los roots (y fallback) configurados.
pub fn resolver_from_config() -> SourceResolver {
    let resolver = SourceResolver::new(CONFIG.source_roots.clone());
    match &CONFIG.default_image {
        Some(path) => resolver.with_default_source(path.clone()),
        None => resolver,
    }
}
