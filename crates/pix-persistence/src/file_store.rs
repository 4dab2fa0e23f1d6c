//! Gateway de cache sobre el filesystem.
//!
//! Layout: `<dir>/<k0k1>/<k2k3>/<clave>` (sharding por los primeros
//! caracteres de la clave para no degradar el directorio raíz). Formato
//! de entrada: 10 dígitos de timestamp unix de expiración seguidos del
//! payload. La expiración es perezosa: una entrada vencida se borra al
//! leerla.
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;
use pix_core::{CacheGateway, Fingerprint, GatewayError};

/// Expiración máxima representable en el prefijo de 10 dígitos.
const FAR_FUTURE: i64 = 9_999_999_999;
const EXPIRY_WIDTH: usize = 10;

pub struct FileCacheGateway {
    dir: PathBuf,
}

impl FileCacheGateway {
    /// Abre (o crea) el directorio de cache.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &Fingerprint) -> PathBuf {
        let k = key.as_str();
        // Claves cortas (tests, claves ajenas) van sin sharding.
        if k.len() >= 4 {
            self.dir.join(&k[0..2]).join(&k[2..4]).join(k)
        } else {
            self.dir.join(k)
        }
    }

    fn read_entry(&self, path: &Path) -> Result<Option<Vec<u8>>, PersistenceError> {
        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if raw.len() < EXPIRY_WIDTH {
            return Err(PersistenceError::CorruptEntry(path.display().to_string()));
        }
        let (prefix, payload) = raw.split_at(EXPIRY_WIDTH);
        let expires: i64 = std::str::from_utf8(prefix)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| PersistenceError::CorruptEntry(path.display().to_string()))?;
        if expires <= Utc::now().timestamp() {
            log::debug!("expired cache entry {}", path.display());
            let _ = fs::remove_file(path);
            return Ok(None);
        }
        Ok(Some(payload.to_vec()))
    }

    fn write_entry(&self, path: &Path, value: &[u8], ttl_minutes: u32) -> Result<(), PersistenceError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let expires = Utc::now()
            .timestamp()
            .saturating_add(i64::from(ttl_minutes) * 60)
            .min(FAR_FUTURE);
        let mut contents = Vec::with_capacity(EXPIRY_WIDTH + value.len());
        contents.extend_from_slice(format!("{expires:010}").as_bytes());
        contents.extend_from_slice(value);
        fs::write(path, contents)?;
        Ok(())
    }
}

impl CacheGateway for FileCacheGateway {
    fn get(&mut self, key: &Fingerprint) -> Result<Option<Vec<u8>>, GatewayError> {
        let path = self.entry_path(key);
        match self.read_entry(&path) {
            Ok(hit) => Ok(hit),
            Err(PersistenceError::CorruptEntry(p)) => {
                // Entrada ilegible: se descarta y se reporta como miss
                // para que el caller regenere.
                log::warn!("discarding corrupt cache entry {p}");
                let _ = fs::remove_file(&path);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &Fingerprint, value: Vec<u8>, ttl_minutes: u32) -> Result<(), GatewayError> {
        let path = self.entry_path(key);
        self.write_entry(&path, &value, ttl_minutes)?;
        log::debug!("stored {} bytes under {}", value.len(), key);
        Ok(())
    }
}
