//! Gateway de cache clave→bytes con TTL.
//!
//! Colaborador externo compartido entre sesiones concurrentes. El core
//! no reintenta: un fallo del backend se propaga tal cual. Tampoco hay
//! garantía de ejecución única ante misses simultáneos de la misma
//! clave: ambos procesan y el último put gana (tradeoff aceptado; un
//! marcador in-flight por fingerprint sería la extensión natural).
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use thiserror::Error;

use crate::fingerprint::Fingerprint;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GatewayError {
    #[error("backend: {0}")] Backend(String),
    #[error("io: {0}")] Io(String),
}

/// Almacenamiento clave→bytes con expiración en minutos.
pub trait CacheGateway {
    /// Devuelve los bytes guardados bajo la clave, o `None` si no hay
    /// entrada vigente.
    fn get(&mut self, key: &Fingerprint) -> Result<Option<Vec<u8>>, GatewayError>;
    /// Guarda bytes bajo la clave con el TTL dado.
    fn put(&mut self, key: &Fingerprint, value: Vec<u8>, ttl_minutes: u32) -> Result<(), GatewayError>;
}

/// Una sesión puede prestar un gateway compartido en vez de poseerlo.
impl<G: CacheGateway + ?Sized> CacheGateway for &mut G {
    fn get(&mut self, key: &Fingerprint) -> Result<Option<Vec<u8>>, GatewayError> {
        (**self).get(key)
    }
    fn put(&mut self, key: &Fingerprint, value: Vec<u8>, ttl_minutes: u32) -> Result<(), GatewayError> {
        (**self).put(key, value, ttl_minutes)
    }
}

#[derive(Debug)]
pub struct InMemoryCacheGateway {
    pub inner: HashMap<String, (Vec<u8>, DateTime<Utc>)>,
}

impl Default for InMemoryCacheGateway {
    fn default() -> Self {
        Self { inner: HashMap::new() }
    }
}

impl InMemoryCacheGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl CacheGateway for InMemoryCacheGateway {
    fn get(&mut self, key: &Fingerprint) -> Result<Option<Vec<u8>>, GatewayError> {
        // Expiración perezosa: la entrada vencida se elimina al leer.
        match self.inner.get(key.as_str()) {
            Some((_, expires)) if *expires <= Utc::now() => {
                self.inner.remove(key.as_str());
                Ok(None)
            }
            Some((bytes, _)) => Ok(Some(bytes.clone())),
            None => Ok(None),
        }
    }

    fn put(&mut self, key: &Fingerprint, value: Vec<u8>, ttl_minutes: u32) -> Result<(), GatewayError> {
        let expires = Utc::now() + Duration::minutes(i64::from(ttl_minutes));
        self.inner.insert(key.as_str().to_string(), (value, expires));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Fingerprint {
        Fingerprint::from_raw(s)
    }

    #[test]
    fn put_then_get_roundtrip() {
        let mut gw = InMemoryCacheGateway::new();
        let k = key("abc");
        gw.put(&k, b"imagedata".to_vec(), 12).unwrap();
        assert_eq!(gw.get(&k).unwrap(), Some(b"imagedata".to_vec()));
    }

    #[test]
    fn missing_key_is_none() {
        let mut gw = InMemoryCacheGateway::new();
        assert_eq!(gw.get(&key("missing")).unwrap(), None);
    }

    #[test]
    fn expired_entry_removed_on_get() {
        let mut gw = InMemoryCacheGateway::new();
        let k = key("old");
        // TTL 0: vencida en el momento de leer.
        gw.put(&k, b"x".to_vec(), 0).unwrap();
        assert_eq!(gw.get(&k).unwrap(), None);
        assert!(gw.is_empty());
    }

    #[test]
    fn last_put_wins() {
        let mut gw = InMemoryCacheGateway::new();
        let k = key("dup");
        gw.put(&k, b"first".to_vec(), 5).unwrap();
        gw.put(&k, b"second".to_vec(), 5).unwrap();
        assert_eq!(gw.get(&k).unwrap(), Some(b"second".to_vec()));
    }
}
