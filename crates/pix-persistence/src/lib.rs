//! pix-persistence
//!
//! Backend durable del `CacheGateway`: un almacén de archivos con
//! expiración embebida en la entrada, más la carga de configuración
//! desde `.env`. Es el store por defecto cuando no se inyecta otro.
//!
//! Módulos:
//! - `file_store`: gateway sobre el filesystem (layout sharded por
//!   prefijo de clave, expiry como prefijo de 10 dígitos).
//! - `config`: carga de configuración desde .env.

pub mod config;
pub mod error;
pub mod file_store;

pub use config::{file_gateway_from_config, init_dotenv, resolver_from_config, CacheConfig, CONFIG};
pub use error::PersistenceError;
pub use file_store::FileCacheGateway;
