//! pixcache-rust: fachada del workspace.
//!
//! Reexporta la superficie pública de los crates miembros para que un
//! consumidor arme una sesión sin depender de cada crate por separado:
//! vocabulario (`pix-domain`), sesión y contratos (`pix-core`), engine
//! sintético y templates (`pix-adapters`), store de archivos y
//! configuración (`pix-persistence`).

pub use pix_domain::{DomainError, EncodeFormat, FlipAxis, ImageOp, ImageSource, OpKind, SourcePath,
                     TransformDescriptor};

pub use pix_core::{fingerprint, replay, CacheGateway, CacheSession, CachedImage, CallLog, CoreCacheError,
                   Fingerprint, GatewayError, ImageEngine, ImageSurface, InMemoryCacheGateway, PropertyBag,
                   SourceResolver};

pub use pix_adapters::{CountingEngine, SketchEngine, SketchImage, TemplateRegistry};

pub use pix_persistence::{file_gateway_from_config, init_dotenv, resolver_from_config, FileCacheGateway,
                          PersistenceError, CONFIG};
