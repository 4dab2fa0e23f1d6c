//! pix-core: sesión de cache de transformaciones diferidas
pub mod call;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod fingerprint;
pub mod fs;
pub mod gateway;
pub mod hashing;
pub mod props;
pub mod sanitize;

pub use call::CallLog;
pub use engine::{replay, CacheSession, CachedImage, ImageEngine, ImageSurface};
pub use errors::CoreCacheError;
pub use fingerprint::{fingerprint, Fingerprint, FingerprintInput};
pub use fs::SourceResolver;
pub use gateway::{CacheGateway, GatewayError, InMemoryCacheGateway};
pub use props::PropertyBag;
