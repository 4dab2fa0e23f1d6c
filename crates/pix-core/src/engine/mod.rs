//! Motor de la sesión de cache: contratos del engine de imagen, replay
//! del historial y orquestador get/process.

pub mod contract;
pub mod replay;
pub mod result;
pub mod session;

pub use contract::{ImageEngine, ImageSurface};
pub use replay::replay;
pub use result::CachedImage;
pub use session::CacheSession;
