//! Constantes del core de cache.
//!
//! Valores estáticos que participan en el cálculo de fingerprints. La
//! fórmula histórica tuvo variantes incompatibles (solo llamadas vs.
//! llamadas + propiedades); la fórmula canónica actual incluye ambas y
//! se versiona aquí para que un cambio futuro nunca colisione con claves
//! viejas: versión distinta implica clave distinta por construcción.

/// Versión lógica de la fórmula de fingerprint. Entra al
/// `FingerprintInput`, de modo que subirla invalida todas las claves de
/// cache existentes de forma determinista. Mantener estable mientras la
/// serialización canónica no cambie.
pub const FORMULA_VERSION: &str = "v1.0";

/// TTL por defecto (minutos) cuando `get` no recibe uno explícito.
pub const DEFAULT_LIFETIME_MINUTES: u32 = 5;
