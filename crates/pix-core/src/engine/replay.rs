//! Replay: aplicación secuencial del historial sobre el engine.
use crate::call::CallLog;
use crate::engine::contract::{ImageEngine, ImageSurface};
use crate::errors::CoreCacheError;
use pix_domain::OpKind;

/// Ejecuta el historial como fold izquierdo estricto: la primera llamada
/// (obligatoriamente Source) crea la base; cada llamada siguiente recibe
/// la salida de la anterior. Stop-on-failure: el primer error corta el
/// replay y se propaga sin resultado parcial.
pub fn replay<E: ImageEngine>(engine: &E, log: &CallLog) -> Result<E::Image, CoreCacheError> {
    let first = log.first().ok_or(CoreCacheError::EmptyCallLog)?;
    if first.kind() != OpKind::Source {
        return Err(CoreCacheError::FirstCallMustBeSource);
    }
    let mut surface = engine.make_base(first)?;
    for op in log.iter().skip(1) {
        surface = surface.apply(op)?;
    }
    Ok(surface)
}
