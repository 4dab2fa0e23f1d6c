//! Wrapper de conteo de invocaciones del engine.
//!
//! Para tests de hit/miss: los contadores viven en `Rc` compartido, así
//! las copias del wrapper (una por sesión) reportan el mismo total.
use std::cell::RefCell;
use std::rc::Rc;

use pix_core::{CoreCacheError, ImageEngine};
use pix_domain::ImageOp;

#[derive(Debug, Clone)]
pub struct CountingEngine<E> {
    inner: E,
    bases: Rc<RefCell<usize>>,
    decodes: Rc<RefCell<usize>>,
}

impl<E> CountingEngine<E> {
    pub fn new(inner: E) -> Self {
        Self { inner,
               bases: Rc::new(RefCell::new(0)),
               decodes: Rc::new(RefCell::new(0)) }
    }

    /// Veces que se creó una superficie base (una por replay ejecutado).
    pub fn base_count(&self) -> usize {
        *self.bases.borrow()
    }

    /// Veces que se reconstruyó desde bytes cacheados.
    pub fn decode_count(&self) -> usize {
        *self.decodes.borrow()
    }
}

impl<E: ImageEngine> ImageEngine for CountingEngine<E> {
    type Image = E::Image;

    fn make_base(&self, source_call: &ImageOp) -> Result<Self::Image, CoreCacheError> {
        *self.bases.borrow_mut() += 1;
        self.inner.make_base(source_call)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Self::Image, CoreCacheError> {
        *self.decodes.borrow_mut() += 1;
        self.inner.decode(bytes)
    }
}
