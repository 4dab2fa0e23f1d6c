//! Historial append-only de llamadas diferidas.
//!
//! Rol en la sesión:
//! - Cada método de grabación agrega una `ImageOp` al final; el orden de
//!   inserción determina tanto el orden de replay como el fingerprint.
//! - El log pertenece a una sola sesión; se vacía tras un `process`
//!   exitoso y nunca se comparte entre sesiones concurrentes.
use pix_domain::ImageOp;

#[derive(Debug, Default, Clone)]
pub struct CallLog {
    calls: Vec<ImageOp>,
}

impl CallLog {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    /// Agrega una llamada al final. Append puro, sin IO.
    pub fn append(&mut self, op: ImageOp) {
        self.calls.push(op);
    }

    /// Vacía el historial (reset de sesión tras process).
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn first(&self) -> Option<&ImageOp> {
        self.calls.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageOp> {
        self.calls.iter()
    }

    pub fn as_slice(&self) -> &[ImageOp] {
        &self.calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_insertion_order() {
        let mut log = CallLog::new();
        log.append(ImageOp::Resize { width: 300, height: 200 });
        log.append(ImageOp::Blur { sigma: 2.0 });
        log.append(ImageOp::Greyscale);
        let names: Vec<&str> = log.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["resize", "blur", "greyscale"]);
    }

    #[test]
    fn clear_empties_observably() {
        let mut log = CallLog::new();
        log.append(ImageOp::Greyscale);
        assert_eq!(log.len(), 1);
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }
}
