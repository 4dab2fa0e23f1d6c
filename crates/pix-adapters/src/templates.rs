//! Presets de manipulación por nombre.
//!
//! Equivalente declarativo de los templates de URL del sistema: un
//! nombre público mapea a una secuencia fija de operaciones que se
//! registra completa en la sesión. Presets incluidos: small (120x90),
//! medium (640x480) y large (1280x960), todos como `fit` que preserva
//! proporción.
use std::collections::BTreeMap;

use pix_domain::ImageOp;

pub fn small() -> Vec<ImageOp> {
    vec![ImageOp::Fit { width: 120, height: 90 }]
}

pub fn medium() -> Vec<ImageOp> {
    vec![ImageOp::Fit { width: 640, height: 480 }]
}

pub fn large() -> Vec<ImageOp> {
    vec![ImageOp::Fit { width: 1280, height: 960 }]
}

/// Registro nombre→preset. Un nombre desconocido devuelve `None` (el
/// caller decide si eso es 404 o error).
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, Vec<ImageOp>>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        let mut registry = Self { templates: BTreeMap::new() };
        registry.register("small", small());
        registry.register("medium", medium());
        registry.register("large", large());
        registry
    }
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra o reemplaza un preset.
    pub fn register(&mut self, name: impl Into<String>, ops: Vec<ImageOp>) -> &mut Self {
        self.templates.insert(name.into(), ops);
        self
    }

    pub fn get(&self, name: &str) -> Option<&[ImageOp]> {
        self.templates.get(name).map(|ops| ops.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(|k| k.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_standard_presets() {
        let registry = TemplateRegistry::new();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["large", "medium", "small"]);
        assert_eq!(registry.get("small").unwrap(), &small()[..]);
    }

    #[test]
    fn unknown_template_is_none() {
        assert!(TemplateRegistry::new().get("huge").is_none());
    }

    #[test]
    fn custom_preset_replaces_existing() {
        let mut registry = TemplateRegistry::new();
        registry.register("small", vec![ImageOp::Fit { width: 64, height: 64 }]);
        assert_eq!(registry.get("small").unwrap(), &[ImageOp::Fit { width: 64, height: 64 }]);
    }
}
