//! Bolsa de propiedades auxiliares de la sesión.
//!
//! Pares clave→valor que influyen en el fingerprint sin ser llamadas
//! (p.ej. `modified`, el mtime del archivo fuente). El backing es un
//! `BTreeMap`: la serialización queda ordenada por clave sin paso de
//! normalización aparte.
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct PropertyBag {
    entries: BTreeMap<String, Value>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Define una propiedad. Última escritura gana, nunca duplica.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Vista ordenada por clave (orden canónico de serialización).
    pub fn entries(&self) -> &BTreeMap<String, Value> {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_overwrites_instead_of_duplicating() {
        let mut bag = PropertyBag::new();
        bag.set("foo", "bar").set("foo", "baz");
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.get("foo"), Some(&json!("baz")));
    }

    #[test]
    fn entries_iterate_in_key_order() {
        let mut bag = PropertyBag::new();
        bag.set("zeta", 1).set("alpha", 2).set("mid", 3);
        let keys: Vec<&str> = bag.entries().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn clear_empties() {
        let mut bag = PropertyBag::new();
        bag.set("modified", 1700000000i64);
        bag.clear();
        assert!(bag.is_empty());
    }
}
