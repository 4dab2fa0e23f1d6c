//! Serialización JSON canónica: claves de objeto en orden lexicográfico,
//! arrays en el orden dado, sin whitespace. Es la representación estable
//! sobre la que se hashea; cualquier cambio aquí invalida claves de cache.

use serde_json::Value;

pub fn to_canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        // `Number::to_string` es determinista (representación mínima);
        // no-finitos no llegan aquí: serde_json no los representa.
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => push_escaped(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by_key(|(k, _)| *k);
            out.push('{');
            for (i, (k, v)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                push_escaped(k, out);
                out.push(':');
                write_canonical(v, out);
            }
            out.push('}');
        }
    }
}

fn push_escaped(s: &str, out: &mut String) {
    // serde_json escapa de forma estable; suficiente como forma canónica.
    out.push_str(&serde_json::to_string(s).expect("string serialization is infallible"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_keys_sorted() {
        let v = json!({"b": 2, "a": 1, "z": {"y": 0, "x": 1}});
        assert_eq!(to_canonical_json(&v), r#"{"a":1,"b":2,"z":{"x":1,"y":0}}"#);
    }

    #[test]
    fn array_order_preserved() {
        let v = json!([3, 1, 2]);
        assert_eq!(to_canonical_json(&v), "[3,1,2]");
    }

    #[test]
    fn key_order_in_input_is_irrelevant() {
        let a = json!({"w": 300, "h": 200});
        let b = json!({"h": 200, "w": 300});
        assert_eq!(to_canonical_json(&a), to_canonical_json(&b));
    }

    #[test]
    fn strings_escaped() {
        let v = json!({"k": "line\nbreak \"q\""});
        assert_eq!(to_canonical_json(&v), r#"{"k":"line\nbreak \"q\""}"#);
    }
}
