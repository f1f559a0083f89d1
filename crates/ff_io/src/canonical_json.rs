//! Canonical JSON byte representation.
//!
//! - Objects: keys sorted lexicographically (UTF-8 codepoint order).
//! - Arrays: order preserved (callers are responsible for stable ordering).
//! - Output: compact, no extra whitespace, no trailing newline.
//!
//! Used to give a `Snapshot`'s JSON form a single canonical byte sequence —
//! useful for hashing or diffing two snapshots. This crate has no file I/O:
//! persistence is a caller concern (spec.md §1 Non-goals).

use serde_json::Value;

pub fn to_canonical_bytes(v: &Value) -> Vec<u8> {
    let mut out = Vec::with_capacity(256);
    write_canonical_value(v, &mut out);
    out
}

fn write_canonical_value(v: &Value, out: &mut Vec<u8>) {
    match v {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(b) => out.extend_from_slice(if *b { b"true" } else { b"false" }),
        Value::Number(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::String(s) => {
            let quoted = serde_json::to_string(s).expect("string serialization cannot fail");
            out.extend_from_slice(quoted.as_bytes());
        }
        Value::Array(arr) => {
            out.push(b'[');
            for (i, elem) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical_value(elem, out);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            out.push(b'{');
            let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
            keys.sort_unstable();
            for (i, k) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                let quoted_key = serde_json::to_string(k).expect("key serialization cannot fail");
                out.extend_from_slice(quoted_key.as_bytes());
                out.push(b':');
                write_canonical_value(&map[k], out);
            }
            out.push(b'}');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn objects_are_sorted_arrays_preserved() {
        let v = json!({
            "b": 1,
            "a": { "y": 1, "x": 2 },
            "arr": [ {"k":2,"j":1}, 3, "z" ]
        });
        let s = String::from_utf8(to_canonical_bytes(&v)).unwrap();
        assert_eq!(s, r#"{"a":{"x":2,"y":1},"arr":[{"j":1,"k":2},3,"z"],"b":1}"#);
    }

    #[test]
    fn no_trailing_newline() {
        let bytes = to_canonical_bytes(&json!({"a": 1}));
        assert!(!bytes.ends_with(b"\n"));
    }
}
