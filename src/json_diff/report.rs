// Copyright 2024 The DocAssert Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::Mismatch;
use serde_json::{Number, Value};
use std::fmt;

/// Compact JSON rendering of a value where integral numbers lose their
/// fractional part, so `1.0` and `1` both render as `1`.
pub struct Literal<'a>(pub &'a Value);

pub trait ToLiteral {
    fn literal(&self) -> Literal<'_>;
}

impl ToLiteral for Value {
    fn literal(&self) -> Literal<'_> {
        Literal(self)
    }
}

impl<'a> fmt::Display for Literal<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write_number(f, n),
            Value::String(s) => write_string(f, s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item.literal())?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (idx, (key, value)) in map.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }
                    write_string(f, key)?;
                    write!(f, ":{}", value.literal())?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_number(f: &mut fmt::Formatter, n: &Number) -> fmt::Result {
    match n.as_f64() {
        Some(float) if n.is_f64() => write!(f, "{}", float),
        _ => write!(f, "{}", n),
    }
}

fn write_string(f: &mut fmt::Formatter, s: &str) -> fmt::Result {
    let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

/// Separates the rendered mismatches of one report.
pub const LINE_SEPARATOR: &str = ",\n";

/// Joins rendered mismatches into one message, one per line, every line but
/// the last ending in a comma.
///
/// Callers treat an empty list as success and never aggregate it.
pub fn aggregate(mismatches: &[Mismatch]) -> String {
    mismatches
        .iter()
        .map(|mismatch| mismatch.to_string())
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_scalars() {
        assert_eq!(json!(null).literal().to_string(), "null");
        assert_eq!(json!(true).literal().to_string(), "true");
        assert_eq!(json!(false).literal().to_string(), "false");
        assert_eq!(json!("foo").literal().to_string(), "\"foo\"");
        assert_eq!(json!("a\"b").literal().to_string(), "\"a\\\"b\"");
    }

    #[test]
    fn test_literal_numbers() {
        assert_eq!(json!(1).literal().to_string(), "1");
        assert_eq!(json!(-7).literal().to_string(), "-7");
        assert_eq!(json!(1.0).literal().to_string(), "1");
        assert_eq!(json!(2.0).literal().to_string(), "2");
        assert_eq!(json!(1.1).literal().to_string(), "1.1");
        assert_eq!(json!(0.25).literal().to_string(), "0.25");
    }

    #[test]
    fn test_literal_containers() {
        let value = json!({"name": "John", "tags": [1.0, 2.5, null], "nested": {"ok": true}});
        assert_eq!(
            value.literal().to_string(),
            r#"{"name":"John","tags":[1,2.5,null],"nested":{"ok":true}}"#
        );
        assert_eq!(json!([]).literal().to_string(), "[]");
        assert_eq!(json!({}).literal().to_string(), "{}");
    }
}
