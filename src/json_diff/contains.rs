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

use super::path::{Key, Path};
use serde_json::Value;

const ROOT: &str = "$";

fn is_root_anchored(key: &str) -> bool {
    key == ROOT || key.starts_with("$.") || key.starts_with("$[")
}

/// Checks whether `key` names an entry of `document`.
///
/// A bare name (`id`, `$ref`) is looked up among the top-level keys only. A key
/// of the form `$`, `$.…` or `$[…]` (`$.user.name`, `$.items[0]`) is walked from
/// the root; a malformed path or a step that does not resolve yields `false`.
pub fn contains(document: &Value, key: &str) -> bool {
    if !is_root_anchored(key) {
        return document
            .as_object()
            .map_or(false, |map| map.contains_key(key));
    }

    match Path::from_jsonpath(key) {
        Ok(path) => extract_value(&path, document).is_some(),
        Err(_) => false,
    }
}

pub(crate) fn extract_value<'v>(path: &Path, value: &'v Value) -> Option<&'v Value> {
    let mut current = value;
    for key in path.keys() {
        current = match key {
            Key::Field(field) => current.as_object()?.get(*field)?,
            Key::Idx(index) => current.as_array()?.get(*index)?,
        };
    }
    Some(current)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contains_top_level() {
        let document = json!({ "id": 1, "name": "John Doe" });
        assert!(contains(&document, "id"));
        assert!(contains(&document, "name"));
        assert!(contains(&document, "$.id"));
        assert!(contains(&document, "$.name"));
        assert!(!contains(&document, "missing"));
        assert!(!contains(&document, "$.missing"));
    }

    #[test]
    fn test_bare_name_is_not_a_path() {
        let document = json!({ "user": { "name": "John" } });
        assert!(!contains(&document, "name"));
        assert!(!contains(&document, "user.name"));
        assert!(contains(&document, "$.user.name"));
    }

    #[test]
    fn test_contains_nested() {
        let document = json!({
            "user": { "name": "John", "tags": ["a", { "id": null }] }
        });
        assert!(contains(&document, "$.user"));
        assert!(contains(&document, "$.user.tags[0]"));
        assert!(contains(&document, "$.user.tags[1].id"));
        assert!(!contains(&document, "$.user.tags[2]"));
        assert!(!contains(&document, "$.user.name.first"));
        assert!(!contains(&document, "$.user[0]"));
        assert!(!contains(&document, "$.user.tags.id"));
    }

    #[test]
    fn test_contains_on_non_objects() {
        assert!(!contains(&json!([1, 2]), "id"));
        assert!(contains(&json!([1, 2]), "$[1]"));
        assert!(!contains(&json!("id"), "id"));
        assert!(contains(&json!(null), "$"));
    }

    #[test]
    fn test_malformed_path_is_false() {
        let document = json!({ "id": 1 });
        assert!(!contains(&document, "$."));
        assert!(!contains(&document, "$.id["));
        assert!(!contains(&document, "$..id"));
    }

    #[test]
    fn test_dollar_prefixed_names_are_keys() {
        let document = json!({ "$ref": "#/defs/a", "$schema": "draft-07", "id": 1 });
        assert!(contains(&document, "$ref"));
        assert!(contains(&document, "$schema"));
        assert!(!contains(&document, "$id"));
        assert!(contains(&document, "$.$ref"));
    }
}
