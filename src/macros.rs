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

/// Panics with the full mismatch report unless `actual` contains every entry of
/// `expected`.
///
/// # Examples
///
/// ```
/// use http_json_assert::assert_json_eq;
/// use serde_json::json;
///
/// assert_json_eq!(json!({ "id": 1, "name": "John" }), json!({ "id": 1.0 }));
/// ```
///
/// ```should_panic
/// use http_json_assert::assert_json_eq;
/// use serde_json::json;
///
/// assert_json_eq!(json!({ "id": 1 }), json!({ "id": 2 }));
/// ```
#[macro_export]
macro_rules! assert_json_eq {
    ($actual:expr, $expected:expr $(,)?) => {
        if let Some(message) =
            $crate::compare(&$expected, &$actual, &$crate::Config::new()).message()
        {
            panic!("{}", message);
        }
    };
}

/// Like [`assert_json_eq!`], dropping mismatches at the exact paths listed in
/// `ignored`.
///
/// # Examples
///
/// ```
/// use http_json_assert::assert_json_eq_ignoring;
/// use serde_json::json;
///
/// assert_json_eq_ignoring!(
///     json!({ "id": 42, "name": "John" }),
///     json!({ "id": 1, "name": "John" }),
///     ["id"]
/// );
/// ```
#[macro_export]
macro_rules! assert_json_eq_ignoring {
    ($actual:expr, $expected:expr, $ignored:expr $(,)?) => {
        if let Some(message) = $crate::compare(
            &$expected,
            &$actual,
            &$crate::Config::new().ignore_paths($ignored),
        )
        .message()
        {
            panic!("{}", message);
        }
    };
}

/// Panics unless `key` (a top-level name or a `$`-anchored path) exists in `actual`.
#[macro_export]
macro_rules! assert_json_contains {
    ($actual:expr, $key:expr $(,)?) => {
        if !$crate::contains(&$actual, $key) {
            panic!(
                "{}",
                $crate::AssertionError::MissingEntry {
                    key: ::std::string::ToString::to_string($key),
                }
            );
        }
    };
}
