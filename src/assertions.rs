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

use log::debug;
use serde_json::Value;
use std::borrow::Cow;

use crate::domain::HttpResponse;
use crate::error::AssertionError;
use crate::json_diff::{compare, contains, kind::JsonType, Config};

/// Assertions on a JSON document.
///
/// Every assertion returns `Ok(&Self)` so they can be chained with `?`.
///
/// # Examples
///
/// ```
/// use http_json_assert::JsonAssert;
/// use serde_json::json;
///
/// let actual = json!({ "id": 7, "name": "John", "age": 30 });
/// let json = JsonAssert::new(&actual);
/// let result = json
///     .is_equal_to(&json!({ "name": "John" }))
///     .and_then(|json| json.contains("$.id"));
/// assert!(result.is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct JsonAssert<'a> {
    actual: Cow<'a, Value>,
}

impl<'a> JsonAssert<'a> {
    pub fn new(actual: &'a Value) -> Self {
        Self {
            actual: Cow::Borrowed(actual),
        }
    }

    /// Parses `actual` and asserts on the resulting document.
    pub fn parse(actual: &str) -> Result<JsonAssert<'static>, AssertionError> {
        Ok(JsonAssert {
            actual: Cow::Owned(serde_json::from_str(actual)?),
        })
    }

    pub fn actual(&self) -> &Value {
        &self.actual
    }

    /// Asserts that every entry of `expected` is present and equal in the actual
    /// document. Entries only present in the actual document are accepted.
    pub fn is_equal_to(&self, expected: &Value) -> Result<&Self, AssertionError> {
        self.is_equal_with(expected, &Config::new())
    }

    /// Like [`is_equal_to`](Self::is_equal_to), parsing `expected` first.
    pub fn is_equal_to_str(&self, expected: &str) -> Result<&Self, AssertionError> {
        let expected: Value = serde_json::from_str(expected)?;
        self.is_equal_to(&expected)
    }

    /// Like [`is_equal_to`](Self::is_equal_to), but mismatches whose path is
    /// exactly one of `ignored` (e.g. `id`, `items[0]`, `user.name`) are dropped.
    pub fn is_equal_to_ignoring<I, S>(
        &self,
        expected: &Value,
        ignored: I,
    ) -> Result<&Self, AssertionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.is_equal_with(expected, &Config::new().ignore_paths(ignored))
    }

    pub fn is_equal_with(
        &self,
        expected: &Value,
        config: &Config,
    ) -> Result<&Self, AssertionError> {
        compare(expected, &self.actual, config).into_result()?;
        Ok(self)
    }

    /// Asserts that `key` is a top-level key, or that the `$`-anchored path
    /// `key` resolves inside the document.
    pub fn contains(&self, key: &str) -> Result<&Self, AssertionError> {
        if contains::contains(&self.actual, key) {
            Ok(self)
        } else {
            debug!("json entry \"{}\" not found", key);
            Err(AssertionError::MissingEntry {
                key: key.to_string(),
            })
        }
    }

    pub fn is_of_type(&self, expected: JsonType) -> Result<&Self, AssertionError> {
        let actual = JsonType::of(&self.actual);
        if actual == expected {
            Ok(self)
        } else {
            Err(AssertionError::UnexpectedType { expected, actual })
        }
    }

    pub fn is_object(&self) -> Result<&Self, AssertionError> {
        self.is_of_type(JsonType::Object)
    }

    pub fn is_array(&self) -> Result<&Self, AssertionError> {
        self.is_of_type(JsonType::Array)
    }
}

/// Assertions on a captured [`HttpResponse`].
///
/// # Examples
///
/// ```
/// use http_json_assert::{HttpResponse, ResponseAssert};
/// use serde_json::json;
///
/// let response = HttpResponse::new(200)
///     .with_header("Content-Type", "application/json")
///     .with_body(r#"{"id": 1, "name": "John Doe"}"#);
///
/// let assert = ResponseAssert::new(&response);
/// let result = assert
///     .has_status(200)
///     .and_then(|r| r.has_header_value("content-type", "application/json"))
///     .and_then(|r| r.has_json_body_equal_to_ignoring(&json!({ "id": 2, "name": "John Doe" }), ["id"]));
/// assert!(result.is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ResponseAssert<'a> {
    response: &'a HttpResponse,
}

impl<'a> ResponseAssert<'a> {
    pub fn new(response: &'a HttpResponse) -> Self {
        Self { response }
    }

    pub fn has_status(&self, expected: u16) -> Result<&Self, AssertionError> {
        if self.response.status == expected {
            Ok(self)
        } else {
            Err(AssertionError::StatusMismatch {
                expected,
                actual: self.response.status,
            })
        }
    }

    /// Asserts a 2xx status.
    pub fn is_success(&self) -> Result<&Self, AssertionError> {
        if (200..300).contains(&self.response.status) {
            Ok(self)
        } else {
            Err(AssertionError::NotSuccessful {
                actual: self.response.status,
            })
        }
    }

    pub fn has_header(&self, name: &str) -> Result<&Self, AssertionError> {
        match self.response.header(name) {
            Some(_) => Ok(self),
            None => Err(AssertionError::MissingHeader {
                name: name.to_string(),
            }),
        }
    }

    /// Asserts that one of the values of header `name` equals `expected`.
    pub fn has_header_value(&self, name: &str, expected: &str) -> Result<&Self, AssertionError> {
        let values = self.response.header_values(name);
        if values.is_empty() {
            return Err(AssertionError::MissingHeader {
                name: name.to_string(),
            });
        }

        if values.contains(&expected) {
            Ok(self)
        } else {
            Err(AssertionError::HeaderMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                actual: values.into_iter().map(str::to_string).collect(),
            })
        }
    }

    pub fn has_cookie(&self, name: &str) -> Result<&Self, AssertionError> {
        match self.response.cookie(name) {
            Some(_) => Ok(self),
            None => Err(AssertionError::MissingCookie {
                name: name.to_string(),
            }),
        }
    }

    pub fn has_cookie_value(&self, name: &str, expected: &str) -> Result<&Self, AssertionError> {
        let cookie = self
            .response
            .cookie(name)
            .ok_or_else(|| AssertionError::MissingCookie {
                name: name.to_string(),
            })?;

        if cookie.value == expected {
            Ok(self)
        } else {
            Err(AssertionError::CookieMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                actual: cookie.value.clone(),
            })
        }
    }

    /// Parses the body and hands it over to [`JsonAssert`].
    pub fn json_body(&self) -> Result<JsonAssert<'static>, AssertionError> {
        let body = self
            .response
            .body
            .as_deref()
            .ok_or(AssertionError::MissingBody)?;
        JsonAssert::parse(body)
    }

    pub fn has_json_body_equal_to(&self, expected: &Value) -> Result<&Self, AssertionError> {
        self.json_body()?.is_equal_to(expected)?;
        Ok(self)
    }

    pub fn has_json_body_equal_to_ignoring<I, S>(
        &self,
        expected: &Value,
        ignored: I,
    ) -> Result<&Self, AssertionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.json_body()?.is_equal_to_ignoring(expected, ignored)?;
        Ok(self)
    }

    pub fn has_json_entry(&self, key: &str) -> Result<&Self, AssertionError> {
        self.json_body()?.contains(key)?;
        Ok(self)
    }
}
