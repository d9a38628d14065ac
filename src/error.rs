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

use crate::json_diff::kind::JsonType;

/// Error type for failed assertions
#[derive(Debug, thiserror::Error)]
pub enum AssertionError {
    /// The actual document does not conform to the expected one
    #[error("{message}")]
    JsonMismatch { message: String },

    #[error("Expecting json to contain entry \"{key}\"")]
    MissingEntry { key: String },

    #[error("Expecting json to be {expected} but was {actual}")]
    UnexpectedType { expected: JsonType, actual: JsonType },

    /// Text handed to an assertion was not valid JSON
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },

    #[error("Expecting response to have a body")]
    MissingBody,

    #[error("Expecting response status to be {expected} but was {actual}")]
    StatusMismatch { expected: u16, actual: u16 },

    #[error("Expecting response status to be successful but was {actual}")]
    NotSuccessful { actual: u16 },

    #[error("Expecting response to have header \"{name}\"")]
    MissingHeader { name: String },

    #[error("Expecting header \"{name}\" to be equal to \"{expected}\" but was {actual:?}")]
    HeaderMismatch {
        name: String,
        expected: String,
        actual: Vec<String>,
    },

    #[error("Expecting response to have cookie \"{name}\"")]
    MissingCookie { name: String },

    #[error("Expecting cookie \"{name}\" to be equal to \"{expected}\" but was \"{actual}\"")]
    CookieMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    /// The HTTP client failed before a response could be captured
    #[error("error executing request: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },
}
