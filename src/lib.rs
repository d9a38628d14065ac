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

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod assertions;
mod domain;
mod error;
mod executor;
mod json_diff;
mod macros;

pub use assertions::{JsonAssert, ResponseAssert};
pub use domain::{Cookie, HttpMethod, HttpResponse, Request};
pub use error::AssertionError;
pub use executor::{capture, execute, fetch};
pub use json_diff::contains::contains;
pub use json_diff::kind::JsonType;
pub use json_diff::path::{JSONPath, Key, Path, PathError};
pub use json_diff::report::{aggregate, Literal, ToLiteral, LINE_SEPARATOR};
pub use json_diff::{compare, diff, filter, Comparison, Config, IgnoreSet, Mismatch};
