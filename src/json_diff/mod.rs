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

pub mod contains;
pub mod kind;
pub mod path;
pub mod report;

use kind::JsonType;
use log::{debug, trace};
use path::{Key, Path};
use report::{ToLiteral, LINE_SEPARATOR};
use serde_json::Value;
use std::{collections::HashSet, fmt};

use crate::error::AssertionError;

/// Exact rendered paths whose mismatches are dropped from a report.
///
/// Matching is plain string equality: ignoring `user` keeps `user.name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet(HashSet<String>);

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>) {
        self.0.insert(path.into());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Configuration for how JSON values should be compared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub(crate) ignore: IgnoreSet,
}

impl Config {
    /// Create a new [`Config`] that reports every mismatch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path to the set of paths to ignore.
    pub fn ignore_path(mut self, path: impl Into<String>) -> Self {
        self.ignore.insert(path);
        self
    }

    /// Add several paths to the set of paths to ignore.
    pub fn ignore_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for path in paths {
            self.ignore.insert(path);
        }
        self
    }
}

/// A single divergence between the expected and the actual document.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch<'a> {
    path: Path<'a>,
    expected: &'a Value,
    actual: Option<&'a Value>,
}

static NULL: Value = Value::Null;

impl<'a> Mismatch<'a> {
    pub fn path(&self) -> &Path<'a> {
        &self.path
    }

    pub fn expected(&self) -> &'a Value {
        self.expected
    }

    /// The actual value, `null` when the entry is absent from the actual document.
    pub fn actual(&self) -> &'a Value {
        self.actual.unwrap_or(&NULL)
    }

    pub fn is_missing(&self) -> bool {
        self.actual.is_none()
    }
}

impl<'a> fmt::Display for Mismatch<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Expecting json entry \"{}\" to be equal to {} but was {}",
            self.path,
            self.expected.literal(),
            self.actual().literal()
        )
    }
}

/// Outcome of one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Success,
    /// One rendered message per mismatch, in document order.
    Failure(Vec<String>),
}

impl Comparison {
    pub fn is_success(&self) -> bool {
        matches!(self, Comparison::Success)
    }

    /// The aggregated failure text, `None` on success.
    pub fn message(&self) -> Option<String> {
        match self {
            Comparison::Success => None,
            Comparison::Failure(lines) => Some(lines.join(LINE_SEPARATOR)),
        }
    }

    pub fn into_result(self) -> Result<(), AssertionError> {
        match self.message() {
            None => Ok(()),
            Some(message) => Err(AssertionError::JsonMismatch { message }),
        }
    }
}

/// Diffs `actual` against `expected`, drops ignored paths and renders what is left.
pub fn compare(expected: &Value, actual: &Value, config: &Config) -> Comparison {
    let mismatches = filter(diff(expected, actual), &config.ignore);

    debug!(
        "json comparison finished with {} mismatch(es) ({} path(s) ignored)",
        mismatches.len(),
        config.ignore.len()
    );

    if mismatches.is_empty() {
        Comparison::Success
    } else {
        Comparison::Failure(mismatches.iter().map(ToString::to_string).collect())
    }
}

/// Walks `expected` and reports every place where `actual` does not conform to it.
///
/// Only the shape of `expected` is visited: keys and elements present solely in
/// `actual` are never reported. Mismatches come out in depth-first document order.
pub fn diff<'a>(expected: &'a Value, actual: &'a Value) -> Vec<Mismatch<'a>> {
    let mut acc = vec![];
    let mut stack = vec![Frame {
        expected,
        actual: Some(actual),
        path: Path::Root,
    }];

    while let Some(frame) = stack.pop() {
        frame.visit(&mut stack, &mut acc);
    }

    acc
}

/// Keeps the mismatches whose rendered path is not in `ignore`, preserving order.
pub fn filter<'a>(mismatches: Vec<Mismatch<'a>>, ignore: &IgnoreSet) -> Vec<Mismatch<'a>> {
    if ignore.is_empty() {
        return mismatches;
    }

    mismatches
        .into_iter()
        .filter(|mismatch| !ignore.contains(&mismatch.path.to_string()))
        .collect()
}

struct Frame<'a> {
    expected: &'a Value,
    actual: Option<&'a Value>,
    path: Path<'a>,
}

impl<'a> Frame<'a> {
    fn visit(self, stack: &mut Vec<Frame<'a>>, acc: &mut Vec<Mismatch<'a>>) {
        let Some(actual) = self.actual else {
            trace!("json entry \"{}\" is missing from actual", self.path);
            return self.record(acc);
        };

        let expected_type = JsonType::of(self.expected);
        let actual_type = JsonType::of(actual);
        if expected_type != actual_type {
            trace!(
                "json entry \"{}\" should be {} but was {}",
                self.path,
                expected_type,
                actual_type
            );
            return self.record(acc);
        }

        match (self.expected, actual) {
            (Value::Object(expected), Value::Object(actual)) => {
                // reversed so that popping yields declaration order
                for (key, expected) in expected.iter().rev() {
                    stack.push(Frame {
                        expected,
                        actual: actual.get(key),
                        path: self.path.append(Key::Field(key.as_str())),
                    });
                }
            }
            (Value::Array(expected), Value::Array(actual)) => {
                for (idx, expected) in expected.iter().enumerate().rev() {
                    stack.push(Frame {
                        expected,
                        actual: actual.get(idx),
                        path: self.path.append(Key::Idx(idx)),
                    });
                }
            }
            (Value::Number(expected), Value::Number(actual)) => {
                if expected.as_f64() != actual.as_f64() {
                    self.record(acc);
                }
            }
            (Value::Null, Value::Null) => {}
            (expected, actual) => {
                if expected != actual {
                    self.record(acc);
                }
            }
        }
    }

    fn record(self, acc: &mut Vec<Mismatch<'a>>) {
        acc.push(Mismatch {
            path: self.path,
            expected: self.expected,
            actual: self.actual,
        });
    }
}
