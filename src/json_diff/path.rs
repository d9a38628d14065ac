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

use regex::Regex;
use std::fmt;

/// Location of a node inside a JSON document, relative to its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Path<'a> {
    Root,
    Keys(Vec<Key<'a>>),
}

/// A single step of a [`Path`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key<'a> {
    Idx(usize),
    Field(&'a str),
}

// We cannot implement FromStr for Path because it would confict with timelines
// https://stackoverflow.com/questions/28931515/how-do-i-implement-fromstr-with-a-concrete-lifetime
pub trait JSONPath {
    fn jsonpath(&self) -> Result<Path, PathError>;
}

impl JSONPath for str {
    fn jsonpath(&self) -> Result<Path, PathError> {
        Path::from_jsonpath(self)
    }
}

/// Returned when a root-anchored path expression cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid JSONPath {0:?}")]
pub struct PathError(pub String);

impl<'a> fmt::Display for Key<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Key::Idx(idx) => write!(f, "[{}]", idx),
            Key::Field(key) => write!(f, ".{}", key),
        }
    }
}

impl<'a> Path<'a> {
    pub(crate) fn append(&self, next: Key<'a>) -> Path<'a> {
        match self {
            Path::Root => Path::Keys(vec![next]),
            Path::Keys(list) => {
                let mut copy = list.clone();
                copy.push(next);
                Path::Keys(copy)
            }
        }
    }

    /// Parses `$`, `$.a`, `$.a.b[0]`, `$[1].a` into a [`Path`].
    pub fn from_jsonpath(jsonpath: &'a str) -> Result<Self, PathError> {
        let re = Regex::new(r"^\$(\[\d+\])*(\.[^.\[\]]+(\[\d+\])*)*$")
            .map_err(|e| PathError(e.to_string()))?;

        if !re.is_match(jsonpath) {
            return Err(PathError(jsonpath.to_string()));
        }

        if jsonpath == "$" {
            return Ok(Path::Root);
        }

        let mut keys = Vec::new();
        let segments: &'a str = &jsonpath[1..];

        for segment in segments.split('.') {
            let mut parts = segment.split('[');
            if let Some(field) = parts.next().filter(|field| !field.is_empty()) {
                keys.push(Key::Field(field));
            }
            for idx in parts {
                keys.push(Self::parse_index(idx, jsonpath)?);
            }
        }

        Ok(Path::Keys(keys))
    }

    fn parse_index(token: &str, jsonpath: &str) -> Result<Key<'a>, PathError> {
        token
            .trim_end_matches(']')
            .parse()
            .map(Key::Idx)
            .map_err(|_| PathError(jsonpath.to_string()))
    }

    pub fn keys(&self) -> &[Key<'a>] {
        match self {
            Path::Root => &[],
            Path::Keys(keys) => keys,
        }
    }
}

/// Renders `user.name`, `array[0]`, `[1].id`; the root renders as `""`.
impl<'a> fmt::Display for Path<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (position, key) in self.keys().iter().enumerate() {
            match key {
                Key::Field(field) if position == 0 => write!(f, "{}", field)?,
                key => write!(f, "{}", key)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_jsonpath() {
        let path: Path = "$.a.b.c".jsonpath().unwrap();
        assert_eq!(
            path,
            Path::Keys(vec![Key::Field("a"), Key::Field("b"), Key::Field("c"),])
        );

        let path = "$.a[0].b.c".jsonpath().unwrap();
        assert_eq!(
            path,
            Path::Keys(vec![
                Key::Field("a"),
                Key::Idx(0),
                Key::Field("b"),
                Key::Field("c"),
            ])
        );

        let path = "$.a[0][12].b".jsonpath().unwrap();
        assert_eq!(
            path,
            Path::Keys(vec![
                Key::Field("a"),
                Key::Idx(0),
                Key::Idx(12),
                Key::Field("b"),
            ])
        );

        let path = "$[1].id".jsonpath().unwrap();
        assert_eq!(path, Path::Keys(vec![Key::Idx(1), Key::Field("id")]));

        assert_eq!("$".jsonpath().unwrap(), Path::Root);
    }

    #[test]
    fn test_jsonpath_validation() {
        assert!("$.a.b.c".jsonpath().is_ok());
        assert!("$.user-name".jsonpath().is_ok());
        assert!(".a.b.c".jsonpath().is_err());
        assert!("$.a.b.c[".jsonpath().is_err());
        assert!("$.a.b.c[]".jsonpath().is_err());
        assert!("$.a..b".jsonpath().is_err());
        assert!("$.".jsonpath().is_err());
        assert!("id".jsonpath().is_err());
        assert!("".jsonpath().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Path::Root.to_string(), "");

        let path = Path::Root.append(Key::Field("array")).append(Key::Idx(0));
        assert_eq!(path.to_string(), "array[0]");

        let path = Path::Root
            .append(Key::Field("user"))
            .append(Key::Field("name"));
        assert_eq!(path.to_string(), "user.name");

        let path = Path::Root.append(Key::Idx(1)).append(Key::Field("id"));
        assert_eq!(path.to_string(), "[1].id");
    }
}
