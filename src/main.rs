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

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::debug;
use serde_json::Value;

use http_json_assert::{
    compare, contains, fetch, AssertionError, Config, HttpResponse, ResponseAssert,
    LINE_SEPARATOR,
};

#[doc(hidden)]
#[macro_export]
macro_rules! handle_error {
    ($code:expr, $msg:expr, $($arg:tt)*) => {
        println!($msg, $($arg)*);
        std::process::exit($code);
    };

    ($code:expr, $msg:expr) => {
        println!($msg);
        std::process::exit($code);
    };
}

#[doc(hidden)]
struct Code;

impl Code {
    const SUCCESS: i32 = 0;
    const INTERNAL_ERROR: i32 = 1;
    const INVALID_ARGUMENT: i32 = 2;
    const JSON_PARSING_ERROR: i32 = 3;
    const ASSERTION_ERROR: i32 = 4;
}

#[doc(hidden)]
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
#[command(group(
    clap::ArgGroup::new("source")
        .required(true)
        .args(["actual", "url"]),
))]
struct Cli {
    /// JSON file with the expected document
    expected: PathBuf,

    /// JSON file with the actual document
    #[clap(short, long)]
    actual: Option<PathBuf>,

    /// URL to GET the actual document from
    #[clap(short, long)]
    url: Option<String>,

    /// Expected response status, only checked with --url
    #[clap(short, long, requires = "url")]
    status: Option<u16>,

    /// Exact path of an entry to leave out of the comparison, e.g. `id` or `items[0]`
    #[clap(short, long = "ignore")]
    ignore: Vec<String>,

    /// Key or `$`-anchored path that must exist in the actual document
    #[clap(short, long = "contains")]
    contains: Vec<String>,
}

#[doc(hidden)]
#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let expected = read_json(&cli.expected);

    let mut failures = vec![];

    let actual = match (&cli.actual, &cli.url) {
        (Some(path), _) => read_json(path),
        (None, Some(url)) => {
            let response = match fetch(url).await {
                Ok(response) => response,
                Err(err) => {
                    handle_error!(Code::INTERNAL_ERROR, "Error: {}", err);
                }
            };

            match read_response(&response, cli.status) {
                Ok((actual, status_failures)) => {
                    failures.extend(status_failures);
                    actual
                }
                Err((code, message)) => {
                    handle_error!(code, "{}", message);
                }
            }
        }
        (None, None) => {
            handle_error!(Code::INVALID_ARGUMENT, "Error: --actual or --url is required");
        }
    };

    debug!(
        "comparing {} ignoring {:?}",
        cli.expected.display(),
        cli.ignore
    );

    let config = Config::new().ignore_paths(cli.ignore);
    if let Some(message) = compare(&expected, &actual, &config).message() {
        failures.push(message);
    }

    for key in &cli.contains {
        if !contains(&actual, key) {
            failures.push(AssertionError::MissingEntry { key: key.clone() }.to_string());
        }
    }

    if failures.is_empty() {
        println!("json assertion PASSED");
        std::process::exit(Code::SUCCESS);
    }

    handle_error!(Code::ASSERTION_ERROR, "{}", failures.join(LINE_SEPARATOR));
}

/// Checks the status and parses the body of `response`.
///
/// Status failures are returned alongside the document. When the body cannot be
/// used, the error carries the exit code and every failure found so far.
fn read_response(
    response: &HttpResponse,
    status: Option<u16>,
) -> Result<(Value, Vec<String>), (i32, String)> {
    let assert = ResponseAssert::new(response);
    let mut failures = vec![];

    if let Some(status) = status {
        if let Err(err) = assert.has_status(status) {
            failures.push(err.to_string());
        }
    }

    match assert.json_body() {
        Ok(json) => Ok((json.actual().clone(), failures)),
        Err(AssertionError::InvalidJson { source }) if failures.is_empty() => Err((
            Code::JSON_PARSING_ERROR,
            format!("Error parsing response: {}", source),
        )),
        Err(err) => {
            failures.push(err.to_string());
            Err((Code::ASSERTION_ERROR, failures.join(LINE_SEPARATOR)))
        }
    }
}

fn read_json(path: &Path) -> Value {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            handle_error!(
                Code::INVALID_ARGUMENT,
                "Error reading {}: {}",
                path.display(),
                err
            );
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(err) => {
            handle_error!(
                Code::JSON_PARSING_ERROR,
                "Error parsing {}: {}",
                path.display(),
                err
            );
        }
    }
}
