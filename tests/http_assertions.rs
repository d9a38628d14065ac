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

use http_json_assert::{
    capture, execute, AssertionError, HttpMethod, Request, ResponseAssert,
};
use serde_json::json;

#[tokio::test]
async fn asserts_a_live_json_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/user/1")
        .match_header("authorization", "Bearer abcd")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("set-cookie", "session=s3cr3t; Path=/; Secure")
        .with_body(r#"{"id": 1, "name": "John Doe", "created": "2024-02-01T10:00:00Z"}"#)
        .create_async()
        .await;

    let request = Request::new(HttpMethod::Get, format!("{}/user/1", server.url()))
        .with_header("Authorization", "Bearer abcd");
    let response = execute(&request).await.unwrap();
    mock.assert_async().await;

    let assert = ResponseAssert::new(&response);
    assert
        .has_status(200)
        .and_then(|r| r.is_success())
        .and_then(|r| r.has_header_value("Content-Type", "application/json"))
        .and_then(|r| r.has_cookie_value("session", "s3cr3t"))
        .and_then(|r| r.has_json_entry("$.created"))
        .and_then(|r| {
            r.has_json_body_equal_to_ignoring(
                &json!({ "id": 1.0, "name": "John Doe", "created": "yesterday" }),
                ["created"],
            )
        })
        .unwrap();

    let err = assert
        .has_json_body_equal_to(&json!({ "id": 2, "name": "Jane" }))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expecting json entry \"id\" to be equal to 2 but was 1,\n\
         Expecting json entry \"name\" to be equal to \"Jane\" but was \"John Doe\""
    );
}

#[tokio::test]
async fn reports_non_json_bodies() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/health")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let response = reqwest::get(format!("{}/health", server.url()))
        .await
        .unwrap();
    let response = capture(response).await.unwrap();

    let assert = ResponseAssert::new(&response);
    assert!(matches!(
        assert.is_success(),
        Err(AssertionError::NotSuccessful { actual: 500 })
    ));
    assert!(matches!(
        assert.has_json_entry("status"),
        Err(AssertionError::InvalidJson { .. })
    ));
}
