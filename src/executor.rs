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

use log::trace;
use reqwest::{Body, Client, Method, Response};

use crate::domain::{Cookie, HttpMethod, HttpResponse, Request};
use crate::error::AssertionError;

/// Sends `request` and captures the whole response.
pub async fn execute(request: &Request) -> Result<HttpResponse, AssertionError> {
    let mut request_builder =
        Client::new().request(map_method(&request.http_method), request.url.as_str());
    for (name, value) in &request.headers {
        request_builder = request_builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = &request.body {
        request_builder = request_builder.body(Body::from(body.clone()));
    }

    trace!("executing request {} {}", request.http_method, request.url);
    let response = request_builder.send().await?;
    capture(response).await
}

/// Sends a `GET` to `url` and captures the whole response.
pub async fn fetch(url: &str) -> Result<HttpResponse, AssertionError> {
    execute(&Request::get(url)).await
}

/// Reads a [`reqwest::Response`] into an [`HttpResponse`], consuming the body.
pub async fn capture(response: Response) -> Result<HttpResponse, AssertionError> {
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect::<Vec<_>>();
    let cookies = response
        .cookies()
        .map(|cookie| Cookie {
            name: cookie.name().to_string(),
            value: cookie.value().to_string(),
            domain: cookie.domain().map(str::to_string),
            path: cookie.path().map(str::to_string),
            max_age: cookie.max_age().map(|max_age| max_age.as_secs()),
            secure: cookie.secure(),
            http_only: cookie.http_only(),
        })
        .collect::<Vec<_>>();

    let body = response.text().await?;
    let body = if body.is_empty() { None } else { Some(body) };

    trace!(
        "captured response with status {}, {} header(s), {} cookie(s)",
        status,
        headers.len(),
        cookies.len()
    );

    Ok(HttpResponse {
        status,
        headers,
        cookies,
        body,
    })
}

impl HttpResponse {
    /// Captures a [`reqwest::Response`], see [`capture`].
    pub async fn from_reqwest(response: Response) -> Result<Self, AssertionError> {
        capture(response).await
    }

    /// Sends a `GET` to `url`, see [`fetch`].
    pub async fn fetch(url: &str) -> Result<Self, AssertionError> {
        fetch(url).await
    }
}

fn map_method(http_method: &HttpMethod) -> Method {
    match http_method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{HttpMethod, HttpResponse, Request};
    use crate::executor::{execute, fetch};

    #[tokio::test]
    async fn test_execute() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/user")
            .match_header("content-type", "application/json")
            .match_body(r#"{"name":"test"}"#)
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_header("set-cookie", "session=abc; Path=/; HttpOnly")
            .with_body(r#"{"id": 1, "name": "test"}"#)
            .create_async()
            .await;

        let request = Request::new(HttpMethod::Post, format!("{}/user", server.url()))
            .with_header("Content-Type", "application/json")
            .with_body(r#"{"name":"test"}"#);
        let response = execute(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 201);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.body.as_deref(), Some(r#"{"id": 1, "name": "test"}"#));

        let cookie = response.cookie("session").unwrap();
        assert_eq!(cookie.value, "abc");
        assert_eq!(cookie.path.as_deref(), Some("/"));
        assert!(cookie.http_only);
        assert!(!cookie.secure);
    }

    #[tokio::test]
    async fn test_fetch_empty_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/empty")
            .with_status(204)
            .create_async()
            .await;

        let response = fetch(&format!("{}/empty", server.url())).await.unwrap();
        assert_eq!(response.status, 204);
        assert_eq!(response.body, None);
        assert!(response.cookies.is_empty());
    }

    #[tokio::test]
    async fn test_http_response_constructors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/user")
            .with_status(200)
            .with_header("set-cookie", "theme=dark")
            .with_body(r#"{"id": 1}"#)
            .expect(2)
            .create_async()
            .await;
        let url = format!("{}/user", server.url());

        let fetched = HttpResponse::fetch(&url).await.unwrap();
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body.as_deref(), Some(r#"{"id": 1}"#));

        let response = reqwest::get(&url).await.unwrap();
        let captured = HttpResponse::from_reqwest(response).await.unwrap();
        assert_eq!(captured.cookie("theme").map(|c| c.value.as_str()), Some("dark"));
        assert_eq!(captured.body, fetched.body);
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let result = fetch("http://127.0.0.1:1/nothing").await;
        assert!(matches!(
            result,
            Err(crate::error::AssertionError::Http { .. })
        ));
    }
}
