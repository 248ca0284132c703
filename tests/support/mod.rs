//! Mock Nexus server helpers shared by integration tests.

#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::matchers::{basic_auth, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nexus_backup::{Credentials, RepositoryClient, RepositoryTarget};

pub const USER: &str = "admin";
pub const PASSWORD: &str = "admin123";
pub const ASSETS_PATH: &str = "/service/rest/v1/assets";

pub const TOKEN_A: &str = "88491cd1d185dd136f143f20c4e7d50c";
pub const TOKEN_B: &str = "0123456789abcdef0123456789ABCDEF";

/// Builds a client authenticated as [`USER`] against `server`.
pub fn client_for(server: &MockServer, repository: &str) -> RepositoryClient {
    let target = RepositoryTarget::new(
        &server.uri(),
        Credentials::new(USER, PASSWORD),
        repository,
        "v1",
    )
    .expect("valid target");
    RepositoryClient::new(target).expect("client builds")
}

/// A listing page body with the given download URLs and next token.
///
/// `next = None` produces a JSON `null` continuation token.
pub fn listing_body(urls: &[String], next: Option<&str>) -> Value {
    let items: Vec<Value> = urls
        .iter()
        .map(|url| json!({ "downloadUrl": url, "format": "maven2" }))
        .collect();
    json!({ "items": items, "continuationToken": next })
}

/// Mounts a listing page answered for `token` (`None` for the first page).
///
/// Requests without the expected basic auth header do not match.
pub async fn mount_listing(server: &MockServer, repository: &str, token: Option<&str>, body: Value) {
    let mock = Mock::given(method("GET"))
        .and(path(ASSETS_PATH))
        .and(query_param("repository", repository))
        .and(basic_auth(USER, PASSWORD));
    let mock = match token {
        Some(token) => mock.and(query_param("continuationToken", token)),
        None => mock.and(query_param_is_missing("continuationToken")),
    };
    mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Download URL for an artifact path under `repository` on `server`.
pub fn artifact_url(server: &MockServer, repository: &str, relative: &str) -> String {
    format!("{}/repository/{repository}/{relative}", server.uri())
}

/// Serves `body` for the artifact at `relative`, expecting `hits` requests.
pub async fn mount_artifact(
    server: &MockServer,
    repository: &str,
    relative: &str,
    body: &[u8],
    hits: u64,
) {
    Mock::given(method("GET"))
        .and(path(format!("/repository/{repository}/{relative}")))
        .and(basic_auth(USER, PASSWORD))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .expect(hits)
        .mount(server)
        .await;
}

/// Answers the artifact at `relative` with `status`.
pub async fn mount_artifact_status(server: &MockServer, repository: &str, relative: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/repository/{repository}/{relative}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
