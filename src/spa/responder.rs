//! Standalone responder
//!
//! Resolves the request, loads the chosen resource and builds the response
//! without any other handler behind it.

use super::path::RequestPath;
use super::resolver::{resolve, Miss, ResolutionOutcome};
use super::store::ResourceStore;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Self-contained SPA responder over a resource store
#[derive(Debug, Clone)]
pub struct Responder<S> {
    store: S,
    fallback: RequestPath,
    index_file: String,
}

impl<S: ResourceStore> Responder<S> {
    /// `index_file` is appended to paths ending in `/` before resolution.
    pub fn new(store: S, fallback: RequestPath, index_file: impl Into<String>) -> Self {
        Self {
            store,
            fallback,
            index_file: index_file.into(),
        }
    }

    /// Answer one request. The outcome is returned alongside the response
    /// for access logging.
    pub async fn respond(
        &self,
        request: &RequestPath,
        is_head: bool,
    ) -> (ResolutionOutcome, Response<Full<Bytes>>) {
        let effective = request.with_index_file(&self.index_file);
        let outcome = resolve(&effective, |p| self.store.exists(p), &self.fallback);
        logger::log_debug(&format!("Resolved {request} -> {outcome}"));

        let response = match &outcome {
            ResolutionOutcome::PassThrough(path) => match self.load(path, is_head).await {
                Some(response) => response,
                None => http::build_404_response(),
            },
            ResolutionOutcome::Fallback(path) => match self.load(path, is_head).await {
                Some(response) => response,
                None => self.entry_missing(request),
            },
            ResolutionOutcome::NotFound(Miss::Asset) => http::build_404_response(),
            ResolutionOutcome::NotFound(Miss::Entry) => self.entry_missing(request),
        };
        (outcome, response)
    }

    async fn load(&self, path: &RequestPath, is_head: bool) -> Option<Response<Full<Bytes>>> {
        let content = self.store.open(path).await?;
        Some(http::build_file_response(
            content,
            http::content_type_for(path),
            is_head,
        ))
    }

    fn entry_missing(&self, request: &RequestPath) -> Response<Full<Bytes>> {
        let message = super::entry_missing_message(&self.fallback);
        logger::log_warning(&format!(
            "Entry document {} could not be served for {request}",
            self.fallback
        ));
        http::build_404_with_diagnostic(&message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spa::store::memory::MemoryStore;
    use http_body_util::BodyExt;

    const ENTRY: &str = "<!DOCTYPE html><div id=app></div>";

    fn path(p: &str) -> RequestPath {
        RequestPath::from_uri_path(p)
    }

    fn responder(store: MemoryStore) -> Responder<MemoryStore> {
        Responder::new(store, path("/index.html"), "index.html")
    }

    fn site() -> MemoryStore {
        MemoryStore::new()
            .with("/index.html", ENTRY)
            .with("/css/app.css", "body{}")
            .with("/LICENSE", "MIT")
            .with("/docs/index.html", "<p>docs</p>")
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_client_route_serves_entry_document() {
        let (outcome, response) = responder(site()).respond(&path("/app/dashboard"), false).await;
        assert_eq!(outcome, ResolutionOutcome::Fallback(path("/index.html")));
        assert_eq!(response.status(), 200);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert_eq!(body_string(response).await, ENTRY);
    }

    #[tokio::test]
    async fn test_missing_asset_is_404() {
        let (outcome, response) = responder(site()).respond(&path("/assets/logo.png"), false).await;
        assert_eq!(outcome, ResolutionOutcome::NotFound(Miss::Asset));
        assert_eq!(response.status(), 404);
        assert_eq!(body_string(response).await, "404 Not Found");
    }

    #[tokio::test]
    async fn test_existing_asset_streams_with_type() {
        let (outcome, response) = responder(site()).respond(&path("/css/app.css"), false).await;
        assert_eq!(outcome, ResolutionOutcome::PassThrough(path("/css/app.css")));
        assert_eq!(response.headers()["content-type"], "text/css");
        assert_eq!(body_string(response).await, "body{}");
    }

    #[tokio::test]
    async fn test_extensionless_file_wins_over_fallback() {
        let (outcome, response) = responder(site()).respond(&path("/LICENSE"), false).await;
        assert_eq!(outcome, ResolutionOutcome::PassThrough(path("/LICENSE")));
        assert_eq!(response.headers()["content-type"], "application/octet-stream");
        assert_eq!(body_string(response).await, "MIT");
    }

    #[tokio::test]
    async fn test_trailing_slash_appends_index_file() {
        let responder = responder(site());
        let (outcome, response) = responder.respond(&path("/docs/"), false).await;
        assert_eq!(outcome, ResolutionOutcome::PassThrough(path("/docs/index.html")));
        assert_eq!(body_string(response).await, "<p>docs</p>");

        let (outcome, response) = responder.respond(&path("/"), false).await;
        assert_eq!(outcome, ResolutionOutcome::PassThrough(path("/index.html")));
        assert_eq!(body_string(response).await, ENTRY);
    }

    #[tokio::test]
    async fn test_missing_entry_document_reports_diagnostic() {
        let store = MemoryStore::new().with("/css/app.css", "body{}");
        let responder = responder(store);

        let (outcome, response) = responder.respond(&path("/index.html"), false).await;
        assert_eq!(outcome, ResolutionOutcome::NotFound(Miss::Entry));
        assert_eq!(response.status(), 404);
        assert_eq!(body_string(response).await, "404 Not Found: index.html missing");

        // A route whose fallback cannot be loaded gets the same diagnostic
        let (outcome, response) = responder.respond(&path("/users/42"), false).await;
        assert_eq!(outcome, ResolutionOutcome::Fallback(path("/index.html")));
        assert_eq!(response.status(), 404);
        assert_eq!(body_string(response).await, "404 Not Found: index.html missing");
    }

    #[tokio::test]
    async fn test_head_request_has_empty_body() {
        let (_, response) = responder(site()).respond(&path("/users/42"), true).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-length"], ENTRY.len().to_string().as_str());
        assert_eq!(body_string(response).await, "");
    }
}
