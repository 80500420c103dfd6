//! Static file serving module
//!
//! The plain static handler the interceptor defers to: serves files under the
//! web root, resolves welcome files for directory paths, and answers misses
//! with its own 404.

use crate::http;
use crate::spa::{RequestPath, ResourceStore};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Static file handler with welcome-file support
#[derive(Debug, Clone)]
pub struct StaticFiles<S> {
    store: S,
    index_files: Vec<String>,
}

impl<S: ResourceStore> StaticFiles<S> {
    pub const fn new(store: S, index_files: Vec<String>) -> Self {
        Self { store, index_files }
    }

    pub async fn serve(&self, path: &RequestPath, is_head: bool) -> Response<Full<Bytes>> {
        if path.ends_with_slash() {
            for index_file in &self.index_files {
                let candidate = path.with_index_file(index_file);
                if let Some(response) = self.load(&candidate, is_head).await {
                    return response;
                }
            }
            return http::build_404_response();
        }

        match self.load(path, is_head).await {
            Some(response) => response,
            None => http::build_404_response(),
        }
    }

    async fn load(&self, path: &RequestPath, is_head: bool) -> Option<Response<Full<Bytes>>> {
        let content = self.store.open(path).await?;
        Some(http::build_file_response(
            content,
            http::content_type_for(path),
            is_head,
        ))
    }
}
