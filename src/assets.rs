//! Static files from the public directory.
//!
//! Registered as the router's fallback, so it sees every `GET`/`HEAD` no
//! route claims. `/` and directories resolve to their `index.html`.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use http::StatusCode;
use tracing::{debug, error};

use crate::request::Request;
use crate::response::Response;

const INDEX: &str = "index.html";

pub struct Assets {
    root: PathBuf,
}

impl Assets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub async fn serve(&self, req: Request) -> Response {
        let Some(mut file) = self.resolve(req.path()) else {
            debug!(path = req.path(), "rejected asset path");
            return Response::status(StatusCode::NOT_FOUND);
        };

        if tokio::fs::metadata(&file).await.is_ok_and(|m| m.is_dir()) {
            file.push(INDEX);
        }

        match tokio::fs::read(&file).await {
            Ok(bytes) => {
                let mime = mime_guess::from_path(&file).first_or_octet_stream();
                Response::builder().bytes(mime.essence_str(), bytes)
            }
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => {
                Response::status(StatusCode::NOT_FOUND)
            }
            Err(e) => {
                error!(file = %file.display(), "failed to read asset: {e}");
                Response::status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// Maps a URL path onto the public directory. Anything that could climb
    /// out of it (`..`, absolute or prefixed components) yields `None`.
    fn resolve(&self, url_path: &str) -> Option<PathBuf> {
        let decoded = urlencoding::decode(url_path).ok()?;
        let relative = decoded.trim_start_matches('/');

        let mut file = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => file.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        if relative.is_empty() {
            file.push(INDEX);
        }
        Some(file)
    }
}
