// ABOUTME: HTTP server for the lesson-slides application
// ABOUTME: Routes requests for the landing page, lesson list and generated slide decks

use crate::config::Config;
use crate::deck::{self, DeckRequest};
use crate::errors::{DeckError, Result};
use crate::lesson::LESSONS;
use crate::utils;
use log::{error, info, warn};
use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

/// A response ready to be written to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    pub headers: Vec<(&'static str, String)>,
}

impl Reply {
    fn new(status: u16, content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type,
            body,
            headers: Vec::new(),
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, "text/plain; charset=utf-8", body.into().into_bytes())
    }

    pub fn html(body: Vec<u8>) -> Self {
        Self::new(200, "text/html; charset=utf-8", body)
    }

    pub fn pdf(body: Vec<u8>, filename: &str) -> Self {
        Self::new(200, "application/pdf", body).with_header(
            "Content-Disposition",
            format!("inline; filename=\"{}\"", filename),
        )
    }

    fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Plain text description of a failure, with the error's status code.
    pub fn error(err: &DeckError) -> Self {
        let status = err.status_code();
        if status >= 500 {
            error!("Request failed: {}", err);
        } else {
            warn!("Rejected request: {}", err);
        }
        Self::text(status, format!("{}\n", err))
    }

    /// Find a header added to this reply, by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Request routing, independent of the transport.
#[derive(Debug, Clone)]
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn handle(&self, method: &Method, url: &str) -> Reply {
        if *method != Method::Get {
            return Reply::text(405, "405 Method Not Allowed\n").with_header("Allow", "GET");
        }

        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (url, None),
        };

        let result = match path {
            "/" => self.index(),
            "/slides" => self.slides(query),
            "/lessons" => Ok(self.lessons()),
            _ => Ok(Reply::text(404, "404 Not Found\n")),
        };
        result.unwrap_or_else(|e| Reply::error(&e))
    }

    fn index(&self) -> Result<Reply> {
        let path = self.config.static_dir.join("index.html");
        utils::validate_file_exists(&path)?;
        Ok(Reply::html(fs::read(&path)?))
    }

    fn slides(&self, query: Option<&str>) -> Result<Reply> {
        let request = DeckRequest::from_query(query, &self.config)?;
        let (deck, bytes) = deck::build_pdf(request, &self.config)?;
        Ok(Reply::pdf(bytes, &deck.filename()))
    }

    fn lessons(&self) -> Reply {
        let listing: String = LESSONS
            .iter()
            .map(|lesson| format!("{}\t{}\n", lesson.week, lesson.title))
            .collect();
        Reply::text(200, listing)
    }
}

/// A bound HTTP listener plus the worker threads that serve it.
pub struct HttpServer {
    server: Arc<Server>,
    app: Arc<App>,
    workers: usize,
}

impl HttpServer {
    pub fn bind(config: Config) -> Result<Self> {
        let addr = config.bind_addr();
        let server = Server::http(&addr).map_err(|e| {
            DeckError::ServerError(format!("Failed to start HTTP server on {}: {}", addr, e))
        })?;
        Ok(Self {
            server: Arc::new(server),
            workers: config.workers.max(1),
            app: Arc::new(App::new(config)),
        })
    }

    /// Port the listener ended up on.
    pub fn port(&self) -> Option<u16> {
        self.server.server_addr().to_ip().map(|addr| addr.port())
    }

    /// Serve requests until the listener is closed.
    pub fn run(self) -> Result<()> {
        info!(
            "Slide generator listening on http://localhost:{}/ with {} workers",
            self.port().unwrap_or(self.app.config().port),
            self.workers
        );

        let handles = (0..self.workers)
            .map(|id| {
                let server = Arc::clone(&self.server);
                let app = Arc::clone(&self.app);
                thread::Builder::new()
                    .name(format!("http-worker-{}", id))
                    .spawn(move || {
                        for request in server.incoming_requests() {
                            respond(&app, request);
                        }
                    })
                    .map_err(|e| {
                        DeckError::ServerError(format!("Failed to spawn worker thread: {}", e))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        for handle in handles {
            handle
                .join()
                .map_err(|_| DeckError::ServerError("HTTP worker thread panicked".to_string()))?;
        }
        Ok(())
    }
}

fn respond(app: &App, request: Request) {
    let started = Instant::now();
    let method = request.method().clone();
    let url = request.url().to_string();

    let reply = app.handle(&method, &url);
    let (status, bytes) = (reply.status, reply.body.len());

    let mut response =
        Response::from_data(reply.body).with_status_code(StatusCode(reply.status));
    let headers = std::iter::once(("Content-Type", reply.content_type.to_string()))
        .chain(reply.headers);
    for (name, value) in headers {
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => response.add_header(header),
            Err(()) => warn!("Dropping invalid {} header", name),
        }
    }

    if let Err(e) = request.respond(response) {
        error!("Failed to send response for {}: {}", url, e);
        return;
    }
    info!(
        "{} {} {} {}B {}ms",
        method,
        url,
        status,
        bytes,
        started.elapsed().as_millis()
    );
}

/// Validate the configuration and serve until the process is stopped.
pub fn serve(config: Config) -> Result<()> {
    config.validate()?;
    HttpServer::bind(config)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn app_with(static_dir: &Path, media_dir: PathBuf) -> App {
        App::new(Config {
            snippets_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("snippets"),
            media_dir,
            static_dir: static_dir.to_path_buf(),
            ..Config::default()
        })
    }

    #[test]
    fn test_serves_the_landing_page() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(dir.path().join("index.html"), "<form></form>").unwrap();
        let app = app_with(dir.path(), dir.path().join("media"));

        let reply = app.handle(&Method::Get, "/");
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, "text/html; charset=utf-8");
        assert_eq!(reply.body, b"<form></form>");
    }

    #[test]
    fn test_missing_landing_page_is_a_server_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let app = app_with(dir.path(), dir.path().join("media"));
        assert_eq!(app.handle(&Method::Get, "/").status, 500);
    }

    #[test]
    fn test_unknown_paths_and_methods() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let app = app_with(dir.path(), dir.path().join("media"));
        assert_eq!(app.handle(&Method::Get, "/favicon.ico").status, 404);

        let reply = app.handle(&Method::Post, "/slides");
        assert_eq!(reply.status, 405);
        assert_eq!(reply.header("allow"), Some("GET"));
    }

    #[test]
    fn test_lists_lessons() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let app = app_with(dir.path(), dir.path().join("media"));
        let reply = app.handle(&Method::Get, "/lessons");
        let body = String::from_utf8(reply.body).unwrap();
        assert_eq!(body.lines().count(), LESSONS.len());
        assert!(body.starts_with("1\tNode.js"));
    }

    #[test]
    fn test_slides_are_served_as_pdf() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let app = app_with(dir.path(), dir.path().join("media"));
        let reply = app.handle(&Method::Get, "/slides?name=Ada&color=%23791E94&week=2");
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, "application/pdf");
        assert_eq!(
            reply.header("Content-Disposition"),
            Some("inline; filename=\"lesson-week2.pdf\"")
        );
        assert!(reply.body.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_unparseable_color_is_served() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let app = app_with(dir.path(), dir.path().join("media"));
        for query in ["color=rgb(0,0,0)&week=2", "color=bluish&week=2"] {
            let reply = app.handle(&Method::Get, &format!("/slides?{}", query));
            assert_eq!(reply.status, 200);
            assert_eq!(reply.content_type, "application/pdf");
            assert!(reply.body.starts_with(b"%PDF-"));
        }
    }

    #[test]
    fn test_failures_map_to_status_codes() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let app = app_with(dir.path(), dir.path().join("media"));

        assert_eq!(app.handle(&Method::Get, "/slides?week=7").status, 404);
        assert_eq!(app.handle(&Method::Get, "/slides?week=x").status, 400);

        // week 1 needs media that this directory lacks; no PDF bytes are sent
        let reply = app.handle(&Method::Get, "/slides?week=1");
        assert_eq!(reply.status, 500);
        assert_eq!(reply.content_type, "text/plain; charset=utf-8");
    }
}
