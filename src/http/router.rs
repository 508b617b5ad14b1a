//! Request routing.
//!
//! A target is split into a root segment and a subpath, and the pair
//! (method, root) picks exactly one handler:
//!
//! | Method | Root          | Handler            |
//! |--------|---------------|--------------------|
//! | GET    | `/`           | empty 200          |
//! | GET    | `/echo`       | echo subpath       |
//! | GET    | `/user-agent` | reflect User-Agent |
//! | GET    | `/files`      | read file          |
//! | POST   | `/files`      | write file         |
//! | GET    | other         | 404                |
//! | POST   | other         | 404                |
//! | other  | any           | 405                |

use crate::handlers;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};
use crate::store::FileStore;

/// A request target split for routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// `/` followed by the first path segment
    pub root: String,
    /// Remaining segments joined by `/`, empty if there are none
    pub subpath: String,
}

impl Route {
    /// Splits a target on `/`.
    ///
    /// # Example
    ///
    /// ```
    /// # use rawserve::http::router::Route;
    /// let route = Route::from_target("/files/docs/a.txt");
    /// assert_eq!(route.root, "/files");
    /// assert_eq!(route.subpath, "docs/a.txt");
    /// ```
    pub fn from_target(target: &str) -> Self {
        let mut segments = target.split('/').skip(1);
        let first = segments.next().unwrap_or_default();
        let rest: Vec<&str> = segments.collect();

        Self {
            root: format!("/{}", first),
            subpath: rest.join("/"),
        }
    }
}

/// The handler selected for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Root,
    Echo,
    UserAgent,
    ReadFile,
    WriteFile,
    NotFound,
    MethodNotAllowed,
}

impl Handler {
    /// The dispatch table. Pure: no state, no side effects.
    pub fn select(method: &Method, root: &str) -> Self {
        match (method, root) {
            (Method::GET, "/") => Handler::Root,
            (Method::GET, "/echo") => Handler::Echo,
            (Method::GET, "/user-agent") => Handler::UserAgent,
            (Method::GET, "/files") => Handler::ReadFile,
            (Method::POST, "/files") => Handler::WriteFile,
            (Method::GET, _) | (Method::POST, _) => Handler::NotFound,
            _ => Handler::MethodNotAllowed,
        }
    }
}

/// Dispatches parsed requests to handlers.
///
/// Shared read-only between connection tasks; the only state it carries is
/// the optional file store.
#[derive(Debug, Clone, Default)]
pub struct Router {
    files: Option<FileStore>,
}

impl Router {
    pub fn new(files: Option<FileStore>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> Option<&FileStore> {
        self.files.as_ref()
    }

    /// Routes a request and always produces a response.
    pub async fn dispatch(&self, req: &Request) -> Response {
        let route = Route::from_target(&req.target);
        let handler = Handler::select(&req.method, &route.root);

        tracing::debug!(
            method = %req.method,
            target = %req.target,
            handler = ?handler,
            "Dispatching request"
        );

        match handler {
            Handler::Root => handlers::root(),
            Handler::Echo => handlers::echo(req, &route.subpath),
            Handler::UserAgent => handlers::user_agent(req),
            Handler::ReadFile => handlers::files::read(self.files(), &route.subpath).await,
            Handler::WriteFile => {
                handlers::files::write(self.files(), &route.subpath, &req.body).await
            }
            Handler::NotFound => Response::not_found(),
            Handler::MethodNotAllowed => Response::status(StatusCode::MethodNotAllowed),
        }
    }
}
