//! User list middleware
//!
//! Finalizes the user list page for any path under its mount prefix.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};

use super::core::{Middleware, RequestInfo};
use crate::handler::pages;
use crate::http::response::build_html_response;

/// Serves the configured user names as an HTML list
pub struct UsersPage {
    users: Vec<String>,
}

impl UsersPage {
    #[must_use]
    pub fn new(users: Vec<String>) -> Self {
        Self { users }
    }
}

impl Middleware for UsersPage {
    fn handle(&self, req: &RequestInfo<'_>) -> Option<Response<Full<Bytes>>> {
        let is_head = *req.method == Method::HEAD;
        Some(build_html_response(pages::users_page(&self.users), is_head))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalizes_with_user_names() {
        let page = UsersPage::new(vec!["Michelle".to_string(), "David".to_string()]);
        let req = RequestInfo {
            method: &Method::GET,
            path: "/users",
        };
        let resp = page.handle(&req).unwrap();
        assert_eq!(resp.status(), 200);
    }
}
