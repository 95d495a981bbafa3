//! HTML-form method override.
//!
//! Browsers only submit GET and POST, but the edit and delete routes are
//! mounted on PUT and DELETE. Forms post with a `_method` query parameter
//! and this middleware rewrites the method before routing.

use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::Response,
};

/// Rewrite `POST ...?_method=PUT|DELETE` into the named method.
pub async fn method_override(mut request: Request, next: Next) -> Response {
    if request.method() == Method::POST
        && let Some(method) = request.uri().query().and_then(override_from_query)
    {
        *request.method_mut() = method;
    }

    next.run(request).await
}

/// Only PUT and DELETE may be smuggled through a POST.
fn override_from_query(query: &str) -> Option<Method> {
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("_method="))
        .and_then(|name| match name {
            "PUT" | "put" => Some(Method::PUT),
            "DELETE" | "delete" => Some(Method::DELETE),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_put_and_delete() {
        assert_eq!(override_from_query("_method=PUT"), Some(Method::PUT));
        assert_eq!(override_from_query("_method=delete"), Some(Method::DELETE));
        assert_eq!(
            override_from_query("a=1&_method=DELETE&b=2"),
            Some(Method::DELETE)
        );
    }

    #[test]
    fn test_override_rejects_other_methods() {
        assert_eq!(override_from_query("_method=PATCH"), None);
        assert_eq!(override_from_query("_method=GET"), None);
        assert_eq!(override_from_query("method=PUT"), None);
        assert_eq!(override_from_query(""), None);
    }
}
