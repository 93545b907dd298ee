//! Request routing: method + request target to a [`RouteDecision`].
//!
//! The router is resource-agnostic. It selects a descriptor from the
//! resource table by the first path segment, captures the raw `:id`
//! segment of the descriptor's member template, and classifies the
//! target's shape for collection reads. It never interprets the id as a
//! number; coercion happens in the handlers.

use axum::http::Method;

use crate::resource::{self, ResourceSpec};

/// The outcome of routing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// The first path segment names a served resource.
    Resource(ResourceRoute),
    /// No resource is served under the first path segment.
    NotFound,
}

/// A request addressed to a known resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRoute {
    /// The matched resource descriptor.
    pub resource: &'static ResourceSpec,
    /// The request method, uninterpreted.
    pub method: Method,
    /// The `:id` capture of the member template, when the path matches it.
    pub id: Option<String>,
    /// Shape of the full request target under the resource.
    pub shape: PathShape,
}

/// How the request target sits under a resource's segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathShape {
    /// The target is exactly `/{resource}`.
    Collection,
    /// The target starts with `/{resource}/`; holds the raw segment that
    /// follows, which may be empty or carry a query suffix.
    Member(String),
    /// Anything else, e.g. `/{resource}?limit=5`.
    Unrecognized,
}

/// Route a request.
///
/// `target` is the request target as sent: the path plus an optional
/// `?query`. Resource selection and template matching use the path only;
/// the shape is taken from the whole target.
pub fn route(method: &Method, target: &str) -> RouteDecision {
    let path = target.split_once('?').map_or(target, |(path, _)| path);

    let Some(resource) = first_segment(path).and_then(resource::lookup) else {
        return RouteDecision::NotFound;
    };

    RouteDecision::Resource(ResourceRoute {
        resource,
        method: method.clone(),
        id: capture(resource.template, path).map(str::to_owned),
        shape: shape_of(resource, target),
    })
}

fn first_segment(path: &str) -> Option<&str> {
    path.strip_prefix('/')?.split('/').next()
}

fn shape_of(resource: &ResourceSpec, target: &str) -> PathShape {
    let Some(rest) = target
        .strip_prefix('/')
        .and_then(|rest| rest.strip_prefix(resource.segment()))
    else {
        return PathShape::Unrecognized;
    };

    if rest.is_empty() {
        return PathShape::Collection;
    }

    rest.strip_prefix('/').map_or(PathShape::Unrecognized, |member| {
        let segment = member.split('/').next().unwrap_or_default();
        PathShape::Member(segment.to_owned())
    })
}

/// Match `path` against a single-parameter template such as `/users/:id`.
///
/// Literal segments must match exactly and the parameter segment must be
/// non-empty. Returns the captured parameter, or `None` when the path
/// does not match or the template has no parameter.
pub fn capture<'p>(template: &str, path: &'p str) -> Option<&'p str> {
    let mut expected = template.strip_prefix('/')?.split('/');
    let mut actual = path.strip_prefix('/')?.split('/');
    let mut captured = None;

    loop {
        match (expected.next(), actual.next()) {
            (None, None) => return captured,
            (Some(pattern), Some(segment)) => {
                if pattern.starts_with(':') {
                    if segment.is_empty() {
                        return None;
                    }
                    captured.get_or_insert(segment);
                } else if pattern != segment {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::resource::{POSTS, USERS};

    fn resource_route(method: &Method, target: &str) -> ResourceRoute {
        match route(method, target) {
            RouteDecision::Resource(route) => route,
            RouteDecision::NotFound => panic!("{target} did not route"),
        }
    }

    #[test]
    fn unknown_resource_is_not_found() {
        assert_eq!(route(&Method::GET, "/widgets"), RouteDecision::NotFound);
        assert_eq!(route(&Method::POST, "/widgets/1"), RouteDecision::NotFound);
        assert_eq!(route(&Method::GET, "/"), RouteDecision::NotFound);
        assert_eq!(route(&Method::GET, "/usersx"), RouteDecision::NotFound);
        assert_eq!(route(&Method::GET, "//users"), RouteDecision::NotFound);
    }

    #[test]
    fn bare_collection_has_no_id() {
        let route = resource_route(&Method::GET, "/users");
        assert_eq!(route.resource, &USERS);
        assert_eq!(route.id, None);
        assert_eq!(route.shape, PathShape::Collection);
    }

    #[test]
    fn trailing_slash_has_no_id() {
        let route = resource_route(&Method::PATCH, "/users/");
        assert_eq!(route.id, None);
        assert_eq!(route.shape, PathShape::Member(String::new()));
    }

    #[test]
    fn member_path_captures_raw_id() {
        let route = resource_route(&Method::DELETE, "/posts/42");
        assert_eq!(route.resource, &POSTS);
        assert_eq!(route.method, Method::DELETE);
        assert_eq!(route.id.as_deref(), Some("42"));
        assert_eq!(route.shape, PathShape::Member(String::from("42")));
    }

    #[test]
    fn id_is_not_interpreted() {
        let route = resource_route(&Method::GET, "/users/abc");
        assert_eq!(route.id.as_deref(), Some("abc"));
    }

    #[test]
    fn deeper_paths_do_not_match_template() {
        let route = resource_route(&Method::GET, "/users/5/extra");
        assert_eq!(route.id, None);
        assert_eq!(route.shape, PathShape::Member(String::from("5")));
    }

    #[test]
    fn query_is_ignored_for_template_but_kept_in_shape() {
        let route = resource_route(&Method::GET, "/users/5?verbose=1");
        assert_eq!(route.id.as_deref(), Some("5"));
        assert_eq!(route.shape, PathShape::Member(String::from("5?verbose=1")));

        let route = resource_route(&Method::GET, "/users?limit=5");
        assert_eq!(route.id, None);
        assert_eq!(route.shape, PathShape::Unrecognized);
    }

    #[test]
    fn capture_requires_exact_segment_count() {
        assert_eq!(capture("/users/:id", "/users/7"), Some("7"));
        assert_eq!(capture("/users/:id", "/users"), None);
        assert_eq!(capture("/users/:id", "/users/"), None);
        assert_eq!(capture("/users/:id", "/users/7/"), None);
        assert_eq!(capture("/users/:id", "/posts/7"), None);
        assert_eq!(capture("/users", "/users"), None);
        assert_eq!(capture("/users/:id", "users/7"), None);
    }
}
