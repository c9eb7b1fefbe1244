//! Application-owned route registry and the discovery listing built from it.
//!
//! Instead of introspecting axum's internal route table, every handler is
//! registered through [`Routes`], which writes the axum router and an
//! explicit [`RouteGroup`] entry at the same call site. The registry is
//! populated once at startup, immutable afterwards, and shared read-only
//! behind an `Arc` — listing it is a pure function of registration state.

use axum::handler::Handler;
use axum::http::Method;
use axum::routing::MethodRouter;
use axum::Router;

use crate::controllers::AppState;

// ── Re-exports ─────────────────────────────────────────────────
// So callers can write `use portico::routing::get;` etc. when building
// a `MethodRouter` for multi-method rules.
pub use axum::routing::{any, delete, get, head, options, patch, post, put};

/// The listing output: one formatted string per concrete rule.
pub type RouteListing = Vec<String>;

/// One registered endpoint: an ordered method sequence plus a path template.
///
/// Methods are kept as an ordered `Vec`, not a set, so the rendered listing
/// is deterministic across runs. A rule without a path models a mounted
/// sub-router; such rules are never emitted by [`RouteGroup::list_routes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    methods: Vec<Method>,
    path: Option<String>,
}

impl RouteRule {
    /// Create a rule for a concrete path.
    pub fn new(methods: &[Method], path: impl Into<String>) -> Self {
        RouteRule {
            methods: methods.to_vec(),
            path: Some(path.into()),
        }
    }

    /// Create a pathless rule marking a mounted sub-router.
    pub fn mounted() -> Self {
        RouteRule {
            methods: Vec::new(),
            path: None,
        }
    }

    /// The path template, or `None` for a mounted sub-router.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The registered methods, in registration order.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Render the methods as an uppercase, comma-joined token.
    ///
    /// An empty method list renders as an empty token; that is a display
    /// concern, not an error.
    pub fn methods_token(&self) -> String {
        self.methods
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// An ordered collection of [`RouteRule`]s sharing a base path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGroup {
    base_path: String,
    rules: Vec<RouteRule>,
}

impl RouteGroup {
    /// Create an empty group mounted under `base_path` (may be empty).
    pub fn new(base_path: impl Into<String>) -> Self {
        RouteGroup {
            base_path: base_path.into(),
            rules: Vec::new(),
        }
    }

    /// The prefix this group is mounted under.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// The registered rules, in registration order.
    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Record a rule for a concrete path.
    pub fn record(&mut self, methods: &[Method], path: &str) {
        self.rules.push(RouteRule::new(methods, path));
    }

    /// Record a mounted sub-router (no concrete path, never listed).
    pub fn record_mount(&mut self) {
        self.rules.push(RouteRule::mounted());
    }

    /// Produce the listing for this group: one `"METHODS base_path+path"`
    /// string per concrete rule, in registration order.
    ///
    /// Pathless rules are skipped. An empty group yields an empty vec.
    pub fn list_routes(&self) -> RouteListing {
        self.rules
            .iter()
            .filter_map(|rule| {
                let path = rule.path()?;
                Some(format!(
                    "{} {}{}",
                    rule.methods_token(),
                    self.base_path,
                    path
                ))
            })
            .collect()
    }
}

/// Concatenate the listings of `groups`, in order.
pub fn aggregate<'a, I>(groups: I) -> RouteListing
where
    I: IntoIterator<Item = &'a RouteGroup>,
{
    groups
        .into_iter()
        .flat_map(RouteGroup::list_routes)
        .collect()
}

/// The registry the discovery endpoint reads: group metadata in mount order.
///
/// Built once while assembling the application router and then frozen;
/// concurrent discovery requests share it read-only.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    groups: Vec<RouteGroup>,
}

impl RouteRegistry {
    /// Append a group. Listing order follows registration order.
    pub fn register(&mut self, group: RouteGroup) {
        self.groups.push(group);
    }

    /// The registered groups, in mount order.
    pub fn groups(&self) -> &[RouteGroup] {
        &self.groups
    }

    /// The full listing across all groups, recomputed on every call.
    pub fn aggregate(&self) -> RouteListing {
        aggregate(&self.groups)
    }
}

/// Builder that registers handlers into an axum router and the route
/// registry at one call site.
///
/// ```rust,ignore
/// use axum::http::Method;
/// use portico::routing::{get, post, Routes};
///
/// let routes = Routes::new("/api")
///     .post("/login", login)
///     .route("/widgets", &[Method::GET, Method::POST], get(list).post(create));
/// ```
pub struct Routes {
    group: RouteGroup,
    router: Router<AppState>,
}

impl Routes {
    /// Start an empty group mounted under `base_path`.
    pub fn new(base_path: impl Into<String>) -> Self {
        Routes {
            group: RouteGroup::new(base_path),
            router: Router::new(),
        }
    }

    /// Register `handler` for `path` and record the rule.
    ///
    /// The explicit `methods` slice is the registry's source of truth — the
    /// `MethodRouter` is never introspected, so the listed methods are
    /// exactly what the caller declares, in the declared order.
    pub fn route(
        mut self,
        path: &str,
        methods: &[Method],
        handler: MethodRouter<AppState>,
    ) -> Self {
        self.group.record(methods, path);
        self.router = self.router.route(path, handler);
        self
    }

    /// Register a `GET` handler.
    pub fn get<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.route(path, &[Method::GET], get(handler))
    }

    /// Register a `POST` handler.
    pub fn post<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.route(path, &[Method::POST], post(handler))
    }

    /// Register a `PUT` handler.
    pub fn put<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.route(path, &[Method::PUT], put(handler))
    }

    /// Register a `PATCH` handler.
    pub fn patch<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.route(path, &[Method::PATCH], patch(handler))
    }

    /// Register a `DELETE` handler.
    pub fn delete<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.route(path, &[Method::DELETE], delete(handler))
    }

    /// Merge a sub-router without a concrete path of its own.
    ///
    /// The mount is recorded as a pathless rule, which the listing skips.
    pub fn mount(mut self, sub: Router<AppState>) -> Self {
        self.group.record_mount();
        self.router = self.router.merge(sub);
        self
    }

    /// The group metadata accumulated so far.
    pub fn group(&self) -> &RouteGroup {
        &self.group
    }

    /// The listing for this group (see [`RouteGroup::list_routes`]).
    pub fn list_routes(&self) -> RouteListing {
        self.group.list_routes()
    }

    /// Split into registry metadata and the axum router, for mounting.
    pub fn into_parts(self) -> (RouteGroup, Router<AppState>) {
        (self.group, self.router)
    }
}
