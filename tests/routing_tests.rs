use axum::http::Method;
use portico::routing::{self, RouteGroup, RouteRule, Routes};

#[test]
fn listing_preserves_registration_order() {
    let mut group = RouteGroup::new("/api");
    group.record(&[Method::POST], "/login");
    group.record(&[Method::POST], "/logout");
    group.record(&[Method::GET], "/session");

    assert_eq!(
        group.list_routes(),
        vec!["POST /api/login", "POST /api/logout", "GET /api/session"]
    );
}

#[test]
fn empty_group_yields_empty_listing() {
    let group = RouteGroup::new("/api");
    assert!(group.list_routes().is_empty());
}

#[test]
fn methods_render_uppercase_comma_joined() {
    let mut group = RouteGroup::new("/api");
    group.record(&[Method::GET, Method::POST], "/widgets");

    assert_eq!(group.list_routes(), vec!["GET,POST /api/widgets"]);
}

#[test]
fn empty_base_path_is_no_prefix() {
    let mut group = RouteGroup::new("");
    group.record(&[Method::GET], "/health");

    assert_eq!(group.list_routes(), vec!["GET /health"]);
}

#[test]
fn pathless_rules_are_skipped() {
    let mut group = RouteGroup::new("/api");
    group.record_mount();
    group.record(&[Method::GET], "/items");
    group.record_mount();

    assert_eq!(group.list_routes(), vec!["GET /api/items"]);
}

#[test]
fn empty_method_list_renders_empty_token() {
    let rule = RouteRule::new(&[], "/weird");
    assert_eq!(rule.methods_token(), "");

    let mut group = RouteGroup::new("");
    group.record(&[], "/weird");
    assert_eq!(group.list_routes(), vec![" /weird"]);
}

#[test]
fn aggregate_concatenates_in_order() {
    let mut auth = RouteGroup::new("/api");
    auth.record(&[Method::POST], "/login");

    let mut general = RouteGroup::new("/api");
    general.record(&[Method::GET], "/items");

    let mut expected = auth.list_routes();
    expected.extend(general.list_routes());

    assert_eq!(routing::aggregate([&auth, &general]), expected);
    assert_eq!(
        routing::aggregate([&auth, &general]),
        vec!["POST /api/login", "GET /api/items"]
    );
}

#[test]
fn registry_aggregate_follows_mount_order() {
    let mut first = RouteGroup::new("/api");
    first.record(&[Method::POST], "/login");
    let mut second = RouteGroup::new("/v2");
    second.record(&[Method::GET], "/ping");

    let mut registry = routing::RouteRegistry::default();
    registry.register(first);
    registry.register(second);

    assert_eq!(registry.aggregate(), vec!["POST /api/login", "GET /v2/ping"]);
}

async fn stub() -> &'static str {
    "ok"
}

#[test]
fn routes_builder_records_what_it_registers() {
    let routes = Routes::new("/api")
        .post("/login", stub)
        .get("/items", stub)
        .route(
            "/widgets",
            &[Method::GET, Method::POST],
            routing::get(stub).post(stub),
        )
        .mount(axum::Router::new());

    assert_eq!(
        routes.list_routes(),
        vec![
            "POST /api/login",
            "GET /api/items",
            "GET,POST /api/widgets",
        ]
    );

    let (group, _router) = routes.into_parts();
    assert_eq!(group.rules().len(), 4);
    assert!(group.rules()[3].path().is_none());
}
