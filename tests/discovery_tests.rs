use portico::routing::Routes;
use portico::testing::TestApp;
use portico::App;

async fn stub() -> &'static str {
    "ok"
}

#[tokio::test]
async fn discovery_lists_auth_then_general_under_api() {
    let app = App::with_config(TestApp::test_config())
        .await
        .unwrap()
        .mount(Routes::new("/api").post("/login", stub))
        .mount(Routes::new("/api").get("/items", stub));
    let app = TestApp::from_app(app).await;

    let res = app.client.get(&app.url("/api")).await;

    assert_eq!(res.status, 200);
    assert_eq!(
        res.json(),
        serde_json::json!({
            "message": "Available API endpoints",
            "endpoints": ["POST /api/login", "GET /api/items"],
        })
    );
}

#[tokio::test]
async fn default_assembly_lists_all_group_rules() {
    let app = TestApp::new().await;

    let res = app.client.get(&app.url("/api")).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.json()["message"], "Available API endpoints");
    assert_eq!(
        res.json()["endpoints"],
        serde_json::json!([
            "POST /api/login",
            "POST /api/logout",
            "GET /api/session",
            "GET,POST /api/items",
            "GET /api/items/{id}",
        ])
    );
}

#[tokio::test]
async fn discovery_does_not_list_itself() {
    let app = TestApp::new().await;

    let res = app.client.get(&app.url("/api")).await;
    let endpoints = res.json()["endpoints"].clone();

    for endpoint in endpoints.as_array().unwrap() {
        assert_ne!(endpoint, "GET /api");
    }
}

#[tokio::test]
async fn mounted_subrouter_is_reachable_but_not_listed() {
    let sub = axum::Router::new().route("/extra", axum::routing::get(stub));
    let app = App::with_config(TestApp::test_config())
        .await
        .unwrap()
        .mount(Routes::new("/api").get("/items", stub).mount(sub));
    let app = TestApp::from_app(app).await;

    let listing = app.client.get(&app.url("/api")).await;
    assert_eq!(
        listing.json()["endpoints"],
        serde_json::json!(["GET /api/items"])
    );

    let extra = app.client.get(&app.url("/api/extra")).await;
    assert_eq!(extra.status, 200);
}

#[tokio::test]
async fn listing_reflects_live_registration_state() {
    // Two servers with different groups must not share listing state.
    let small = App::with_config(TestApp::test_config())
        .await
        .unwrap()
        .mount(Routes::new("/api").get("/one", stub));
    let small = TestApp::from_app(small).await;

    let large = App::with_config(TestApp::test_config())
        .await
        .unwrap()
        .mount(Routes::new("/api").get("/one", stub).get("/two", stub));
    let large = TestApp::from_app(large).await;

    assert_eq!(
        small.client.get(&small.url("/api")).await.json()["endpoints"],
        serde_json::json!(["GET /api/one"])
    );
    assert_eq!(
        large.client.get(&large.url("/api")).await.json()["endpoints"],
        serde_json::json!(["GET /api/one", "GET /api/two"])
    );
}
