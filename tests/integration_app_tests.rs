use portico::testing::TestApp;
use portico::App;

#[tokio::test]
async fn test_route_confirms_the_server_is_up() {
    let app = TestApp::new().await;

    let res = app.client.get(&app.url("/test")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body, "App is running!");
}

#[tokio::test]
async fn static_files_are_served_from_the_public_dir() {
    let dir = std::env::temp_dir().join(format!("portico-public-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("hello.txt"), "static hello").unwrap();

    let mut config = TestApp::test_config();
    config.public_dir = dir.to_str().unwrap().to_string();

    let app = TestApp::from_app(App::with_config(config).await.unwrap()).await;

    let res = app.client.get(&app.url("/hello.txt")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body, "static hello");

    // missing asset falls through to the JSON 404
    let res = app.client.get(&app.url("/missing.txt")).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.error()["code"], "NOT_FOUND");

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn routes_win_over_the_static_fallback() {
    let app = TestApp::new().await;

    // /api/items is a route even though no such file exists
    let res = app.client.get(&app.url("/api/items")).await;
    assert_eq!(res.status, 200);
    assert!(res.is_success());
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let mut config = TestApp::test_config();
    config.max_body_size = 64;

    let app = TestApp::from_app(App::with_config(config).await.unwrap()).await;

    let big = format!(r#"{{"name":"{}"}}"#, "x".repeat(1024));
    let res = app.client.post(&app.url("/api/items"), &big).await;
    assert_eq!(res.status, 413);
}

#[tokio::test]
async fn items_crud_surface() {
    let app = TestApp::new().await;

    let list = app.client.get(&app.url("/api/items")).await;
    assert_eq!(list.status, 200);
    assert_eq!(list.data().as_array().unwrap().len(), 3);

    let one = app.client.get(&app.url("/api/items/1")).await;
    assert_eq!(one.status, 200);
    assert_eq!(one.data()["name"], "Notebook");

    let created = app
        .client
        .post(&app.url("/api/items"), r#"{"name":"Desk"}"#)
        .await;
    assert_eq!(created.status, 200);
    assert_eq!(created.data()["name"], "Desk");
    assert!(created.data()["id"].as_str().unwrap().len() > 10);

    let form_created = app
        .client
        .post_form(&app.url("/api/items"), "name=Chair")
        .await;
    assert_eq!(form_created.status, 200);
    assert_eq!(form_created.data()["name"], "Chair");
}
