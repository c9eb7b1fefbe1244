use portico::controllers::{api, auth};
use portico::{App, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env first so ENVIRONMENT can pick the log format.
    let _ = dotenvy::dotenv();
    if std::env::var("ENVIRONMENT").as_deref() == Ok("production") {
        portico::init_logging_json();
    } else {
        portico::init_logging();
    }

    let config = Config::from_env()?;
    let app = App::with_config(config)
        .await?
        .mount(auth::routes())
        .mount(api::routes());

    app.run().await
}
