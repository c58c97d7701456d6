//! A small server: a home page, a hello page and static files from `./static`.
//!
//! Pass a JSON configuration file as the first argument to override the defaults:
//!
//! ```text
//! cargo run --example static_server -- server.json
//! ```

use microhttp_rs::server::handler::{hello_page, home_page};
use microhttp_rs::{HttpServer, Router, ServerConfig, StaticFiles};
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::from_json_file(path)?,
        None => ServerConfig::default(),
    };

    // Routes are fixed before the server starts
    let mut router = Router::new();
    router.get("/", home_page);
    router.get("/hello", hello_page);
    router.fallback(StaticFiles::new(&config.document_root));

    info!("Starting server on http://{}", config.addr);

    let server = HttpServer::new(config, router);
    server.start().await?;

    Ok(())
}
