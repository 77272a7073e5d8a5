use std::process;
use std::thread;
use std::time::Duration;

use gazette_base::pal::http::HttpServerConfig;
use gazette_base::tracing::init_tracing;
use gazette_base::{Pal, PalHandle, RealPal};
use gazette_engine::api::ApiService;
use gazette_engine::config::Config;
use gazette_engine::store::open_store;
use tracing::info;

fn main() {
    init_tracing().unwrap();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    let store = match open_store(&config.database) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: Unable to open store {}: {}", config.database, e);
            process::exit(1);
        }
    };

    let pal = PalHandle::new(RealPal::new());
    let service = ApiService::new(store);
    let server_config = HttpServerConfig::new("0.0.0.0").with_port(config.port);
    let handle = match pal.start_http_server(Box::new(service), server_config) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: Unable to start HTTP server: {}", e);
            process::exit(1);
        }
    };

    info!(port = handle.port(), database = %config.database, "gazette is listening");
    println!("Gazette is listening on port {}", handle.port());

    while !handle.is_shutdown() {
        thread::sleep(Duration::from_millis(100));
    }
}
