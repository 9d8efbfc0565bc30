use std::env;

use tracing::error;

const DEFAULT_PORT: u16 = 8080;

pub fn get_host_uri() -> String {
    match env::var("HOST") {
        Ok(host) => format!("https://{host}"),
        _ => format!("http://localhost:{}", get_port()),
    }
}

pub fn get_port() -> u16 {
    parse_port(env::var("PORT").ok())
}

fn parse_port(port: Option<String>) -> u16 {
    let port = match port {
        Some(port) => port,
        _ => return DEFAULT_PORT,
    };

    match port.trim().parse::<u16>() {
        Ok(port) => port,
        _ => {
            error!("Failed to parse PORT env var, using default");
            DEFAULT_PORT
        }
    }
}
