use std::env;

use actix_cors::Cors;
use actix_web::http::header;

use super::request_trace::REQUEST_ID_HEADER;

const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Origins from a comma-separated list; blank, `null` and non-http(s)
/// entries are dropped.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}

/// CORS for the GraphQL endpoint, origins from `CORS_ALLOWED_ORIGINS`.
pub fn cors_middleware() -> Cors {
    let mut origins = parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());
    if origins.is_empty() {
        origins = DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![header::HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(&origin);
    }
    cors
}
