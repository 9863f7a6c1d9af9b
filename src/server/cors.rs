//! Permissive CORS for the map client, same shape as the teacher's own
//! `cors_middleware` helper: this core is served to a browser SPA on a
//! different origin during local development, so every origin is
//! allowed rather than pinned to one deployment host.

use actix_cors::Cors;

pub fn cors_middleware() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}
