//! HTTP handlers and route configuration.

mod health;
mod posts;
mod submission;


use std::path::Path;

use actix_files::Files;
use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/create-post", web::post().to(posts::create_post))
        .route("/get-posts", web::get().to(posts::get_posts))
        .route("/posts/{post_id}", web::get().to(posts::get_post));
}

/// Serve static assets from `public_dir` at `/`. Must be registered after
/// [`configure_routes`], since it matches every path.
pub fn configure_static(cfg: &mut web::ServiceConfig, public_dir: &Path) {
    if public_dir.is_dir() {
        cfg.service(Files::new("/", public_dir).index_file("index.html"));
    } else {
        tracing::debug!(
            public_dir = %public_dir.display(),
            "Public directory not found, static assets disabled"
        );
    }
}
