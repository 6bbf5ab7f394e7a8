use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Json, Router,
};
use service::gallery::MAX_IMAGE_BYTES;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::{ServerState, IMAGES_PREFIX};

pub mod auth;
pub mod blog;
pub mod gallery;
pub mod guestbook;
pub mod microblog;
pub mod polls;
pub mod products;
pub mod shortener;
pub mod todos;
pub mod weather;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Compose all ten project surfaces onto one router.
pub fn build_router(cors: CorsLayer, state: ServerState, upload_dir: &str) -> Router {
    let api = Router::new()
        // todo list
        .route("/api/todos", get(todos::list).post(todos::create))
        .route("/api/todos/clear-completed", delete(todos::clear_completed))
        .route(
            "/api/todos/:id",
            axum::routing::patch(todos::toggle).put(todos::rename).delete(todos::delete),
        )
        // minimalist blog
        .route("/api/posts", get(blog::list))
        .route("/api/posts/:slug", get(blog::get_by_slug))
        // weather proxy
        .route("/api/weather", get(weather::by_coords))
        .route("/api/weather/:city", get(weather::by_city))
        .route("/api/forecast/:city", get(weather::forecast))
        // url shortener
        .route("/api/shorten", post(shortener::shorten))
        .route("/api/stats/:code", get(shortener::stats))
        // polls
        .route("/api/poll", get(polls::list))
        .route("/api/poll/create", post(polls::create))
        .route("/api/poll/vote", post(polls::vote))
        .route("/api/poll/:id", get(polls::get))
        // image gallery
        // multipart overhead on top of the image cap
        .route(
            "/api/upload",
            post(gallery::upload).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 64 * 1024)),
        )
        .route("/api/images", get(gallery::list))
        .route("/api/images/:filename", delete(gallery::delete))
        // guestbook
        .route("/api/entries", get(guestbook::list).post(guestbook::create))
        .route("/api/entries/:id", put(guestbook::update).delete(guestbook::delete))
        // product filter
        .route("/api/products", get(products::filter))
        .route("/api/categories", get(products::categories))
        // simple auth
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/api/secret-data", get(auth::secret_data))
        .route("/api/admin-data", get(auth::admin_data))
        // microblog
        .route("/api/blog/login", post(microblog::login))
        .route("/api/blog/posts", get(microblog::list_posts).post(microblog::create_post))
        .route("/api/blog/posts/:id", delete(microblog::delete_post))
        .route(
            "/api/blog/posts/:id/like",
            post(microblog::like).delete(microblog::unlike),
        )
        .route("/api/blog/users/:username/posts", get(microblog::user_posts));

    Router::new()
        .route("/health", get(health))
        .nest_service(IMAGES_PREFIX, ServeDir::new(upload_dir))
        .merge(api)
        // shortener redirects claim the remaining top-level single segment
        .route("/:code", get(shortener::redirect))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
