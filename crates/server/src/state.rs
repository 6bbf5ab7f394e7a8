use std::sync::Arc;

use axum::http::HeaderMap;
use configs::AppConfig;
use models::guestbook::GuestbookEntry;
use models::poll::Poll;
use service::{
    auth::AuthService,
    blog::BlogService,
    gallery::GalleryService,
    guestbook::GuestbookService,
    microblog::MicroblogService,
    poll::PollService,
    product::ProductService,
    shortener::ShortenerService,
    storage::JsonArrayStore,
    weather::WeatherClient,
};

use crate::errors::ApiError;

/// URL path the uploaded images are served under.
pub const IMAGES_PREFIX: &str = "/static/images";

/// All ten project services behind one shared state.
#[derive(Clone)]
pub struct ServerState {
    pub todos: Arc<service::todo::TodoService>,
    pub blog: Arc<BlogService>,
    pub weather: Arc<WeatherClient>,
    pub shortener: Arc<ShortenerService>,
    pub polls: Arc<PollService<JsonArrayStore<Poll>>>,
    pub gallery: Arc<GalleryService>,
    pub guestbook: Arc<GuestbookService<JsonArrayStore<GuestbookEntry>>>,
    pub products: Arc<ProductService>,
    pub auth: Arc<AuthService>,
    pub microblog: Arc<MicroblogService>,
}

impl ServerState {
    /// Construct every service from configuration. The two file-backed
    /// stores load their JSON files here; everything else starts fresh.
    pub async fn build(cfg: &AppConfig) -> anyhow::Result<Self> {
        let data_dir = cfg.data.dir.trim_end_matches('/');
        let base_url = format!("http://{}:{}", cfg.server.host, cfg.server.port);

        let polls = PollService::new(JsonArrayStore::new(format!("{data_dir}/polls.json")).await?)
            .await?;
        let guestbook = GuestbookService::new(
            JsonArrayStore::new(format!("{data_dir}/guestbook.json")).await?,
        );

        Ok(Self {
            todos: Arc::new(service::todo::TodoService::new()),
            blog: Arc::new(BlogService::seeded()),
            weather: Arc::new(WeatherClient::new(
                cfg.weather.api_key.clone(),
                cfg.weather.base_url.clone(),
            )),
            shortener: Arc::new(ShortenerService::new(base_url)),
            polls: Arc::new(polls),
            gallery: Arc::new(GalleryService::new(cfg.data.upload_dir.clone(), IMAGES_PREFIX)),
            guestbook: Arc::new(guestbook),
            products: Arc::new(ProductService::seeded()),
            auth: Arc::new(AuthService::seeded()),
            microblog: Arc::new(MicroblogService::seeded()),
        })
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthenticated("missing bearer token"))?;
    value
        .strip_prefix("Bearer ")
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::unauthenticated("missing bearer token"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    #[test]
    fn bearer_extraction_accepts_only_well_formed_headers() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_err());

        headers.insert(AUTHORIZATION, "Token abc".parse().unwrap());
        assert!(bearer_token(&headers).is_err());

        headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
        assert!(bearer_token(&headers).is_err());

        headers.insert(AUTHORIZATION, "Bearer abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers).unwrap(), "abc123");
    }
}
