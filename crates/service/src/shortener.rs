//! URL shortener over a code-keyed in-memory store.

use chrono::{DateTime, Duration, Utc};
use models::shortener::{
    validate_custom_code, validate_long_url, LinkStats, ShortLink, ShortenRequest, ShortenResponse,
};
use rand::{distributions::Alphanumeric, Rng};
use tracing::debug;

use crate::errors::ServiceError;
use crate::storage::{Keyed, MemoryStore, ResourceStore};

impl Keyed for ShortLink {
    type Id = String;
    fn id(&self) -> String {
        self.code.clone()
    }
}

const CODE_LEN: usize = 6;
const MAX_GENERATE_ATTEMPTS: usize = 16;
pub const LINK_TTL_DAYS: i64 = 7;

pub struct ShortenerService {
    store: MemoryStore<ShortLink>,
    base_url: String,
}

impl ShortenerService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { store: MemoryStore::new(), base_url: base_url.into() }
    }

    fn generate_code() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(CODE_LEN)
            .map(char::from)
            .collect()
    }

    /// Create a short link. A taken custom code is a conflict; generated
    /// codes regenerate on collision, bounded so a pathological store
    /// cannot loop forever.
    pub async fn shorten(&self, req: ShortenRequest) -> Result<ShortenResponse, ServiceError> {
        validate_long_url(&req.long_url)?;

        let link = ShortLink {
            code: String::new(),
            long_url: req.long_url,
            clicks: 0,
            created_at: Utc::now(),
        };

        let code = match req.custom_code {
            Some(code) => {
                validate_custom_code(&code)?;
                self.store
                    .insert(ShortLink { code: code.clone(), ..link })
                    .await
                    .map_err(|_| ServiceError::Conflict("custom code already in use".into()))?
            }
            None => {
                let mut attempts = 0;
                loop {
                    let code = Self::generate_code();
                    match self.store.insert(ShortLink { code: code.clone(), ..link.clone() }).await {
                        Ok(code) => break code,
                        Err(ServiceError::Conflict(_)) => {
                            attempts += 1;
                            debug!(attempts, "short code collision, regenerating");
                            if attempts >= MAX_GENERATE_ATTEMPTS {
                                return Err(ServiceError::Storage(
                                    "could not find a free short code".into(),
                                ));
                            }
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
        };

        Ok(ShortenResponse {
            short_url: format!("{}/{}", self.base_url.trim_end_matches('/'), code),
            code,
            clicks: 0,
        })
    }

    /// Resolve a code to its long URL, counting the click. Expired and
    /// unknown codes both read as not found.
    pub async fn resolve(&self, code: &str) -> Result<String, ServiceError> {
        self.resolve_at(code, Utc::now()).await
    }

    async fn resolve_at(&self, code: &str, now: DateTime<Utc>) -> Result<String, ServiceError> {
        let link = self
            .store
            .get(&code.to_string())
            .await?
            .ok_or_else(|| ServiceError::not_found("short link"))?;

        if now - link.created_at > Duration::days(LINK_TTL_DAYS) {
            return Err(ServiceError::NotFound("short link expired".into()));
        }

        self.store
            .update(&code.to_string(), Box::new(|l: &mut ShortLink| l.clicks += 1))
            .await?;
        Ok(link.long_url)
    }

    pub async fn stats(&self, code: &str) -> Result<LinkStats, ServiceError> {
        let link = self
            .store
            .get(&code.to_string())
            .await?
            .ok_or_else(|| ServiceError::not_found("short link"))?;
        Ok(LinkStats { clicks: link.clicks, created_at: link.created_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(url: &str, custom: Option<&str>) -> ShortenRequest {
        ShortenRequest { long_url: url.into(), custom_code: custom.map(Into::into) }
    }

    #[tokio::test]
    async fn same_url_twice_yields_two_independent_codes() -> Result<(), anyhow::Error> {
        let svc = ShortenerService::new("http://localhost:8080");
        let a = svc.shorten(req("https://example.com", None)).await?;
        let b = svc.shorten(req("https://example.com", None)).await?;
        assert_ne!(a.code, b.code);

        assert_eq!(svc.resolve(&a.code).await?, "https://example.com");
        assert_eq!(svc.resolve(&b.code).await?, "https://example.com");
        assert_eq!(svc.stats(&a.code).await?.clicks, 1);
        assert_eq!(svc.stats(&b.code).await?.clicks, 1);
        Ok(())
    }

    #[tokio::test]
    async fn taken_custom_code_is_a_conflict() -> Result<(), anyhow::Error> {
        let svc = ShortenerService::new("http://localhost:8080");
        svc.shorten(req("https://one.example", Some("mine"))).await?;
        let err = svc.shorten(req("https://two.example", Some("mine"))).await;
        assert!(matches!(err, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn clicks_accumulate_per_resolve() -> Result<(), anyhow::Error> {
        let svc = ShortenerService::new("http://localhost:8080");
        let made = svc.shorten(req("https://example.com", Some("hits"))).await?;
        svc.resolve(&made.code).await?;
        svc.resolve(&made.code).await?;
        assert_eq!(svc.stats(&made.code).await?.clicks, 2);
        Ok(())
    }

    #[tokio::test]
    async fn expired_links_read_as_not_found() -> Result<(), anyhow::Error> {
        let svc = ShortenerService::new("http://localhost:8080");
        let made = svc.shorten(req("https://example.com", Some("old"))).await?;

        let later = Utc::now() + Duration::days(LINK_TTL_DAYS) + Duration::seconds(1);
        assert!(matches!(svc.resolve_at(&made.code, later).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn non_http_url_is_rejected() {
        let svc = ShortenerService::new("http://localhost:8080");
        assert!(svc.shorten(req("file:///etc/passwd", None)).await.is_err());
    }
}
