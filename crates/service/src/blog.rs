//! Minimalist blog: a seeded read-only collection of markdown posts.

use models::blog::{BlogPost, BlogSummary};

use crate::errors::ServiceError;
use crate::storage::{Keyed, MemoryStore, ResourceStore};

impl Keyed for BlogPost {
    type Id = u64;
    fn id(&self) -> u64 {
        self.id
    }
}

pub struct BlogService {
    store: MemoryStore<BlogPost>,
}

impl BlogService {
    pub fn new(posts: Vec<BlogPost>) -> Self {
        Self { store: MemoryStore::seeded(posts) }
    }

    /// Built-in demo content.
    pub fn seeded() -> Self {
        Self::new(vec![
            BlogPost {
                id: 1,
                slug: "first-post".into(),
                title: "My first post".into(),
                content: "## Hello\n\nThis blog is about web development.\n\n- HTML\n- CSS\n- JavaScript".into(),
                author: "Bigazy".into(),
                date: "2025-07-10".into(),
                category: "News".into(),
            },
            BlogPost {
                id: 2,
                slug: "rust-on-the-backend".into(),
                title: "Rust on the backend".into(),
                content: "### Why Rust\n\nSmall binaries, no runtime, honest error handling.\n\n```bash\ncargo run\n```".into(),
                author: "Bigazy".into(),
                date: "2025-07-10".into(),
                category: "Web".into(),
            },
            BlogPost {
                id: 3,
                slug: "why-i-like-typed-apis".into(),
                title: "Why I like typed APIs".into(),
                content: "## Typed all the way down\n\nRequest shapes that cannot lie are half the documentation.".into(),
                author: "Bigazy".into(),
                date: "2025-07-10".into(),
                category: "Programming".into(),
            },
        ])
    }

    /// Listing view without post bodies.
    pub async fn list(&self) -> Result<Vec<BlogSummary>, ServiceError> {
        let posts = self.store.list().await?;
        Ok(posts.iter().map(BlogSummary::from).collect())
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<BlogPost, ServiceError> {
        self.store
            .get_by(|p| p.slug == slug)
            .await
            .ok_or_else(|| ServiceError::not_found("post"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn summaries_do_not_leak_content() -> Result<(), anyhow::Error> {
        let svc = BlogService::seeded();
        let list = svc.list().await?;
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].slug, "first-post");
        Ok(())
    }

    #[tokio::test]
    async fn slug_lookup_finds_full_post() -> Result<(), anyhow::Error> {
        let svc = BlogService::seeded();
        let post = svc.get_by_slug("rust-on-the-backend").await?;
        assert!(post.content.contains("cargo run"));

        assert!(matches!(svc.get_by_slug("missing").await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
