use serde::{Deserialize, Serialize};

/// Full article as stored; `content` is markdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: String,
    pub category: String,
}

/// Listing view without the body.
#[derive(Debug, Clone, Serialize)]
pub struct BlogSummary {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub author: String,
    pub date: String,
    pub category: String,
}

impl From<&BlogPost> for BlogSummary {
    fn from(p: &BlogPost) -> Self {
        Self {
            id: p.id,
            slug: p.slug.clone(),
            title: p.title.clone(),
            author: p.author.clone(),
            date: p.date.clone(),
            category: p.category.clone(),
        }
    }
}
