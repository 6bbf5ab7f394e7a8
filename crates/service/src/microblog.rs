//! Microblog: the relational-style project. Users, posts and likes live in
//! three stores linked by integer ids, and reads join them back together.
//!
//! Referential integrity is maintained at this layer: posts and likes are
//! only created for existing rows, and deleting a post drops its likes.

use chrono::Utc;
use models::auth::{Account, Role};
use models::microblog::{validate_post_text, BlogUser, Like, MicroPost, PostView};
use tracing::info;

use crate::errors::ServiceError;
use crate::session::{Identity, SessionRegistry};
use crate::storage::{IdCounter, Keyed, MemoryStore, ResourceStore};

impl Keyed for BlogUser {
    type Id = u64;
    fn id(&self) -> u64 {
        self.id
    }
}

impl Keyed for MicroPost {
    type Id = u64;
    fn id(&self) -> u64 {
        self.id
    }
}

impl Keyed for Like {
    type Id = u64;
    fn id(&self) -> u64 {
        self.id
    }
}

pub struct MicroblogService {
    accounts: Vec<Account>,
    users: MemoryStore<BlogUser>,
    posts: MemoryStore<MicroPost>,
    likes: MemoryStore<Like>,
    sessions: SessionRegistry,
    post_ids: IdCounter,
    like_ids: IdCounter,
}

impl MicroblogService {
    /// Seed the demo accounts and their user rows up front, so every post
    /// and like always references an existing user.
    pub fn seeded() -> Self {
        let accounts = vec![
            Account { username: "user1".into(), password: "password1".into(), role: Role::User },
            Account { username: "user2".into(), password: "password2".into(), role: Role::User },
        ];
        let users = MemoryStore::seeded(
            accounts
                .iter()
                .enumerate()
                .map(|(i, a)| BlogUser { id: i as u64 + 1, username: a.username.clone() })
                .collect(),
        );
        Self {
            accounts,
            users,
            posts: MemoryStore::new(),
            likes: MemoryStore::new(),
            sessions: SessionRegistry::default(),
            post_ids: IdCounter::default(),
            like_ids: IdCounter::default(),
        }
    }

    pub fn login(&self, username: &str, password: &str) -> Result<String, ServiceError> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.username == username && a.password == password)
            .ok_or_else(|| ServiceError::Unauthenticated("incorrect username or password".into()))?;
        info!(username = %account.username, "blog login");
        Ok(self
            .sessions
            .create(Identity { username: account.username.clone(), role: account.role }))
    }

    /// Token -> user row of the session holder.
    async fn current_user(&self, token: &str) -> Result<BlogUser, ServiceError> {
        let identity = self.sessions.validate(token)?;
        self.users
            .get_by(|u| u.username == identity.username)
            .await
            .ok_or_else(|| ServiceError::not_found("user"))
    }

    pub async fn create_post(&self, token: &str, text: String) -> Result<PostView, ServiceError> {
        let user = self.current_user(token).await?;
        validate_post_text(&text)?;
        let post = MicroPost {
            id: self.post_ids.next(),
            text,
            timestamp: Utc::now(),
            owner_id: user.id,
        };
        self.posts.insert(post.clone()).await?;
        self.view(post, &user.username).await
    }

    async fn view(&self, post: MicroPost, owner_username: &str) -> Result<PostView, ServiceError> {
        let post_id = post.id;
        let like_count = self.likes.find(Box::new(move |l: &Like| l.post_id == post_id)).await?.len();
        Ok(PostView {
            id: post.id,
            text: post.text,
            timestamp: post.timestamp,
            owner_id: post.owner_id,
            owner_username: owner_username.to_string(),
            like_count: like_count as u64,
        })
    }

    async fn views(&self, posts: Vec<MicroPost>) -> Result<Vec<PostView>, ServiceError> {
        let mut out = Vec::with_capacity(posts.len());
        for post in posts {
            let owner = self
                .users
                .get(&post.owner_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("user"))?;
            out.push(self.view(post, &owner.username).await?);
        }
        Ok(out)
    }

    pub async fn list_posts(&self) -> Result<Vec<PostView>, ServiceError> {
        let posts = self.posts.list().await?;
        self.views(posts).await
    }

    pub async fn user_posts(&self, username: &str) -> Result<Vec<PostView>, ServiceError> {
        let user = self
            .users
            .get_by(|u| u.username == username)
            .await
            .ok_or_else(|| ServiceError::not_found("user"))?;
        let uid = user.id;
        let posts = self.posts.find(Box::new(move |p: &MicroPost| p.owner_id == uid)).await?;
        self.views(posts).await
    }

    /// Owner-only delete; the post's likes go with it.
    pub async fn delete_post(&self, token: &str, post_id: u64) -> Result<(), ServiceError> {
        let user = self.current_user(token).await?;
        let post = self
            .posts
            .get(&post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("post"))?;
        if post.owner_id != user.id {
            return Err(ServiceError::Forbidden("only the owner can delete a post".into()));
        }
        self.posts.remove(&post_id).await?;
        self.likes.retain(Box::new(move |l: &Like| l.post_id != post_id)).await?;
        Ok(())
    }

    pub async fn like(&self, token: &str, post_id: u64) -> Result<(), ServiceError> {
        let user = self.current_user(token).await?;
        if self.posts.get(&post_id).await?.is_none() {
            return Err(ServiceError::not_found("post"));
        }
        let uid = user.id;
        let already = self
            .likes
            .find(Box::new(move |l: &Like| l.user_id == uid && l.post_id == post_id))
            .await?;
        if !already.is_empty() {
            return Err(ServiceError::Conflict("already liked".into()));
        }
        self.likes
            .insert(Like { id: self.like_ids.next(), user_id: user.id, post_id })
            .await?;
        Ok(())
    }

    pub async fn unlike(&self, token: &str, post_id: u64) -> Result<(), ServiceError> {
        let user = self.current_user(token).await?;
        let uid = user.id;
        let mine = self
            .likes
            .find(Box::new(move |l: &Like| l.user_id == uid && l.post_id == post_id))
            .await?;
        match mine.first() {
            Some(like) => {
                self.likes.remove(&like.id).await?;
                Ok(())
            }
            None => Err(ServiceError::not_found("like")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn posts_join_owner_and_like_count() -> Result<(), anyhow::Error> {
        let svc = MicroblogService::seeded();
        let t1 = svc.login("user1", "password1")?;
        let t2 = svc.login("user2", "password2")?;

        let post = svc.create_post(&t1, "hello world".into()).await?;
        svc.like(&t2, post.id).await?;

        let feed = svc.list_posts().await?;
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].owner_username, "user1");
        assert_eq!(feed[0].like_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn double_like_is_a_conflict_and_unlike_requires_a_like() -> Result<(), anyhow::Error> {
        let svc = MicroblogService::seeded();
        let t1 = svc.login("user1", "password1")?;
        let t2 = svc.login("user2", "password2")?;
        let post = svc.create_post(&t1, "likeable".into()).await?;

        svc.like(&t2, post.id).await?;
        assert!(matches!(svc.like(&t2, post.id).await, Err(ServiceError::Conflict(_))));

        svc.unlike(&t2, post.id).await?;
        assert!(matches!(svc.unlike(&t2, post.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn only_the_owner_deletes_and_likes_go_with_the_post() -> Result<(), anyhow::Error> {
        let svc = MicroblogService::seeded();
        let t1 = svc.login("user1", "password1")?;
        let t2 = svc.login("user2", "password2")?;
        let post = svc.create_post(&t1, "mine".into()).await?;
        svc.like(&t2, post.id).await?;

        assert!(matches!(svc.delete_post(&t2, post.id).await, Err(ServiceError::Forbidden(_))));
        svc.delete_post(&t1, post.id).await?;

        assert!(svc.list_posts().await?.is_empty());
        // liking the deleted post now fails, and no orphan like remains
        assert!(matches!(svc.like(&t2, post.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn user_feed_is_scoped_to_that_user() -> Result<(), anyhow::Error> {
        let svc = MicroblogService::seeded();
        let t1 = svc.login("user1", "password1")?;
        let t2 = svc.login("user2", "password2")?;
        svc.create_post(&t1, "from user1".into()).await?;
        svc.create_post(&t2, "from user2".into()).await?;

        let feed = svc.user_posts("user1").await?;
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].text, "from user1");

        assert!(matches!(svc.user_posts("ghost").await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
