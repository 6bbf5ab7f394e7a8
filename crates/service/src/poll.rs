//! Polls with per-option vote tallies, persisted through any store.
//!
//! Production wires this to a `JsonArrayStore` over `polls.json`; tests
//! run it against memory.

use models::poll::{validate_poll, Poll, PollCreate, PollOption, PollSummary, VoteRequest};

use crate::errors::ServiceError;
use crate::storage::{IdCounter, Keyed, ResourceStore};

impl Keyed for Poll {
    type Id = String;
    fn id(&self) -> String {
        self.id.clone()
    }
}

pub struct PollService<S> {
    store: S,
    ids: IdCounter,
}

impl<S: ResourceStore<Poll>> PollService<S> {
    /// The id counter resumes after the highest persisted id so reloads
    /// never reissue one.
    pub async fn new(store: S) -> Result<Self, ServiceError> {
        let highest = store
            .list()
            .await?
            .iter()
            .filter_map(|p| p.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Ok(Self { store, ids: IdCounter::starting_at(highest + 1) })
    }

    pub async fn create(&self, create: PollCreate) -> Result<String, ServiceError> {
        validate_poll(&create)?;
        let poll = Poll {
            id: self.ids.next().to_string(),
            question: create.question,
            options: create
                .options
                .into_iter()
                .map(|option| PollOption { option, votes: 0 })
                .collect(),
        };
        self.store.insert(poll).await
    }

    pub async fn get(&self, id: &str) -> Result<Poll, ServiceError> {
        self.store
            .get(&id.to_string())
            .await?
            .ok_or_else(|| ServiceError::not_found("poll"))
    }

    pub async fn vote(&self, vote: VoteRequest) -> Result<(), ServiceError> {
        let poll = self.get(&vote.poll_id).await?;
        if !poll.options.iter().any(|o| o.option == vote.option) {
            return Err(ServiceError::Validation("no such option".into()));
        }
        let option = vote.option;
        self.store
            .update(
                &vote.poll_id,
                Box::new(move |p: &mut Poll| {
                    if let Some(o) = p.options.iter_mut().find(|o| o.option == option) {
                        o.votes += 1;
                    }
                }),
            )
            .await?;
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<PollSummary>, ServiceError> {
        let polls = self.store.list().await?;
        Ok(polls
            .into_iter()
            .map(|p| PollSummary { id: p.id, question: p.question })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonArrayStore, MemoryStore};
    use uuid::Uuid;

    fn yes_no() -> PollCreate {
        PollCreate { question: "Ship it?".into(), options: vec!["yes".into(), "no".into()] }
    }

    #[tokio::test]
    async fn two_yes_votes_tally_correctly() -> Result<(), anyhow::Error> {
        let svc = PollService::new(MemoryStore::new()).await?;
        let id = svc.create(yes_no()).await?;

        svc.vote(VoteRequest { poll_id: id.clone(), option: "yes".into() }).await?;
        svc.vote(VoteRequest { poll_id: id.clone(), option: "yes".into() }).await?;

        let poll = svc.get(&id).await?;
        assert_eq!(poll.options[0].votes, 2);
        assert_eq!(poll.options[1].votes, 0);
        Ok(())
    }

    #[tokio::test]
    async fn one_option_poll_is_rejected() -> Result<(), anyhow::Error> {
        let svc = PollService::new(MemoryStore::new()).await?;
        let err = svc
            .create(PollCreate { question: "Solo?".into(), options: vec!["only".into()] })
            .await;
        assert!(matches!(err, Err(ServiceError::Model(_))));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_option_and_poll_fail_cleanly() -> Result<(), anyhow::Error> {
        let svc = PollService::new(MemoryStore::new()).await?;
        let id = svc.create(yes_no()).await?;

        let err = svc.vote(VoteRequest { poll_id: id, option: "maybe".into() }).await;
        assert!(matches!(err, Err(ServiceError::Validation(_))));

        let err = svc.vote(VoteRequest { poll_id: "404".into(), option: "yes".into() }).await;
        assert!(matches!(err, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn votes_survive_a_reload_of_the_file_store() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("polls_{}.json", Uuid::new_v4()));

        let svc = PollService::new(JsonArrayStore::new(&tmp).await?).await?;
        let id = svc.create(yes_no()).await?;
        svc.vote(VoteRequest { poll_id: id.clone(), option: "no".into() }).await?;

        let svc = PollService::new(JsonArrayStore::<Poll>::new(&tmp).await?).await?;
        let poll = svc.get(&id).await?;
        assert_eq!(poll.options[1].votes, 1);

        // a poll created after reload gets a fresh id
        let id2 = svc.create(yes_no()).await?;
        assert_ne!(id, id2);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
