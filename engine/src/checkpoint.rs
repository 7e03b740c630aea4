//! Conversation-state checkpoint store
//!
//! Cross-call continuity for a conversation is a key-value store from
//! thread id to conversation state with process lifetime. The store is a
//! trait so the backing (memory today, something durable later) is
//! swappable and testable without global state.
//!
//! The store also owns per-thread mutual exclusion: concurrent requests
//! on the same thread id must serialize, not interleave, so `lock` hands
//! out a guard the runner holds across a whole pipeline run. Distinct
//! thread ids never contend.

use crate::pipeline::AgentState;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Key-value store from thread id to conversation state.
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Fetch the last persisted state for a thread, if any.
    async fn get(&self, thread_id: &str) -> Option<AgentState>;

    /// Persist the state for a thread, replacing any previous state.
    async fn put(&self, thread_id: &str, state: AgentState);

    /// Acquire the per-thread lock. The returned guard serializes
    /// pipeline runs for this thread id until dropped.
    async fn lock(&self, thread_id: &str) -> OwnedMutexGuard<()>;
}

/// In-memory checkpoint store. Process lifetime only: no eviction, no
/// durability, no cross-process sharing.
pub struct MemoryCheckpointStore {
    states: Mutex<HashMap<String, AgentState>>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
            locks: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCheckpointStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CheckpointStore for MemoryCheckpointStore {
    async fn get(&self, thread_id: &str) -> Option<AgentState> {
        self.states.lock().await.get(thread_id).cloned()
    }

    async fn put(&self, thread_id: &str, state: AgentState) {
        self.states.lock().await.insert(thread_id.to_string(), state);
    }

    async fn lock(&self, thread_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(
                locks
                    .entry(thread_id.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_get_put_round_trip() {
        let store = MemoryCheckpointStore::new();
        assert!(store.get("t1").await.is_none());

        let state = AgentState {
            query: "How many are pending?".to_string(),
            answer: "Two.".to_string(),
            ..Default::default()
        };
        store.put("t1", state.clone()).await;

        let fetched = store.get("t1").await.unwrap();
        assert_eq!(fetched.query, state.query);
        assert_eq!(fetched.answer, state.answer);
    }

    #[tokio::test]
    async fn test_thread_isolation() {
        let store = MemoryCheckpointStore::new();

        store.put(
            "t1",
            AgentState {
                answer: "answer one".to_string(),
                ..Default::default()
            },
        )
        .await;
        store.put(
            "t2",
            AgentState {
                answer: "answer two".to_string(),
                ..Default::default()
            },
        )
        .await;

        assert_eq!(store.get("t1").await.unwrap().answer, "answer one");
        assert_eq!(store.get("t2").await.unwrap().answer, "answer two");
    }

    #[tokio::test]
    async fn test_put_replaces_state() {
        let store = MemoryCheckpointStore::new();

        store.put(
            "t1",
            AgentState {
                relevant_sheets: vec!["Checklist".to_string()],
                ..Default::default()
            },
        )
        .await;
        store.put("t1", AgentState::default()).await;

        assert!(store.get("t1").await.unwrap().relevant_sheets.is_empty());
    }

    #[tokio::test]
    async fn test_lock_serializes_same_thread() {
        let store = MemoryCheckpointStore::new();

        let guard = store.lock("t1").await;

        // Same thread id must block while the guard is held.
        assert!(timeout(Duration::from_millis(50), store.lock("t1"))
            .await
            .is_err());

        // A different thread id is unaffected.
        assert!(timeout(Duration::from_millis(50), store.lock("t2"))
            .await
            .is_ok());

        drop(guard);
        assert!(timeout(Duration::from_millis(50), store.lock("t1"))
            .await
            .is_ok());
    }
}
