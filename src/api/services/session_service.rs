use crate::api::types::{SessionEvent, StateSnapshot, UserId};
use crate::modules::memory::ProfileStore;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub user_id: UserId,
    pub session_id: String,
}

struct SessionEntry {
    session_id: String,
    sender: mpsc::UnboundedSender<SessionEvent>,
}

/// Live sessions keyed by user. A user has at most one session; registering
/// again replaces the old one, whose receiver then sees the channel close.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<UserId, SessionEntry>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, user_id: impl Into<UserId>) -> (SessionHandle, mpsc::UnboundedReceiver<SessionEvent>) {
        let user_id = user_id.into();
        let session_id = uuid::Uuid::new_v4().to_string();
        let (sender, receiver) = mpsc::unbounded_channel();

        let previous = self.sessions.write().await.insert(
            user_id.clone(),
            SessionEntry {
                session_id: session_id.clone(),
                sender,
            },
        );
        if previous.is_some() {
            debug!(user_id = %user_id, "replaced existing session");
        }

        (SessionHandle { user_id, session_id }, receiver)
    }

    /// Removes the session only if `handle` is still the current one.
    pub async fn unregister(&self, handle: &SessionHandle) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get(&handle.user_id) {
            Some(entry) if entry.session_id == handle.session_id => {
                sessions.remove(&handle.user_id);
                true
            }
            _ => false,
        }
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn notify(&self, user_id: &str, notification: serde_json::Value) -> bool {
        self.send(user_id, SessionEvent::Notification(notification)).await
    }

    pub async fn publish_state(&self, user_id: &str, snapshot: StateSnapshot) -> bool {
        self.send(user_id, SessionEvent::StateUpdate(snapshot)).await
    }

    async fn send(&self, user_id: &str, event: SessionEvent) -> bool {
        let delivered = match self.sessions.read().await.get(user_id) {
            Some(entry) => entry.sender.send(event).is_ok(),
            None => return false,
        };

        if !delivered {
            self.drop_closed(&[user_id.to_string()]).await;
        }
        delivered
    }

    /// Push the current state to every live session. Returns how many
    /// sessions received an update.
    pub async fn broadcast_states(&self, store: &dyn ProfileStore) -> usize {
        let targets: Vec<(UserId, mpsc::UnboundedSender<SessionEvent>)> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(user_id, entry)| (user_id.clone(), entry.sender.clone()))
            .collect();

        let mut delivered = 0;
        let mut closed = Vec::new();

        for (user_id, sender) in targets {
            let profile = match store.get_profile_by_user(&user_id).await {
                Ok(Some(profile)) => profile,
                Ok(None) => continue,
                Err(e) => {
                    warn!(user_id = %user_id, error = %e, "failed to load profile for broadcast");
                    continue;
                }
            };

            let state = match store.get_state(&profile.id).await {
                Ok(state) => state,
                Err(e) => {
                    warn!(user_id = %user_id, error = %e, "failed to load state for broadcast");
                    continue;
                }
            };

            if sender.send(SessionEvent::StateUpdate(StateSnapshot::from(&state))).is_ok() {
                delivered += 1;
            } else {
                closed.push(user_id);
            }
        }

        self.drop_closed(&closed).await;
        delivered
    }

    /// Periodic state push, stopped by aborting the returned handle.
    pub fn spawn_state_broadcast(
        self: Arc<Self>,
        store: Arc<dyn ProfileStore>,
        every: Duration,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let delivered = self.broadcast_states(store.as_ref()).await;
                debug!(delivered, "state broadcast");
            }
        })
    }

    async fn drop_closed(&self, user_ids: &[UserId]) {
        if user_ids.is_empty() {
            return;
        }
        let mut sessions = self.sessions.write().await;
        for user_id in user_ids {
            if sessions.get(user_id).is_some_and(|entry| entry.sender.is_closed()) {
                sessions.remove(user_id);
            }
        }
    }
}
