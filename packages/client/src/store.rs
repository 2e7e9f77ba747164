//! Observable application store.
//!
//! Holds the [`AppState`] and publishes a [`StoreChange`] after every mutation
//! that actually changed something. Change detection compares the whole state
//! before and after the mutating closure, so edits nested inside a team are
//! observed the same way as top-level assignments.

use thiserror::Error;
use tokio::sync::{Mutex, mpsc::UnboundedReceiver};

use crate::{
    domain::{AppState, Team, TeamId, Token, TrackedField, Username, View},
    event_bus::EventBus,
};

/// Notification published after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    /// Monotonic revision of the state after this mutation (starts at 1)
    pub revision: u64,
    /// Persisted fields that changed
    pub fields: Vec<TrackedField>,
    /// Whether the navigation target changed
    pub navigation_changed: bool,
}

impl StoreChange {
    /// Whether this change touched anything that is persisted
    pub fn requires_save(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// Errors returned by store operations that address a team
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Team not found: {0}")]
    TeamNotFound(TeamId),
}

struct Inner {
    state: AppState,
    revision: u64,
}

/// In-memory application state with change notification.
pub struct ObservableStore {
    inner: Mutex<Inner>,
    changes: EventBus<StoreChange>,
}

impl ObservableStore {
    /// Create a store holding the default state
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    /// Create a store holding `state`
    pub fn with_state(state: AppState) -> Self {
        Self {
            inner: Mutex::new(Inner { state, revision: 0 }),
            changes: EventBus::new(),
        }
    }

    /// Clone of the current state
    pub async fn snapshot(&self) -> AppState {
        self.inner.lock().await.state.clone()
    }

    /// Project a value out of the current state
    pub async fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.lock().await.state)
    }

    /// Revision of the most recent published change (0 if none)
    pub async fn revision(&self) -> u64 {
        self.inner.lock().await.revision
    }

    /// Subscribe to change notifications.
    ///
    /// Changes arrive in the order the mutations happened.
    pub fn subscribe(&self) -> UnboundedReceiver<StoreChange> {
        self.changes.subscribe()
    }

    /// Apply `f` to the state and publish a change if the state differs afterwards.
    ///
    /// # Returns
    ///
    /// * `Some(StoreChange)` - the change that was published
    /// * `None` - `f` left the state as it was; nothing was published
    pub async fn update<F>(&self, f: F) -> Option<StoreChange>
    where
        F: FnOnce(&mut AppState),
    {
        let mut inner = self.inner.lock().await;
        let before = inner.state.clone();
        f(&mut inner.state);

        let fields = before.changed_fields(&inner.state);
        let navigation_changed = before.navigation != inner.state.navigation;
        if fields.is_empty() && !navigation_changed {
            return None;
        }

        inner.revision += 1;
        let change = StoreChange {
            revision: inner.revision,
            fields,
            navigation_changed,
        };
        tracing::debug!(
            "Store revision {} changed {:?} (navigation: {})",
            change.revision,
            change.fields,
            change.navigation_changed
        );
        // Published under the lock so subscribers see revisions in order.
        self.changes.emit(change.clone());
        Some(change)
    }

    /// Replace the whole state without publishing a change.
    ///
    /// Only the persistence layer calls this, while loading.
    pub(crate) async fn hydrate(&self, state: AppState) {
        self.inner.lock().await.state = state;
    }

    pub async fn set_username(&self, username: Option<Username>) -> Option<StoreChange> {
        self.update(|s| s.username = username).await
    }

    pub async fn set_token(&self, token: Option<Token>) -> Option<StoreChange> {
        self.update(|s| s.token = token).await
    }

    pub async fn set_admin(&self, admin: bool) -> Option<StoreChange> {
        self.update(|s| s.admin = admin).await
    }

    /// Point `current_team` at a team id (or clear it)
    pub async fn select_team(&self, team: Option<TeamId>) -> Option<StoreChange> {
        self.update(|s| s.current_team = team).await
    }

    pub async fn navigate(&self, view: View) -> Option<StoreChange> {
        self.update(|s| s.navigation = view).await
    }

    /// Append a team, replacing any existing team with the same id in place
    pub async fn add_team(&self, team: Team) -> Option<StoreChange> {
        self.update(|s| match s.team_mut(&team.id) {
            Some(existing) => *existing = team,
            None => s.teams.push(team),
        })
        .await
    }

    /// Mutate one team in place.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TeamNotFound` if no team has the given id
    pub async fn update_team<F>(&self, id: &TeamId, f: F) -> Result<Option<StoreChange>, StoreError>
    where
        F: FnOnce(&mut Team),
    {
        let mut found = false;
        let change = self
            .update(|s| {
                if let Some(team) = s.team_mut(id) {
                    found = true;
                    f(team);
                }
            })
            .await;

        if found {
            Ok(change)
        } else {
            Err(StoreError::TeamNotFound(id.clone()))
        }
    }

    /// Remove a team, clearing `current_team` if it referenced it
    pub async fn remove_team(&self, id: &TeamId) -> Option<StoreChange> {
        self.update(|s| {
            s.teams.retain(|t| &t.id != id);
            if s.current_team.as_ref() == Some(id) {
                s.current_team = None;
            }
        })
        .await
    }

    /// Drop the session: username, token and team selection are cleared
    /// and navigation returns to the login view
    pub async fn logout(&self) -> Option<StoreChange> {
        self.update(|s| {
            s.username = None;
            s.token = None;
            s.current_team = None;
            s.navigation = View::Login;
        })
        .await
    }
}

impl Default for ObservableStore {
    fn default() -> Self {
        Self::new()
    }
}
