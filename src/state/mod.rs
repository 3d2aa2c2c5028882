//! Application state and its persistence
//!
//! `AppState` only changes through `reduce`, a pure `(state, action) -> state`
//! transform. `ProfileStore` owns the current state, applies actions and
//! writes a full snapshot through a `SnapshotStore` after every transform.

pub mod snapshot;

pub use snapshot::{FileSnapshotStore, InMemorySnapshotStore, SnapshotStore};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::PlannerError;
use crate::finance::{default_budget, require_non_negative};
use crate::models::{Budget, ChatMessage, Goal, Profile};
use crate::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
}

impl AppState {
    pub fn goals(&self) -> &[Goal] {
        self.profile.as_ref().map(|p| p.goals.as_slice()).unwrap_or(&[])
    }

    /// The stored budget, or one derived from income when none was saved.
    pub fn effective_budget(&self) -> Option<Budget> {
        self.budget
            .or_else(|| self.profile.as_ref().and_then(|p| default_budget(p.income).ok()))
    }
}

/// The closed set of state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetProfile(Profile),
    SetBudget(Budget),
    AddGoal(Goal),
    UpdateGoal(Goal),
    AppendChatMessage(ChatMessage),
    ReplaceState(AppState),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetProfile(_) => "set_profile",
            Action::SetBudget(_) => "set_budget",
            Action::AddGoal(_) => "add_goal",
            Action::UpdateGoal(_) => "update_goal",
            Action::AppendChatMessage(_) => "append_chat_message",
            Action::ReplaceState(_) => "replace_state",
        }
    }
}

/// Applies `action` to `state`, returning the next state.
///
/// Goal actions are no-ops without a profile; `AddGoal` with an existing id
/// and `UpdateGoal` with an unknown id leave the state as it was. Saving a
/// profile whose income differs from the previous one re-derives the budget.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    match action {
        Action::SetProfile(profile) => {
            let income_changed = state
                .profile
                .as_ref()
                .map(|previous| previous.income != profile.income)
                .unwrap_or(true);

            let budget = if income_changed || state.budget.is_none() {
                default_budget(profile.income).ok()
            } else {
                state.budget
            };

            AppState {
                profile: Some(profile),
                budget,
                chat_history: state.chat_history.clone(),
            }
        }
        Action::SetBudget(budget) => AppState {
            budget: Some(budget),
            ..state.clone()
        },
        Action::AddGoal(goal) => {
            let mut next = state.clone();
            if let Some(profile) = next.profile.as_mut() {
                if profile.goal(&goal.id).is_none() {
                    profile.goals.push(goal);
                }
            }
            next
        }
        Action::UpdateGoal(goal) => {
            let mut next = state.clone();
            if let Some(existing) = next
                .profile
                .as_mut()
                .and_then(|p| p.goals.iter_mut().find(|g| g.id == goal.id))
            {
                *existing = goal;
            }
            next
        }
        Action::AppendChatMessage(message) => {
            let mut next = state.clone();
            next.chat_history.push(message);
            next
        }
        Action::ReplaceState(replacement) => replacement,
    }
}

/// Rejects profiles with negative or non-finite money fields, or duplicate
/// goal ids.
pub fn validate_profile(profile: &Profile) -> Result<()> {
    require_non_negative("income", profile.income)?;
    require_non_negative("expenses", profile.expenses)?;
    require_non_negative("debts", profile.debts)?;
    require_non_negative("savings", profile.savings)?;
    for (code, amount) in profile.deductions.iter() {
        require_non_negative(code, amount)?;
    }

    let mut seen = HashSet::with_capacity(profile.goals.len());
    for goal in &profile.goals {
        validate_goal(goal)?;
        if !seen.insert(goal.id.as_str()) {
            return Err(PlannerError::invalid(format!("duplicate goal id {}", goal.id)));
        }
    }
    Ok(())
}

fn validate_goal(goal: &Goal) -> Result<()> {
    require_non_negative("goal amount", goal.target_amount)?;
    if !(0.0..=100.0).contains(&goal.progress) {
        return Err(PlannerError::invalid(format!(
            "goal progress must be between 0 and 100, got {}",
            goal.progress
        )));
    }
    Ok(())
}

/// Parses a persisted snapshot.
pub fn decode_snapshot(raw: &str) -> Result<AppState> {
    Ok(serde_json::from_str(raw)?)
}

pub fn encode_snapshot(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// SHA-256 of the serialized state, hex encoded. Empty if the state cannot
/// be serialized.
pub fn fingerprint(state: &AppState) -> String {
    let mut hasher = Sha256::new();

    if let Err(error) = serde_json::to_writer(&mut HashWriter(&mut hasher), state) {
        warn!("Failed to serialize state for fingerprint: {}", error);
        return String::new();
    }

    hex::encode(hasher.finalize())
}

/// Adapter to allow writing into Sha256 via std::io::Write
struct HashWriter<'a, H: Digest>(&'a mut H);

impl<'a, H: Digest> Write for HashWriter<'a, H> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Holds the current state and mirrors it to durable storage.
pub struct ProfileStore {
    state: Arc<AppState>,
    storage: Arc<dyn SnapshotStore>,
    key: String,
}

impl ProfileStore {
    /// Restores the snapshot under `key`. A missing or unreadable snapshot
    /// starts from the empty state.
    pub async fn load(storage: Arc<dyn SnapshotStore>, key: impl Into<String>) -> Self {
        let key = key.into();

        let state = match storage.read(&key).await {
            Ok(Some(raw)) => match decode_snapshot(&raw) {
                Ok(state) => {
                    info!(
                        key = %key,
                        has_profile = state.profile.is_some(),
                        messages = state.chat_history.len(),
                        "Restored saved state"
                    );
                    state
                }
                Err(error) => {
                    warn!(key = %key, "Failed to load saved state, starting fresh: {}", error);
                    AppState::default()
                }
            },
            Ok(None) => {
                info!(key = %key, "No saved state found");
                AppState::default()
            }
            Err(error) => {
                warn!(key = %key, "Snapshot storage unreadable, starting fresh: {}", error);
                AppState::default()
            }
        };

        Self {
            state: Arc::new(state),
            storage,
            key,
        }
    }

    /// Handle to the current state. Compare with `Arc::ptr_eq` to detect
    /// whether a dispatch changed anything.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn current(&self) -> &AppState {
        &self.state
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn fingerprint(&self) -> String {
        fingerprint(&self.state)
    }

    /// Applies `action` and persists the result. Storage failures are logged
    /// and otherwise ignored.
    pub async fn dispatch(&mut self, action: Action) -> Arc<AppState> {
        let name = action.name();
        let next = reduce(&self.state, action);

        if next == *self.state {
            debug!(action = name, "Action left state unchanged");
        } else {
            debug!(action = name, "State updated");
            self.state = Arc::new(next);
        }

        self.persist().await;
        self.state()
    }

    pub async fn save_profile(&mut self, profile: Profile) -> Result<Arc<AppState>> {
        validate_profile(&profile)?;
        Ok(self.dispatch(Action::SetProfile(profile)).await)
    }

    pub async fn set_budget(&mut self, budget: Budget) -> Result<Arc<AppState>> {
        require_non_negative("essentials", budget.essentials)?;
        require_non_negative("wants", budget.wants)?;
        require_non_negative("savings", budget.savings)?;
        Ok(self.dispatch(Action::SetBudget(budget)).await)
    }

    pub async fn add_goal(&mut self, goal: Goal) -> Result<Arc<AppState>> {
        validate_goal(&goal)?;
        if self.state.profile.is_none() {
            warn!(goal_id = %goal.id, "Goal added before a profile exists, ignoring");
        } else if self.state.goals().iter().any(|g| g.id == goal.id) {
            return Err(PlannerError::invalid(format!("duplicate goal id {}", goal.id)));
        }
        Ok(self.dispatch(Action::AddGoal(goal)).await)
    }

    /// Replaces the goal with the same id. An unknown id is a no-op.
    pub async fn update_goal(&mut self, goal: Goal) -> Result<Arc<AppState>> {
        validate_goal(&goal)?;
        if !self.state.goals().iter().any(|g| g.id == goal.id) {
            debug!(goal_id = %goal.id, "No goal with this id, update skipped");
        }
        Ok(self.dispatch(Action::UpdateGoal(goal)).await)
    }

    pub async fn append_chat_message(&mut self, message: ChatMessage) -> Arc<AppState> {
        self.dispatch(Action::AppendChatMessage(message)).await
    }

    pub async fn replace_state(&mut self, state: AppState) -> Arc<AppState> {
        self.dispatch(Action::ReplaceState(state)).await
    }

    async fn persist(&self) {
        let encoded = match encode_snapshot(&self.state) {
            Ok(encoded) => encoded,
            Err(error) => {
                warn!(key = %self.key, "Failed to serialize state: {}", error);
                return;
            }
        };

        if let Err(error) = self.storage.write(&self.key, &encoded).await {
            warn!(key = %self.key, "Snapshot write failed: {}", error);
        }
    }
}
