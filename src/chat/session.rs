//! Session store
//!
//! Ordered list of conversations, newest first, plus the active pointer.
//! Once the store has been seeded the active pointer always names a session
//! that is present in the list.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_TITLE: &str = "New Conversation";

/// A conversation as listed in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub last_activity: DateTime<Utc>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: DEFAULT_TITLE.to_string(),
            preview: String::new(),
            last_activity: now,
        }
    }
}

/// What happened to the active pointer after a delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No session with that id
    NotFound,
    /// An inactive session was removed
    Removed,
    /// The active session was removed and another one took over
    Promoted { active_id: String },
    /// The last session was removed and a fresh one was created
    Replaced { active_id: String },
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
    active_id: Option<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fresh session at the front and make it active
    pub fn create(&mut self, now: DateTime<Utc>) -> &Session {
        let session = Session::new(now);
        self.active_id = Some(session.id.clone());
        self.sessions.insert(0, session);
        &self.sessions[0]
    }

    /// Returns false (and changes nothing) when `id` is unknown
    pub fn select(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.active_id = Some(id.to_string());
        true
    }

    pub fn delete(&mut self, id: &str, now: DateTime<Utc>) -> DeleteOutcome {
        let Some(index) = self.sessions.iter().position(|s| s.id == id) else {
            return DeleteOutcome::NotFound;
        };
        self.sessions.remove(index);

        if self.active_id.as_deref() != Some(id) {
            return DeleteOutcome::Removed;
        }

        if let Some(first) = self.sessions.first() {
            let active_id = first.id.clone();
            self.active_id = Some(active_id.clone());
            DeleteOutcome::Promoted { active_id }
        } else {
            let active_id = self.create(now).id.clone();
            DeleteOutcome::Replaced { active_id }
        }
    }

    /// Blank titles are ignored; returns whether the title changed
    pub fn rename(&mut self, id: &str, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        match self.get_mut(id) {
            Some(session) => {
                session.title = title.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_title(&mut self, id: &str, title: String) -> bool {
        self.get_mut(id).map(|s| s.title = title).is_some()
    }

    pub fn update_preview(&mut self, id: &str, text: String, timestamp: DateTime<Utc>) -> bool {
        self.get_mut(id)
            .map(|s| {
                s.preview = text;
                s.last_activity = timestamp;
            })
            .is_some()
    }

    /// Drop every session, leaving the store empty until the next `create`
    pub fn clear(&mut self) {
        self.sessions.clear();
        self.active_id = None;
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<&Session> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn list(&self) -> &[Session] {
        &self.sessions
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn store_with(n: usize) -> SessionStore {
        let mut store = SessionStore::new();
        for _ in 0..n {
            store.create(Utc::now());
        }
        store
    }

    #[test]
    fn test_create_inserts_at_front_and_activates() {
        let mut store = SessionStore::new();
        let first = store.create(Utc::now()).id.clone();
        let second = store.create(Utc::now()).id.clone();

        assert_eq!(store.list()[0].id, second);
        assert_eq!(store.list()[1].id, first);
        assert_eq!(store.active_id(), Some(second.as_str()));
        assert_eq!(store.active().unwrap().title, DEFAULT_TITLE);
        assert!(store.active().unwrap().preview.is_empty());
    }

    #[test]
    fn test_select_unknown_is_noop() {
        let mut store = store_with(2);
        let before = store.active_id().map(String::from);
        assert!(!store.select("missing"));
        assert_eq!(store.active_id().map(String::from), before);
    }

    #[test]
    fn test_delete_inactive() {
        let mut store = store_with(2);
        let inactive = store.list()[1].id.clone();
        let active = store.active_id().unwrap().to_string();

        assert_eq!(store.delete(&inactive, Utc::now()), DeleteOutcome::Removed);
        assert_eq!(store.active_id(), Some(active.as_str()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_active_promotes_first_remaining() {
        let mut store = store_with(3);
        let active = store.active_id().unwrap().to_string();
        let next = store.list()[1].id.clone();

        assert_eq!(
            store.delete(&active, Utc::now()),
            DeleteOutcome::Promoted {
                active_id: next.clone()
            }
        );
        assert_eq!(store.active_id(), Some(next.as_str()));
        assert!(store.get(&active).is_none());
    }

    #[test]
    fn test_delete_last_creates_replacement() {
        let mut store = store_with(1);
        let only = store.active_id().unwrap().to_string();

        let outcome = store.delete(&only, Utc::now());
        let DeleteOutcome::Replaced { active_id } = outcome else {
            panic!("expected replacement, got {outcome:?}");
        };
        assert_ne!(active_id, only);
        assert_eq!(store.len(), 1);
        assert_eq!(store.active_id(), Some(active_id.as_str()));
    }

    #[test]
    fn test_delete_unknown() {
        let mut store = store_with(1);
        assert_eq!(store.delete("nope", Utc::now()), DeleteOutcome::NotFound);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_rename_trims_and_ignores_blank() {
        let mut store = store_with(1);
        let id = store.active_id().unwrap().to_string();

        assert!(!store.rename(&id, "   "));
        assert_eq!(store.get(&id).unwrap().title, DEFAULT_TITLE);

        assert!(store.rename(&id, "  Trip planning "));
        assert_eq!(store.get(&id).unwrap().title, "Trip planning");

        assert!(!store.rename("missing", "x"));
    }

    #[test]
    fn test_update_preview() {
        let mut store = store_with(1);
        let id = store.active_id().unwrap().to_string();
        let at = Utc::now();

        assert!(store.update_preview(&id, "Hi there!".to_string(), at));
        let session = store.get(&id).unwrap();
        assert_eq!(session.preview, "Hi there!");
        assert_eq!(session.last_activity, at);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Create,
        Select(usize),
        Delete(usize),
        DeleteActive,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Create),
            (0usize..8).prop_map(Op::Select),
            (0usize..8).prop_map(Op::Delete),
            Just(Op::DeleteActive),
        ]
    }

    proptest! {
        #[test]
        fn prop_active_pointer_never_dangles(ops in proptest::collection::vec(arb_op(), 1..60)) {
            let mut store = store_with(1);

            for op in ops {
                match op {
                    Op::Create => {
                        let id = store.create(Utc::now()).id.clone();
                        prop_assert_eq!(store.active_id(), Some(id.as_str()));
                        prop_assert_eq!(&store.list()[0].id, &id);
                    }
                    Op::Select(i) => {
                        if let Some(id) = store.list().get(i).map(|s| s.id.clone()) {
                            prop_assert!(store.select(&id));
                        }
                    }
                    Op::Delete(i) => {
                        if let Some(id) = store.list().get(i).map(|s| s.id.clone()) {
                            store.delete(&id, Utc::now());
                            prop_assert!(store.get(&id).is_none());
                        }
                    }
                    Op::DeleteActive => {
                        let id = store.active_id().unwrap().to_string();
                        let others = store.len() - 1;
                        store.delete(&id, Utc::now());
                        prop_assert!(store.get(&id).is_none());
                        prop_assert_eq!(store.len(), others.max(1));
                    }
                }

                prop_assert!(store.len() >= 1);
                prop_assert!(store.active().is_some());
            }
        }
    }
}
