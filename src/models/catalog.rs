//! Session/teacher catalog.
//!
//! Normalized, read-only view of one scheduling request: sessions sorted by
//! key and teachers indexed by name. Built once, then shared by every stage.

use std::collections::HashMap;

use super::{Session, SessionKey, Teacher};

/// Indexed sessions and teachers for one request.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    sessions: Vec<Session>,
    teachers: Vec<Teacher>,
    session_index: HashMap<SessionKey, usize>,
    teacher_index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog.
    ///
    /// Sessions are sorted by key; teachers keep their input order. When a
    /// key or name repeats, the first occurrence wins (input validation
    /// reports duplicates before this point).
    pub fn new(sessions: Vec<Session>, teachers: Vec<Teacher>) -> Self {
        let mut sorted = sessions;
        sorted.sort_by(|a, b| a.key.cmp(&b.key));
        sorted.dedup_by(|later, earlier| later.key == earlier.key);

        let session_index = sorted
            .iter()
            .enumerate()
            .map(|(i, s)| (s.key.clone(), i))
            .collect();

        let mut unique_teachers: Vec<Teacher> = Vec::with_capacity(teachers.len());
        let mut teacher_index = HashMap::with_capacity(teachers.len());
        for teacher in teachers {
            if !teacher_index.contains_key(&teacher.name) {
                teacher_index.insert(teacher.name.clone(), unique_teachers.len());
                unique_teachers.push(teacher);
            }
        }

        Self {
            sessions: sorted,
            teachers: unique_teachers,
            session_index,
            teacher_index,
        }
    }

    /// Sessions in key order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Teachers in roster order.
    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// Session keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &SessionKey> {
        self.sessions.iter().map(|s| &s.key)
    }

    /// Teacher names in roster order.
    pub fn teacher_names(&self) -> impl Iterator<Item = &str> {
        self.teachers.iter().map(|t| t.name.as_str())
    }

    /// Looks up a session by key.
    pub fn session(&self, key: &SessionKey) -> Option<&Session> {
        self.position(key).map(|i| &self.sessions[i])
    }

    /// Index of a session in key order.
    pub fn position(&self, key: &SessionKey) -> Option<usize> {
        self.session_index.get(key).copied()
    }

    /// Looks up a teacher by name.
    pub fn teacher(&self, name: &str) -> Option<&Teacher> {
        self.teacher_index.get(name).map(|&i| &self.teachers[i])
    }

    /// Load cap for `name`. Unknown teachers have a cap of zero, which makes
    /// them unassignable rather than an error.
    pub fn load_cap(&self, name: &str) -> f64 {
        self.teacher(name).map(|t| t.load_cap).unwrap_or(0.0)
    }

    /// Number of sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Number of teachers.
    pub fn teacher_count(&self) -> usize {
        self.teachers.len()
    }

    /// Whether there is nothing to schedule.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Total supervisor seats requested across all sessions.
    pub fn total_required(&self) -> usize {
        self.sessions.iter().map(|s| s.required).sum()
    }
}
