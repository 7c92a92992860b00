//! Schedule (solution) model.
//!
//! A schedule maps every session key to the set of teachers supervising it.
//! Per-session sets are reference counted and copied on write, so cloning a
//! schedule (as the GA does for every child) only copies pointers until a
//! session is actually modified.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use super::{Catalog, SessionKey};

static NO_TEACHERS: BTreeSet<String> = BTreeSet::new();

/// Session → assigned teachers.
///
/// Sets (not lists) guarantee a teacher appears at most once per session.
/// Iteration follows [`SessionKey`] order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    assignments: BTreeMap<SessionKey, Arc<BTreeSet<String>>>,
}

impl Schedule {
    /// Creates an empty schedule with no session entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schedule with an empty entry for every catalog session.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        catalog
            .keys()
            .map(|key| (key.clone(), BTreeSet::new()))
            .collect()
    }

    /// Replaces the assignment of a session.
    pub fn set(&mut self, key: SessionKey, teachers: BTreeSet<String>) {
        self.assignments.insert(key, Arc::new(teachers));
    }

    /// Assigned teachers for a session, or `None` if the key is absent.
    pub fn get(&self, key: &SessionKey) -> Option<&BTreeSet<String>> {
        self.assignments.get(key).map(|set| set.as_ref())
    }

    /// Assigned teachers for a session; absent keys read as empty.
    pub fn assigned(&self, key: &SessionKey) -> &BTreeSet<String> {
        self.get(key).unwrap_or(&NO_TEACHERS)
    }

    /// Mutable access to a session's set, copying it first if shared.
    pub fn get_mut(&mut self, key: &SessionKey) -> Option<&mut BTreeSet<String>> {
        self.assignments.get_mut(key).map(Arc::make_mut)
    }

    /// Adds a teacher to a session, creating the entry if needed.
    ///
    /// Returns `false` if the teacher was already assigned.
    pub fn assign(&mut self, key: &SessionKey, teacher: impl Into<String>) -> bool {
        let slot = self
            .assignments
            .entry(key.clone())
            .or_insert_with(|| Arc::new(BTreeSet::new()));
        Arc::make_mut(slot).insert(teacher.into())
    }

    /// Removes a teacher from a session. Returns `true` if it was assigned.
    pub fn unassign(&mut self, key: &SessionKey, teacher: &str) -> bool {
        self.get_mut(key).is_some_and(|set| set.remove(teacher))
    }

    /// Whether `teacher` supervises `key`.
    pub fn contains(&self, key: &SessionKey, teacher: &str) -> bool {
        self.assigned(key).contains(teacher)
    }

    /// Whether the schedule has an entry (possibly empty) for `key`.
    pub fn has_session(&self, key: &SessionKey) -> bool {
        self.assignments.contains_key(key)
    }

    /// Shared handle to a session's set, for structure-sharing copies.
    pub(crate) fn shared(&self, key: &SessionKey) -> Arc<BTreeSet<String>> {
        self.assignments
            .get(key)
            .cloned()
            .unwrap_or_else(|| Arc::new(BTreeSet::new()))
    }

    /// Inserts a shared set without copying it.
    pub(crate) fn set_shared(&mut self, key: SessionKey, teachers: Arc<BTreeSet<String>>) {
        self.assignments.insert(key, teachers);
    }

    /// Iterates `(key, teachers)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&SessionKey, &BTreeSet<String>)> {
        self.assignments.iter().map(|(k, v)| (k, v.as_ref()))
    }

    /// Session keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &SessionKey> {
        self.assignments.keys()
    }

    /// Number of session entries.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the schedule has no session entries.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Total number of (session, teacher) pairs.
    pub fn assignment_count(&self) -> usize {
        self.assignments.values().map(|set| set.len()).sum()
    }

    /// Hours per teacher, summed over catalog sessions.
    ///
    /// Sessions missing from the catalog contribute nothing.
    pub fn teacher_hours(&self, catalog: &Catalog) -> HashMap<String, f64> {
        let mut hours: HashMap<String, f64> = HashMap::new();
        for session in catalog.sessions() {
            for teacher in self.assigned(&session.key) {
                *hours.entry(teacher.clone()).or_insert(0.0) += session.duration;
            }
        }
        hours
    }

    /// Sessions supervised by `teacher`, in key order.
    pub fn sessions_for_teacher(&self, teacher: &str) -> Vec<&SessionKey> {
        self.iter()
            .filter(|(_, set)| set.contains(teacher))
            .map(|(key, _)| key)
            .collect()
    }

    /// Whether every catalog session has an entry.
    pub fn covers(&self, catalog: &Catalog) -> bool {
        catalog.keys().all(|key| self.has_session(key))
    }
}

impl FromIterator<(SessionKey, BTreeSet<String>)> for Schedule {
    fn from_iter<I: IntoIterator<Item = (SessionKey, BTreeSet<String>)>>(iter: I) -> Self {
        Self {
            assignments: iter
                .into_iter()
                .map(|(key, set)| (key, Arc::new(set)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Session, Teacher};
    use chrono::NaiveDate;

    fn key(day: u32, label: &str) -> SessionKey {
        SessionKey::new(NaiveDate::from_ymd_opt(2024, 6, day).unwrap(), label)
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(
            vec![
                Session::new(key(3, "S1"), 2, 1.5),
                Session::new(key(3, "S2"), 1, 1.0),
            ],
            vec![Teacher::new("A", 4.0), Teacher::new("B", 4.0)],
        )
    }

    #[test]
    fn test_for_catalog_has_every_key() {
        let catalog = sample_catalog();
        let s = Schedule::for_catalog(&catalog);
        assert_eq!(s.len(), 2);
        assert!(s.covers(&catalog));
        assert_eq!(s.assignment_count(), 0);
    }

    #[test]
    fn test_assign_is_set_semantics() {
        let mut s = Schedule::new();
        assert!(s.assign(&key(3, "S1"), "A"));
        assert!(!s.assign(&key(3, "S1"), "A"));
        assert_eq!(s.assigned(&key(3, "S1")).len(), 1);
        assert!(s.contains(&key(3, "S1"), "A"));
    }

    #[test]
    fn test_unassign() {
        let mut s = Schedule::new();
        s.assign(&key(3, "S1"), "A");
        assert!(s.unassign(&key(3, "S1"), "A"));
        assert!(!s.unassign(&key(3, "S1"), "A"));
        assert!(!s.unassign(&key(9, "S1"), "A"));
        assert!(s.has_session(&key(3, "S1")));
    }

    #[test]
    fn test_clone_is_copy_on_write() {
        let mut original = Schedule::new();
        original.assign(&key(3, "S1"), "A");
        let mut copy = original.clone();
        copy.assign(&key(3, "S1"), "B");

        assert_eq!(original.assigned(&key(3, "S1")).len(), 1);
        assert_eq!(copy.assigned(&key(3, "S1")).len(), 2);
    }

    #[test]
    fn test_missing_key_reads_empty() {
        let s = Schedule::new();
        assert!(s.get(&key(3, "S1")).is_none());
        assert!(s.assigned(&key(3, "S1")).is_empty());
    }

    #[test]
    fn test_teacher_hours() {
        let catalog = sample_catalog();
        let mut s = Schedule::for_catalog(&catalog);
        s.assign(&key(3, "S1"), "A");
        s.assign(&key(3, "S2"), "A");
        s.assign(&key(3, "S2"), "B");

        let hours = s.teacher_hours(&catalog);
        assert!((hours["A"] - 2.5).abs() < 1e-10);
        assert!((hours["B"] - 1.0).abs() < 1e-10);
        assert_eq!(s.sessions_for_teacher("A").len(), 2);
    }
}
