//! Teacher (supervisor) model.

/// A teacher available for supervision duty.
#[derive(Debug, Clone, PartialEq)]
pub struct Teacher {
    /// Full name, unique across the roster.
    pub name: String,
    /// Maximum supervision hours for the exam period.
    pub load_cap: f64,
    /// Academic grade, informational only.
    pub grade: String,
}

impl Teacher {
    /// Creates a teacher with the given hourly load cap.
    pub fn new(name: impl Into<String>, load_cap: f64) -> Self {
        Self {
            name: name.into(),
            load_cap,
            grade: String::new(),
        }
    }

    /// Sets the grade.
    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = grade.into();
        self
    }

    /// Whether `hours + duration` stays within the cap.
    #[inline]
    pub fn can_take(&self, hours: f64, duration: f64) -> bool {
        hours + duration <= self.load_cap
    }
}
