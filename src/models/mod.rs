//! Exam supervision domain models.
//!
//! Provides the data types for describing a supervision problem and its
//! solutions.
//!
//! | Type | Meaning |
//! |------|---------|
//! | `SessionKey` | (date, ordinal label) identity of a sitting |
//! | `Session` | A sitting with staffing need, duration, responsible teachers |
//! | `Teacher` | A supervisor with an hourly load cap |
//! | `Catalog` | Sorted, indexed sessions and teachers of one request |
//! | `Schedule` | Session → set of assigned teachers |

mod catalog;
mod schedule;
mod session;
mod teacher;

pub use catalog::Catalog;
pub use schedule::Schedule;
pub use session::{parse_ordinal, parse_session_date, Session, SessionKey};
pub use teacher::Teacher;
