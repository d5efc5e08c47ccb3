//!  Storage is organized through [session_storage::SessionStorageImpl].
//!  The basic idea is:
//!   - There is a directory with all the sessions.
//!   - Sessions are stored in day files, one per local calendar day.
//!   - Every line of a day file is one completed [entities::FocusSession].
//!
//!  Daily focus tasks live next to it in [task_storage::TaskStorageImpl].

pub mod entities;
pub mod session_storage;
pub mod task_storage;
