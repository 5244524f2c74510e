pub mod event;
pub mod matcher;
mod session;
pub mod state;
pub mod store;

pub use event::{Event, EventDraft, EventId};
pub use matcher::{match_day, DayMatch};
pub use session::{DayRow, InvitedSession};
pub use state::{Action, Effect, Rejection, ViewMode, ViewModeKind};
pub use store::EventStore;
