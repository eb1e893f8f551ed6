//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* state and turns it into cells on the
//! terminal.  The scroll container lives here too, since it is measured in
//! terminal rows.

pub mod home;
pub mod layout;
pub mod search;
pub mod smooth_scroll;
pub mod spinner;
pub mod theme;
pub mod thread;
pub mod viewport;
