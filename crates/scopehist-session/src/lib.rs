pub mod controller;
pub mod record;
pub mod state;
pub mod toggle;

pub use controller::SessionController;
pub use record::SessionRecord;
pub use state::SessionState;
pub use toggle::{Mode, Notice};
