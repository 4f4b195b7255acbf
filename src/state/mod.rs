mod app;
mod mode;
mod store;

pub use app::{AppState, MapModel, PanelContent};
pub use mode::{Mode, ModeError};
pub use store::{Store, Subscription};
