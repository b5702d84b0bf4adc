//! Application layer for interactive exploration.
//!
//! `ExplorerSession` owns the view and turns input into view changes and
//! render deadlines. `InteractiveController` renders snapshots of that view on
//! a background worker and hands results to a presenter port.

mod controller;
pub mod data;
pub mod errors;
pub mod events;
pub mod ports;
pub mod scheduler;
pub mod session;

pub use controller::InteractiveController;
pub use data::frame_request::FrameRequest;
pub use events::render::RenderEvent;
pub use ports::presenter::InteractiveControllerPresenterPort;
pub use session::{ExplorerSession, PointerInput, SessionConfig, SessionError, Tick};
