use crate::controllers::interactive::events::render::RenderEvent;

/// Receives render events from the worker thread. Called off the UI thread,
/// so implementations hand the event over and return quickly.
pub trait InteractiveControllerPresenterPort: Send + Sync {
    fn present(&self, event: RenderEvent);
}
