/// User events posted to the GUI event loop from other threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuiEvent {
    /// A render event is waiting in the presenter's mailbox.
    Wake,
}
