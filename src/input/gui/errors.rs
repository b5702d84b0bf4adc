use crate::controllers::interactive::session::SessionError;

#[derive(Debug, thiserror::Error)]
pub enum GuiError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("surface error: {0}")]
    Surface(#[from] pixels::Error),
    #[error("surface resize failed: {0}")]
    Texture(#[from] pixels::TextureError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
