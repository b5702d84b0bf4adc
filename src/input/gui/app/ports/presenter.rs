use std::sync::Arc;
use std::time::Duration;

use egui::Context as EguiContext;

use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use crate::core::actions::evaluator::EvaluatorKind;
use crate::input::gui::errors::GuiError;

/// What the presenter last put on screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresenterStatus {
    pub presented_generation: u64,
    pub render_duration: Option<Duration>,
    pub evaluator: Option<EvaluatorKind>,
    pub error: Option<String>,
}

pub trait GuiPresenterPort {
    fn share_adapter(&self) -> Arc<dyn InteractiveControllerPresenterPort>;
    /// Applies whatever the render worker delivered since the last call.
    /// Returns true if anything arrived.
    fn drain_render_events(&mut self) -> bool;
    fn render(&mut self, egui_output: egui::FullOutput, egui_ctx: &EguiContext) -> Result<(), GuiError>;
    fn resize(&mut self, width: u32, height: u32) -> Result<(), GuiError>;
    fn status(&self) -> &PresenterStatus;
}
