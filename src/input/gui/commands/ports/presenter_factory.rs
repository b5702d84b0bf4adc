use winit::event_loop::EventLoopProxy;
use winit::window::Window;

use crate::input::gui::app::ports::presenter::GuiPresenterPort;
use crate::input::gui::errors::GuiError;
use crate::input::gui::events::GuiEvent;

pub trait GuiPresenterFactoryPort<P: GuiPresenterPort> {
    fn build(&self, window: &'static Window, event_loop_proxy: EventLoopProxy<GuiEvent>) -> Result<P, GuiError>;
}
