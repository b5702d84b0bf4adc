use std::sync::Arc;

use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiRenderer;
use pixels::wgpu;
use pixels::{Pixels, SurfaceTexture};
use winit::event_loop::EventLoopProxy;
use winit::window::Window;

use crate::adapters::pixel_format::{copy_rgb_to_rgba, fill_rgba};
use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::events::render::RenderEvent;
use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use crate::core::data::colour::Colour;
use crate::input::gui::app::ports::presenter::{GuiPresenterPort, PresenterStatus};
use crate::input::gui::errors::GuiError;
use crate::input::gui::events::GuiEvent;
use crate::presenters::pixels::adapter::PixelsAdapter;

/// Shows finished frames on a `pixels` surface with the egui overlay
/// composited on top.
pub struct PixelsPresenter {
    pixels: Pixels<'static>,
    egui_renderer: EguiRenderer,
    adapter: Arc<PixelsAdapter>,
    width: u32,
    height: u32,
    has_frame: bool,
    status: PresenterStatus,
}

impl PixelsPresenter {
    pub fn new(
        window: &'static Window,
        event_loop_proxy: EventLoopProxy<GuiEvent>,
    ) -> Result<Self, GuiError> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let egui_renderer = EguiRenderer::new(
            pixels.device(),
            pixels.render_texture_format(),
            None,
            1,
        );

        tracing::debug!(width = size.width, height = size.height, "pixels surface created");

        Ok(Self {
            pixels,
            egui_renderer,
            adapter: Arc::new(PixelsAdapter::new(event_loop_proxy)),
            width: size.width,
            height: size.height,
            has_frame: false,
            status: PresenterStatus::default(),
        })
    }

    fn apply_render_event(&mut self, event: RenderEvent) {
        match event {
            RenderEvent::Frame(frame) => {
                let size = frame.pixel_buffer.size();

                // Frames rendered for a previous surface size are stale.
                if frame.generation > self.status.presented_generation
                    && size.width() == self.width
                    && size.height() == self.height
                {
                    self.copy_frame(&frame);
                } else {
                    tracing::trace!(generation = frame.generation, "stale frame dropped");
                }
            }
            RenderEvent::Error(error) => {
                if error.generation >= self.status.presented_generation {
                    self.status.error = Some(error.message);
                }
            }
        }
    }

    fn copy_frame(&mut self, frame: &FrameData) {
        match copy_rgb_to_rgba(frame.pixel_buffer.buffer(), self.pixels.frame_mut()) {
            Ok(()) => {
                self.has_frame = true;
                self.status.presented_generation = frame.generation;
                self.status.render_duration = Some(frame.render_duration);
                self.status.evaluator = Some(frame.evaluator);
                self.status.error = None;
            }
            Err(err) => {
                tracing::warn!(generation = frame.generation, error = %err, "frame copy failed");
            }
        }
    }
}

impl GuiPresenterPort for PixelsPresenter {
    fn share_adapter(&self) -> Arc<dyn InteractiveControllerPresenterPort> {
        Arc::clone(&self.adapter) as Arc<dyn InteractiveControllerPresenterPort>
    }

    fn drain_render_events(&mut self) -> bool {
        match self.adapter.take_render_event() {
            Some(event) => {
                self.apply_render_event(event);
                true
            }
            None => false,
        }
    }

    fn render(&mut self, egui_output: egui::FullOutput, egui_ctx: &EguiContext) -> Result<(), GuiError> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        if !self.has_frame {
            fill_rgba(self.pixels.frame_mut(), Colour::BLACK);
        }

        let pixels_per_point = egui_ctx.pixels_per_point();
        let clipped_primitives = egui_ctx.tessellate(egui_output.shapes, pixels_per_point);
        let textures_delta = egui_output.textures_delta;
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.width, self.height],
            pixels_per_point,
        };
        let egui_renderer = &mut self.egui_renderer;

        self.pixels.render_with(|encoder, render_target, context| {
            context.scaling_renderer.render(encoder, render_target);

            for (id, delta) in &textures_delta.set {
                egui_renderer.update_texture(&context.device, &context.queue, *id, delta);
            }

            egui_renderer.update_buffers(
                &context.device,
                &context.queue,
                encoder,
                &clipped_primitives,
                &screen_descriptor,
            );

            {
                let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: render_target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

                egui_renderer.render(&mut render_pass, &clipped_primitives, &screen_descriptor);
            }

            for id in &textures_delta.free {
                egui_renderer.free_texture(id);
            }

            Ok(())
        })?;

        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), GuiError> {
        if width == 0 || height == 0 {
            self.width = width;
            self.height = height;
            return Ok(());
        }

        self.pixels.resize_surface(width, height)?;
        self.pixels.resize_buffer(width, height)?;

        self.width = width;
        self.height = height;
        self.has_frame = false;

        Ok(())
    }

    fn status(&self) -> &PresenterStatus {
        &self.status
    }
}
