use anyhow::{anyhow, Result};
use std::sync::Arc;
use winit::{event::WindowEvent, event_loop::EventLoop, window::Window};

/// The egui context, winit translation state and glow painter for one window.
pub struct UiOverlay {
    ctx: egui::Context,
    winit_state: egui_winit::State,
    painter: egui_glow::Painter,
}

impl UiOverlay {
    pub fn new(
        event_loop: &EventLoop<()>,
        window: &Window,
        glow_context: Arc<glow::Context>,
    ) -> Result<Self> {
        let ctx = egui::Context::default();
        let winit_state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::from_hash_of(window.id()),
            event_loop,
            None,
            None,
        );
        let painter = egui_glow::Painter::new(glow_context, "", None)
            .map_err(|err| anyhow!("Failed to create egui painter: {err}"))?;

        Ok(Self {
            ctx,
            winit_state,
            painter,
        })
    }

    /// Feeds a window event to egui; returns true when egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.winit_state.on_window_event(window, event).consumed
    }

    /// Runs one egui frame and paints it over the current framebuffer.
    ///
    /// Call after the scene draw and before the buffer swap.
    pub fn run(&mut self, window: &Window, build_ui: impl FnOnce(&egui::Context)) {
        let raw_input = self.winit_state.take_egui_input(window);
        self.ctx.begin_frame(raw_input);

        build_ui(&self.ctx);

        let full_output = self.ctx.end_frame();
        let clipped_primitives = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let size = window.inner_size();
        self.painter.paint_and_update_textures(
            [size.width, size.height],
            window.scale_factor() as f32,
            &clipped_primitives,
            &full_output.textures_delta,
        );

        self.winit_state
            .handle_platform_output(window, full_output.platform_output);
    }

    /// Frees the painter's GL resources. The GL context must still be
    /// current; dropping without calling this leaks driver objects.
    pub fn destroy(mut self) {
        self.painter.destroy();
    }
}
