use anyhow::{anyhow, Context, Result};
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasRawWindowHandle;
use std::{ffi::CString, num::NonZeroU32, sync::Arc};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

use crate::config::WindowConfig;

/// A window with a current OpenGL context and loaded function pointers.
///
/// Construction leaves the context current on the calling thread with the
/// viewport and clear color already applied, so a demo can start issuing GL
/// calls straight away.
pub struct AppWindow {
    pub window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
}

impl AppWindow {
    pub fn new(event_loop: &EventLoop<()>, config: &WindowConfig) -> Result<Self> {
        let window_builder = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(24)
            .with_stencil_size(8);

        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .unwrap()
            })
            .map_err(|err| anyhow!("Failed to pick a GL config: {err}"))?;

        let window = window.context("Display builder returned no window")?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(
                config.gl_major,
                config.gl_minor,
            ))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .context("Failed to create OpenGL context")?
        };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .context("Failed to create GL surface")?
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .context("Failed to make context current")?;

        // Load OpenGL functions
        gl::load_with(|symbol| {
            let symbol = CString::new(symbol).unwrap();
            gl_display.get_proc_address(symbol.as_c_str()) as *const _
        });

        if config.vsync {
            if let Err(err) =
                gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                log::warn!("Failed to enable vsync: {err}");
            }
        }

        let [r, g, b, a] = config.clear_color;
        unsafe {
            gl::Viewport(0, 0, config.width as i32, config.height as i32);
            gl::ClearColor(r, g, b, a);
        }

        Ok(Self {
            window,
            gl_context,
            gl_surface,
        })
    }

    /// A `glow` context over the same display, for the egui painter.
    pub fn glow_context(&self) -> Arc<glow::Context> {
        let gl_display = self.gl_context.display();
        Arc::new(unsafe {
            glow::Context::from_loader_function_cstr(|symbol| {
                gl_display.get_proc_address(symbol) as *const _
            })
        })
    }

    pub fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            // Minimized; nothing to resize.
            return;
        };
        self.gl_surface.resize(&self.gl_context, width, height);
        unsafe {
            gl::Viewport(0, 0, size.width as i32, size.height as i32);
        }
    }

    pub fn swap_buffers(&self) -> Result<()> {
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .context("Failed to swap buffers")
    }

    pub fn make_current(&self) -> Result<()> {
        self.gl_context
            .make_current(&self.gl_surface)
            .context("Failed to make context current")
    }
}
