use anyhow::Result;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoopBuilder,
    keyboard::{KeyCode, PhysicalKey},
};

use glimt::{AppWindow, DemoPanel, UiOverlay, WindowConfig};

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let config = WindowConfig::load_or_default("glimt.toml")?.with_title("GUI Overlay");
    let event_loop = EventLoopBuilder::new().build()?;
    let app = AppWindow::new(&event_loop, &config)?;

    let mut overlay = Some(UiOverlay::new(&event_loop, &app.window, app.glow_context())?);
    let [r, g, b, _] = config.clear_color;
    let mut panel = DemoPanel::new([r, g, b]);
    info!("Overlay ready, entering render loop");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => {
            let consumed = overlay
                .as_mut()
                .map(|overlay| overlay.on_window_event(&app.window, &event))
                .unwrap_or(false);

            match event {
                WindowEvent::CloseRequested => {
                    // The painter owns GL objects; free them while the
                    // context is still current.
                    if let Some(overlay) = overlay.take() {
                        if let Err(err) = app.make_current() {
                            log::error!("{err}");
                        }
                        overlay.destroy();
                    }
                    elwt.exit();
                }
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(KeyCode::Escape),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                } if !consumed => elwt.exit(),
                WindowEvent::Resized(size) => app.resize(size),
                WindowEvent::RedrawRequested => {
                    let [r, g, b] = panel.clear_color;
                    unsafe {
                        gl::ClearColor(r, g, b, 1.0);
                        gl::Clear(gl::COLOR_BUFFER_BIT);
                    }
                    if let Some(overlay) = overlay.as_mut() {
                        overlay.run(&app.window, |ctx| panel.show(ctx));
                    }
                    if let Err(err) = app.swap_buffers() {
                        log::error!("{err}");
                    }
                }
                _ => (),
            }
        }
        Event::AboutToWait => app.window.request_redraw(),
        _ => (),
    })?;

    Ok(())
}
