use anyhow::Result;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoopBuilder,
    keyboard::{KeyCode, PhysicalKey},
};

use glimt::{AppWindow, WindowConfig};

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let config = WindowConfig::load_or_default("glimt.toml")?.with_title("Hello Window");
    let event_loop = EventLoopBuilder::new().build()?;
    let app = AppWindow::new(&event_loop, &config)?;
    info!("Window created, entering render loop");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => elwt.exit(),
            WindowEvent::Resized(size) => app.resize(size),
            WindowEvent::RedrawRequested => {
                unsafe {
                    gl::Clear(gl::COLOR_BUFFER_BIT);
                }
                if let Err(err) = app.swap_buffers() {
                    log::error!("{err}");
                }
            }
            _ => (),
        },
        Event::AboutToWait => app.window.request_redraw(),
        _ => (),
    })?;

    Ok(())
}
