use anyhow::{Context, Result};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoopBuilder,
    keyboard::{KeyCode, PhysicalKey},
};

use glimt::{AppWindow, Mesh, ShaderProgram, VertexAttrib, WindowConfig};

const VERTEX_SRC: &str = r#"
#version 330 core
layout (location = 0) in vec3 aPos;

void main() {
    gl_Position = vec4(aPos, 1.0);
}
"#;

const FRAGMENT_SRC: &str = r#"
#version 330 core
out vec4 FragColor;

void main() {
    FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
"#;

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let config = WindowConfig::load_or_default("glimt.toml")?.with_title("Hello Triangle");
    let event_loop = EventLoopBuilder::new().build()?;
    let app = AppWindow::new(&event_loop, &config)?;

    let shader = ShaderProgram::from_source(VERTEX_SRC, FRAGMENT_SRC)
        .context("Failed to build the triangle shader")?;

    let vertices: [f32; 9] = [
        -0.5, -0.5, 0.0, // bottom left
        0.5, -0.5, 0.0, // bottom right
        0.0, 0.5, 0.0, // top
    ];
    let indices: [u32; 3] = [0, 1, 2];
    let mesh = Mesh::new(
        &vertices,
        &indices,
        &[VertexAttrib {
            location: 0,
            components: 3,
        }],
    );
    info!("Triangle uploaded, entering render loop");

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
                shader.set_used();
                mesh.draw();
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
