use anyhow::{Context, Result};
use glam::Vec3;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::time::Instant;
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoopBuilder,
    keyboard::{KeyCode, PhysicalKey},
};

use glimt::{AppWindow, Mesh, ShaderProgram, VertexAttrib, WindowConfig};

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let config = WindowConfig::load_or_default("glimt.toml")?.with_title("Shaders");
    let event_loop = EventLoopBuilder::new().build()?;
    let app = AppWindow::new(&event_loop, &config)?;

    let shader = ShaderProgram::from_files(
        "assets/shaders/triangle.vert",
        "assets/shaders/triangle.frag",
    )
    .context("Failed to build the shader program")?;

    let vertices: [f32; 18] = [
        // positions       // colors
        0.5, -0.5, 0.0, 1.0, 0.0, 0.0, // bottom right
        -0.5, -0.5, 0.0, 0.0, 1.0, 0.0, // bottom left
        0.0, 0.5, 0.0, 0.0, 0.0, 1.0, // top
    ];
    let indices: [u32; 3] = [0, 1, 2];
    let mesh = Mesh::new(
        &vertices,
        &indices,
        &[
            VertexAttrib {
                location: 0,
                components: 3,
            },
            VertexAttrib {
                location: 1,
                components: 3,
            },
        ],
    );
    info!("Shader program linked, entering render loop");

    let start = Instant::now();

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

                // Slide the triangle and pulse its colors through uniforms,
                // re-resolved by name every frame.
                let t = start.elapsed().as_secs_f32();
                shader.set_uniform_1f("uOffset", t.sin() * 0.3);
                shader.set_uniform_vec3("uTint", Vec3::splat(t.cos() * 0.25 + 0.75));

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
