pub mod config;
pub mod render;
pub mod ui;
pub mod window;

// Re-export commonly used types
pub use config::WindowConfig;
pub use render::mesh::{Mesh, VertexAttrib};
pub use render::shader::{ShaderError, ShaderProgram, ShaderStage};
pub use ui::demo::DemoPanel;
pub use ui::overlay::UiOverlay;
pub use window::AppWindow;
