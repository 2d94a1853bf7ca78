pub mod window;

pub use window::WindowConfig;
