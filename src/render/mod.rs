pub mod mesh;
pub mod shader;

pub use mesh::{Mesh, VertexAttrib};
pub use shader::{ShaderError, ShaderProgram, ShaderStage};
