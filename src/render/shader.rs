use gl::types::*;
use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};
use std::ffi::{CString, NulError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::ptr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read shader source {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} shader compilation failed: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("program linking failed: {log}")]
    Link { log: String },
    #[error("shader source contains a NUL byte: {0}")]
    Nul(#[from] NulError),
}

/// One unit of shader source compiled for a specific pipeline point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
}

impl ShaderStage {
    fn gl_kind(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
            ShaderStage::Geometry => gl::GEOMETRY_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Geometry => "geometry",
        })
    }
}

/// A compiled-and-linked GPU shader program.
///
/// A value of this type only exists once linking has succeeded; the classic
/// tutorial wrapper that logs failures and limps along with an invalid handle
/// is replaced by `Result` constructors. Every driver diagnostic is still
/// mirrored to the log stream, so a build with several broken stages reports
/// each of them, not just the first.
pub struct ShaderProgram {
    id: GLuint,
}

impl ShaderProgram {
    /// Reads, compiles and links a vertex + fragment program from files.
    ///
    /// The GL context must be current on the calling thread.
    pub fn from_files<P: AsRef<Path>>(vertex_path: P, fragment_path: P) -> Result<Self, ShaderError> {
        Self::build(vec![
            (ShaderStage::Vertex, read_source(vertex_path.as_ref())),
            (ShaderStage::Fragment, read_source(fragment_path.as_ref())),
        ])
    }

    /// Same as [`ShaderProgram::from_files`] with a geometry stage in between.
    pub fn from_files_with_geometry<P: AsRef<Path>>(
        vertex_path: P,
        geometry_path: P,
        fragment_path: P,
    ) -> Result<Self, ShaderError> {
        Self::build(vec![
            (ShaderStage::Vertex, read_source(vertex_path.as_ref())),
            (ShaderStage::Geometry, read_source(geometry_path.as_ref())),
            (ShaderStage::Fragment, read_source(fragment_path.as_ref())),
        ])
    }

    /// Compiles and links a vertex + fragment program from in-memory source.
    pub fn from_source(vertex_source: &str, fragment_source: &str) -> Result<Self, ShaderError> {
        Self::build(vec![
            (ShaderStage::Vertex, Ok(vertex_source.to_string())),
            (ShaderStage::Fragment, Ok(fragment_source.to_string())),
        ])
    }

    pub fn from_source_with_geometry(
        vertex_source: &str,
        geometry_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        Self::build(vec![
            (ShaderStage::Vertex, Ok(vertex_source.to_string())),
            (ShaderStage::Geometry, Ok(geometry_source.to_string())),
            (ShaderStage::Fragment, Ok(fragment_source.to_string())),
        ])
    }

    /// Compiles every stage best-effort, then links whatever compiled.
    ///
    /// A stage that failed to load or compile is logged and left out of the
    /// link attempt; the link still runs so its diagnostic is reported next
    /// to the compile diagnostics. The first failure is the one returned.
    /// Stage handles are deleted before returning, whatever the outcome.
    fn build(inputs: Vec<(ShaderStage, Result<String, ShaderError>)>) -> Result<Self, ShaderError> {
        let mut first_failure: Option<ShaderError> = None;
        let mut compiled: Vec<GLuint> = Vec::new();

        for (stage, source) in inputs {
            let source = match source {
                Ok(source) => source,
                Err(err) => {
                    log::error!("{err}");
                    first_failure.get_or_insert(err);
                    continue;
                }
            };
            match compile_stage(stage, &source) {
                Ok(shader) => compiled.push(shader),
                Err(err) => {
                    log::error!("{err}");
                    first_failure.get_or_insert(err);
                }
            }
        }

        let link_result = link_program(&compiled);
        for shader in &compiled {
            unsafe { gl::DeleteShader(*shader) };
        }

        match (link_result, first_failure) {
            (Ok(id), None) => Ok(ShaderProgram { id }),
            (Ok(id), Some(err)) => {
                // Linked, but with a requested stage missing; not usable.
                unsafe { gl::DeleteProgram(id) };
                Err(err)
            }
            (Err(link_err), first_failure) => {
                log::error!("{link_err}");
                Err(first_failure.unwrap_or(link_err))
            }
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Makes this program the active one for subsequent draw calls.
    pub fn set_used(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    /// Resolves a uniform location by name against the linked program.
    ///
    /// Resolution happens on every call; a name the driver does not know
    /// (misspelled or optimized out) yields `None` and the caller skips the
    /// upload, matching the driver's own silent-sentinel semantics.
    fn uniform_location(&self, name: &str) -> Option<GLint> {
        let cname = match CString::new(name) {
            Ok(cname) => cname,
            Err(_) => {
                log::debug!("uniform name {name:?} contains a NUL byte, skipping");
                return None;
            }
        };
        let location = unsafe { gl::GetUniformLocation(self.id, cname.as_ptr()) };
        if location == -1 {
            log::debug!("uniform '{}' not active in program {}", name, self.id);
            return None;
        }
        Some(location)
    }

    // Uniform setters
    pub fn set_uniform_bool(&self, name: &str, value: bool) {
        self.set_uniform_1i(name, value as i32);
    }

    pub fn set_uniform_1i(&self, name: &str, value: i32) {
        self.set_used();
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::Uniform1i(location, value) };
        }
    }

    pub fn set_uniform_1f(&self, name: &str, value: f32) {
        self.set_used();
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::Uniform1f(location, value) };
        }
    }

    pub fn set_uniform_2f(&self, name: &str, x: f32, y: f32) {
        self.set_used();
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::Uniform2f(location, x, y) };
        }
    }

    pub fn set_uniform_3f(&self, name: &str, x: f32, y: f32, z: f32) {
        self.set_used();
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::Uniform3f(location, x, y, z) };
        }
    }

    pub fn set_uniform_4f(&self, name: &str, x: f32, y: f32, z: f32, w: f32) {
        self.set_used();
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::Uniform4f(location, x, y, z, w) };
        }
    }

    pub fn set_uniform_vec2(&self, name: &str, value: Vec2) {
        self.set_used();
        if let Some(location) = self.uniform_location(name) {
            let value = value.to_array();
            unsafe { gl::Uniform2fv(location, 1, value.as_ptr()) };
        }
    }

    pub fn set_uniform_vec3(&self, name: &str, value: Vec3) {
        self.set_used();
        if let Some(location) = self.uniform_location(name) {
            let value = value.to_array();
            unsafe { gl::Uniform3fv(location, 1, value.as_ptr()) };
        }
    }

    pub fn set_uniform_vec4(&self, name: &str, value: Vec4) {
        self.set_used();
        if let Some(location) = self.uniform_location(name) {
            let value = value.to_array();
            unsafe { gl::Uniform4fv(location, 1, value.as_ptr()) };
        }
    }

    pub fn set_uniform_mat2(&self, name: &str, value: &Mat2) {
        self.set_used();
        if let Some(location) = self.uniform_location(name) {
            let value = value.to_cols_array();
            unsafe { gl::UniformMatrix2fv(location, 1, gl::FALSE, value.as_ptr()) };
        }
    }

    pub fn set_uniform_mat3(&self, name: &str, value: &Mat3) {
        self.set_used();
        if let Some(location) = self.uniform_location(name) {
            let value = value.to_cols_array();
            unsafe { gl::UniformMatrix3fv(location, 1, gl::FALSE, value.as_ptr()) };
        }
    }

    pub fn set_uniform_mat4(&self, name: &str, value: &Mat4) {
        self.set_used();
        if let Some(location) = self.uniform_location(name) {
            let value = value.to_cols_array();
            unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr()) };
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| ShaderError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Compiles one stage. The NUL check runs before any GL call; a stage that
/// fails to compile is deleted here so its handle never escapes.
fn compile_stage(stage: ShaderStage, source: &str) -> Result<GLuint, ShaderError> {
    let source = CString::new(source.as_bytes())?;

    let shader = unsafe { gl::CreateShader(stage.gl_kind()) };
    unsafe {
        gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null());
        gl::CompileShader(shader);
    }

    let mut success = 1;
    unsafe {
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
    }

    if success == 0 {
        let log = shader_info_log(shader);
        unsafe { gl::DeleteShader(shader) };
        return Err(ShaderError::Compile { stage, log });
    }

    Ok(shader)
}

fn link_program(stages: &[GLuint]) -> Result<GLuint, ShaderError> {
    let program = unsafe { gl::CreateProgram() };
    unsafe {
        for shader in stages {
            gl::AttachShader(program, *shader);
        }
        gl::LinkProgram(program);
    }

    let mut success = 1;
    unsafe {
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
    }

    if success == 0 {
        let log = program_info_log(program);
        unsafe { gl::DeleteProgram(program) };
        return Err(ShaderError::Link { log });
    }

    Ok(program)
}

fn shader_info_log(shader: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
    }

    let buffer = create_whitespace_cstring_with_len(len as usize);
    unsafe {
        gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buffer.as_ptr() as *mut GLchar);
    }

    buffer.to_string_lossy().trim_end().to_owned()
}

fn program_info_log(program: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
    }

    let buffer = create_whitespace_cstring_with_len(len as usize);
    unsafe {
        gl::GetProgramInfoLog(program, len, ptr::null_mut(), buffer.as_ptr() as *mut GLchar);
    }

    buffer.to_string_lossy().trim_end().to_owned()
}

fn create_whitespace_cstring_with_len(len: usize) -> CString {
    let mut buffer: Vec<u8> = Vec::with_capacity(len + 1);
    buffer.extend([b' '].iter().cycle().take(len));
    unsafe { CString::from_vec_unchecked(buffer) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn stage_kinds_map_to_gl_enums() {
        assert_eq!(ShaderStage::Vertex.gl_kind(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_kind(), gl::FRAGMENT_SHADER);
        assert_eq!(ShaderStage::Geometry.gl_kind(), gl::GEOMETRY_SHADER);
    }

    #[test]
    fn stage_labels_are_lowercase_names() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
        assert_eq!(ShaderStage::Geometry.to_string(), "geometry");
    }

    #[test]
    fn missing_file_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.vert");

        let err = read_source(&path).unwrap_err();
        match err {
            ShaderError::FileRead { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected FileRead, got {other:?}"),
        }
    }

    #[test]
    fn source_is_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pass.vert");
        let contents = "#version 330 core\nvoid main() { gl_Position = vec4(0.0); }\n";

        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();

        assert_eq!(read_source(&path).unwrap(), contents);
    }

    #[test]
    fn interior_nul_is_rejected_before_any_gl_call() {
        // compile_stage performs the CString conversion first, so this runs
        // without a GL context.
        let err = compile_stage(ShaderStage::Fragment, "void main() {\0}").unwrap_err();
        assert!(matches!(err, ShaderError::Nul(_)));
    }

    #[test]
    fn compile_error_text_names_the_stage_and_driver_log() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Vertex,
            log: "0:1(10): error: syntax error".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("vertex"));
        assert!(text.contains("0:1(10)"));
    }

    #[test]
    fn link_error_text_carries_the_driver_log() {
        let err = ShaderError::Link {
            log: "error: no vertex shader attached".to_string(),
        };
        assert!(err.to_string().contains("no vertex shader"));
    }
}
