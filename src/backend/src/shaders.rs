use super::error::{BackendError, Result};
use gl::{types::*, *};
use std::ffi::{CStr, CString};
use std::fmt;
use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => VERTEX_SHADER,
            ShaderStage::Fragment => FRAGMENT_SHADER,
            ShaderStage::Geometry => GEOMETRY_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Geometry => "geometry",
        };
        f.write_str(name)
    }
}

/// Decodes a GL info log buffer: text up to the first NUL, trailing
/// whitespace removed.
pub fn info_log_to_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).trim_end().to_string()
}

/// Shader object, deleted on drop. Only lives until the program is linked.
struct Stage {
    kind: ShaderStage,
    id: u32,
}

impl Stage {
    fn create(kind: ShaderStage) -> Result<Stage> {
        let id = unsafe { gl::CreateShader(kind.gl_enum()) };
        if id == 0 {
            return Err(BackendError::ShaderCreate(kind));
        }
        Ok(Stage { kind, id })
    }

    fn compile(&self, code: &str) -> Result<()> {
        let len = code.len() as GLint;
        unsafe {
            gl::ShaderSource(self.id, 1, &(code.as_bytes().as_ptr().cast()), &len);
            gl::CompileShader(self.id);
        }

        // check if there are compilation errors
        let mut success = 0;
        unsafe { gl::GetShaderiv(self.id, COMPILE_STATUS, &mut success) };
        if success == 0 {
            let mut log_len = 0;
            unsafe { gl::GetShaderiv(self.id, INFO_LOG_LENGTH, &mut log_len) };
            let mut v = vec![0u8; log_len.max(1) as usize];
            let mut written = 0;
            unsafe {
                gl::GetShaderInfoLog(self.id, v.len() as GLsizei, &mut written, v.as_mut_ptr().cast())
            };
            v.truncate(written.max(0) as usize);
            return Err(BackendError::ShaderCompile {
                stage: self.kind,
                log: info_log_to_string(&v),
            });
        }
        log::debug!("{} shader {} compiled", self.kind, self.id);
        Ok(())
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.id) };
    }
}

/// Rejects a lookup result of -1, which GL returns for names that are not
/// active uniforms of `program`.
fn uniform_location(program: u32, name: &CStr, location: i32) -> Result<i32> {
    if location == -1 {
        return Err(BackendError::UniformNotFound {
            program,
            name: name.to_string_lossy().into_owned(),
        });
    }
    Ok(location)
}

/// Linked shader program. The GL program object is deleted when this value
/// is dropped.
#[derive(Debug)]
pub struct Shaders {
    program_id: u32,
}

impl Shaders {
    pub fn from_files(vertex_file: &str, fragment_file: &str) -> Result<Shaders> {
        let read = |path: &str| {
            fs::read_to_string(path).map_err(|source| BackendError::Io {
                path: path.to_string(),
                source,
            })
        };
        let vertex_code = read(vertex_file)?;
        let fragment_code = read(fragment_file)?;
        Shaders::from_str(&vertex_code, &fragment_code)
    }

    pub fn from_str(vertex_code: &str, fragment_code: &str) -> Result<Shaders> {
        Self::from_str_full(vertex_code, fragment_code, "")
    }

    /// Compiles every stage and links even when an earlier step failed, so
    /// the returned error reports all failures at once.
    pub fn from_str_full(
        vertex_code: &str,
        fragment_code: &str,
        geometry_code: &str,
    ) -> Result<Shaders> {
        let mut sources = vec![
            (ShaderStage::Vertex, vertex_code),
            (ShaderStage::Fragment, fragment_code),
        ];
        if !geometry_code.is_empty() {
            sources.push((ShaderStage::Geometry, geometry_code));
        }

        let mut failures = Vec::new();
        let mut stages = Vec::with_capacity(sources.len());
        for (kind, code) in sources {
            match Stage::create(kind) {
                Ok(stage) => {
                    if let Err(e) = stage.compile(code) {
                        failures.push(e);
                    }
                    stages.push(stage);
                }
                Err(e) => failures.push(e),
            }
        }

        // create program and link shaders
        let program = Shaders {
            program_id: unsafe { gl::CreateProgram() },
        };
        for stage in &stages {
            unsafe { gl::AttachShader(program.program_id, stage.id) };
        }
        unsafe { gl::LinkProgram(program.program_id) };

        let mut success = 0;
        unsafe { gl::GetProgramiv(program.program_id, LINK_STATUS, &mut success) };
        if success == 0 {
            let mut log_len = 0;
            unsafe { gl::GetProgramiv(program.program_id, INFO_LOG_LENGTH, &mut log_len) };
            let mut v = vec![0u8; log_len.max(1) as usize];
            let mut written = 0;
            unsafe {
                gl::GetProgramInfoLog(
                    program.program_id,
                    v.len() as GLsizei,
                    &mut written,
                    v.as_mut_ptr().cast(),
                )
            };
            v.truncate(written.max(0) as usize);
            failures.push(BackendError::ProgramLink(info_log_to_string(&v)));
        }

        BackendError::from_failures(failures)?;
        log::debug!("shader program {} linked", program.program_id);
        // stages drop here; the linked program keeps its own copy
        Ok(program)
    }

    fn get_uniform_location(&self, name: &str) -> Result<i32> {
        let c_name = CString::new(name).map_err(|_| BackendError::InvalidName(name.to_string()))?;
        let location = unsafe { gl::GetUniformLocation(self.program_id, c_name.as_ptr().cast()) };
        uniform_location(self.program_id, &c_name, location)
    }

    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.program_id) };
    }

    pub fn set_bool(&self, name: &str, value: bool) -> Result<()> {
        let location = self.get_uniform_location(name)?;
        unsafe { gl::Uniform1i(location, i32::from(value)) };
        Ok(())
    }

    pub fn set_i32(&self, name: &str, value: i32) -> Result<()> {
        let location = self.get_uniform_location(name)?;
        unsafe { gl::Uniform1i(location, value) };
        Ok(())
    }

    pub fn set_f32(&self, name: &str, value: f32) -> Result<()> {
        let location = self.get_uniform_location(name)?;
        unsafe { gl::Uniform1f(location, value) };
        Ok(())
    }

    pub fn set_vec3(&self, name: &str, v0: f32, v1: f32, v2: f32) -> Result<()> {
        let location = self.get_uniform_location(name)?;
        unsafe { gl::Uniform3f(location, v0, v1, v2) };
        Ok(())
    }

    pub fn set_vec4(&self, name: &str, v0: f32, v1: f32, v2: f32, v3: f32) -> Result<()> {
        let location = self.get_uniform_location(name)?;
        unsafe { gl::Uniform4f(location, v0, v1, v2, v3) };
        Ok(())
    }
}

impl Drop for Shaders {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.program_id) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_log_stops_at_nul() {
        let raw = b"0:1(10): error: syntax error\n\0garbage";
        assert_eq!(info_log_to_string(raw), "0:1(10): error: syntax error");
    }

    #[test]
    fn info_log_empty_buffer() {
        assert_eq!(info_log_to_string(&[]), "");
        assert_eq!(info_log_to_string(&[0]), "");
    }

    #[test]
    fn info_log_invalid_utf8_is_lossy() {
        let s = info_log_to_string(&[b'o', b'k', 0xff]);
        assert!(s.starts_with("ok"));
    }

    #[test]
    fn missing_source_file_is_io_error() {
        let err = Shaders::from_files("does/not/exist.vs", "does/not/exist.fs").unwrap_err();
        match err {
            BackendError::Io { path, source } => {
                assert_eq!(path, "does/not/exist.vs");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn uniform_location_rejects_only_minus_one() {
        let name = CString::new("ourColor").unwrap();
        assert_eq!(uniform_location(3, &name, 0).unwrap(), 0);
        assert_eq!(uniform_location(3, &name, 7).unwrap(), 7);
        match uniform_location(3, &name, -1) {
            Err(BackendError::UniformNotFound { program, name }) => {
                assert_eq!(program, 3);
                assert_eq!(name, "ourColor");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn stage_enums() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
        assert_eq!(ShaderStage::Geometry.gl_enum(), gl::GEOMETRY_SHADER);
        assert_eq!(ShaderStage::Geometry.to_string(), "geometry");
    }
}
