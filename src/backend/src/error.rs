use thiserror::Error;

use crate::shaders::ShaderStage;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("SDL initialization failure: {0}")]
    SdlInit(String),

    #[error("error while building OpenGL window: {0}")]
    WindowBuild(String),

    #[error("OpenGL context creation failure: {0}")]
    ContextCreate(String),

    #[error("failed to load OpenGL function pointers: {0} not resolved")]
    FunctionLoader(&'static str),

    #[error("error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("gl::CreateShader({0}) failed")]
    ShaderCreate(ShaderStage),

    #[error("{stage} shader compilation error: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("program link error: {0}")]
    ProgramLink(String),

    #[error("program({program}): '{name}' does not correspond to an active uniform variable")]
    UniformNotFound { program: u32, name: String },

    #[error("'{0}' is not a valid GL identifier (contains NUL)")]
    InvalidName(String),

    #[error("OpenGL error {name} (0x{code:04X})")]
    Gl { code: u32, name: &'static str },

    #[error("{} shader program errors: {}", .0.len(), join(.0))]
    Multiple(Vec<BackendError>),
}

fn join(errors: &[BackendError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl BackendError {
    /// Folds the failures of a multi-step operation: none is success, one is
    /// returned as is, several become `Multiple`.
    pub fn from_failures(mut failures: Vec<BackendError>) -> Result<()> {
        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0)),
            _ => Err(BackendError::Multiple(failures)),
        }
    }

    /// The individual failures carried by this error.
    pub fn causes(&self) -> &[BackendError] {
        match self {
            BackendError::Multiple(errors) => errors,
            other => std::slice::from_ref(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_the_stage() {
        let err = BackendError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:3(1): error: syntax error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "fragment shader compilation error: 0:3(1): error: syntax error"
        );
    }

    #[test]
    fn gl_error_is_hex_formatted() {
        let err = BackendError::Gl {
            code: gl::INVALID_OPERATION,
            name: "INVALID_OPERATION",
        };
        assert_eq!(err.to_string(), "OpenGL error INVALID_OPERATION (0x0502)");
    }

    #[test]
    fn no_failures_is_ok() {
        assert!(BackendError::from_failures(Vec::new()).is_ok());
    }

    #[test]
    fn single_failure_is_returned_unwrapped() {
        let err = BackendError::from_failures(vec![BackendError::ProgramLink("x".into())])
            .unwrap_err();
        assert!(matches!(err, BackendError::ProgramLink(ref log) if log == "x"));
        assert_eq!(err.causes().len(), 1);
    }

    #[test]
    fn every_stage_failure_is_kept() {
        let err = BackendError::from_failures(vec![
            BackendError::ShaderCompile {
                stage: ShaderStage::Vertex,
                log: "bad vertex".into(),
            },
            BackendError::ShaderCompile {
                stage: ShaderStage::Fragment,
                log: "bad fragment".into(),
            },
            BackendError::ProgramLink("no main".into()),
        ])
        .unwrap_err();

        let causes = err.causes();
        assert_eq!(causes.len(), 3);
        assert!(matches!(
            causes[1],
            BackendError::ShaderCompile {
                stage: ShaderStage::Fragment,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "3 shader program errors: vertex shader compilation error: bad vertex; \
             fragment shader compilation error: bad fragment; program link error: no main"
        );
    }

    #[test]
    fn io_error_keeps_source() {
        use std::error::Error as _;
        let err = BackendError::Io {
            path: "missing.vs".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("error reading missing.vs"));
        assert!(err.source().is_some());
    }
}
