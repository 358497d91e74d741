use super::error::{BackendError, Result};
use gl::{types::*, *};
use std::ffi::CStr;

pub fn gl_error_name(code: GLenum) -> &'static str {
    match code {
        gl::NO_ERROR => "NO_ERROR",
        gl::INVALID_ENUM => "INVALID_ENUM",
        gl::INVALID_VALUE => "INVALID_VALUE",
        gl::INVALID_OPERATION => "INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "STACK_OVERFLOW",
        _ => "UNKNOWN_ERROR",
    }
}

pub fn check_gl_err() -> Result<()> {
    let code = unsafe { gl::GetError() };
    if code == gl::NO_ERROR {
        return Ok(());
    }
    Err(BackendError::Gl {
        code,
        name: gl_error_name(code),
    })
}

fn gl_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unavailable>".to_string();
    }
    unsafe { CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}

pub fn print_opengl_info() {
    log::info!("GL_VENDOR = {}", gl_string(VENDOR));
    log::info!("GL_RENDERER = {}", gl_string(RENDERER));
    log::info!("GL_VERSION = {}", gl_string(VERSION));
    log::info!(
        "GL_SHADING_LANGUAGE_VERSION = {}",
        gl_string(SHADING_LANGUAGE_VERSION)
    );

    let mut max_attribs: i32 = 0;
    unsafe { gl::GetIntegerv(MAX_VERTEX_ATTRIBS, &mut max_attribs) };
    log::debug!("MAX_VERTEX_ATTRIBS = {}", max_attribs);
}

pub fn gl_buffer_data_arr_stat<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STATIC_DRAW,
        )
    };
}

/// Describes a float attribute and enables it. `stride` and `pointer` are
/// counted in floats, not bytes.
pub fn gl_vertex_attrib_ptr_enab(index: u32, size: u32, stride: u32, pointer: usize) {
    unsafe {
        gl::VertexAttribPointer(
            index,
            size as i32,
            FLOAT,
            FALSE,
            (stride as usize * std::mem::size_of::<f32>()) as i32,
            (pointer * std::mem::size_of::<f32>()) as *const _,
        )
    };
    unsafe { gl::EnableVertexAttribArray(index) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_error_codes_have_names() {
        assert_eq!(gl_error_name(gl::INVALID_ENUM), "INVALID_ENUM");
        assert_eq!(gl_error_name(gl::OUT_OF_MEMORY), "OUT_OF_MEMORY");
        assert_eq!(
            gl_error_name(gl::INVALID_FRAMEBUFFER_OPERATION),
            "INVALID_FRAMEBUFFER_OPERATION"
        );
    }

    #[test]
    fn unknown_error_code() {
        assert_eq!(gl_error_name(0xdead), "UNKNOWN_ERROR");
    }
}
