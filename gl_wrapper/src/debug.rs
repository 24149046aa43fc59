use std::ffi::CStr;
use std::os::raw::{c_char, c_void};

use gl::types::{GLchar, GLenum, GLsizei, GLuint};

/// Empties the GL error queue, logging every entry together with the call
/// that provoked it. Returns the number of errors drained.
pub fn drain_errors(context: &str) -> usize {
    let mut drained = 0;

    loop {
        let error = unsafe { gl::GetError() };
        if error == gl::NO_ERROR {
            break;
        }

        drained += 1;
        eprintln!("[gl error] {} in {context}", error_name(error));
    }

    drained
}

pub fn error_name(error: GLenum) -> &'static str {
    match error {
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unrecognized GL error",
    }
}

/// Driver-reported version string, `None` before a context is current.
pub fn version() -> Option<String> {
    let ptr = unsafe { gl::GetString(gl::VERSION) };

    if ptr.is_null() {
        return None;
    }

    let version = unsafe { CStr::from_ptr(ptr as *const c_char) };

    Some(version.to_string_lossy().into_owned())
}

/// Routes driver debug messages to stderr. Needs a debug context and a
/// driver exposing `glDebugMessageCallback`; reports whether the callback
/// was installed.
pub fn install_callback() -> bool {
    if !gl::DebugMessageCallback::is_loaded() {
        return false;
    }

    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(message_callback), std::ptr::null());
    }

    true
}

extern "system" fn message_callback(
    _source: GLenum,
    _gltype: GLenum,
    _id: GLuint,
    _severity: GLenum,
    length: GLsizei,
    message: *const GLchar,
    _user_param: *mut c_void,
) {
    if message.is_null() {
        return;
    }

    let text = unsafe {
        if length < 0 {
            CStr::from_ptr(message).to_string_lossy().into_owned()
        } else {
            let bytes = std::slice::from_raw_parts(message.cast::<u8>(), length as usize);

            String::from_utf8_lossy(bytes).into_owned()
        }
    };

    eprintln!("[gl debug] {text}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_errors_have_names() {
        assert_eq!(error_name(gl::INVALID_ENUM), "GL_INVALID_ENUM");
        assert_eq!(error_name(gl::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
    }

    #[test]
    fn unknown_errors_fall_back() {
        assert_eq!(error_name(0xdead), "unrecognized GL error");
    }
}
