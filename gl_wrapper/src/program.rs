use std::ffi::CString;
use std::path::Path;

use cgmath::Vector4;
use gl::types::{GLchar, GLenum, GLuint};
use thiserror::Error;

use crate::bindings::Bindings;

pub struct ProgramBuilder {
    vert: CString,
    frag: CString,
}

impl ProgramBuilder {
    pub fn new(vert_src: &str, frag_src: &str) -> Self {
        Self {
            vert: CString::new(vert_src).unwrap(),
            frag: CString::new(frag_src).unwrap(),
        }
    }

    /// Reads both shader stages from disk.
    pub fn from_paths<P: AsRef<Path>>(vert: P, frag: P) -> Result<Self, ProgramError> {
        let vert_src = std::fs::read_to_string(vert)?;
        let frag_src = std::fs::read_to_string(frag)?;

        Ok(Self::new(&vert_src, &frag_src))
    }

    /// Compiles both stages and links them into one program. The driver's
    /// info log travels inside the error on any failure.
    pub fn build(self) -> Result<Program, ProgramError> {
        unsafe {
            let vert = compile_stage(gl::VERTEX_SHADER, &self.vert)?;

            let frag = match compile_stage(gl::FRAGMENT_SHADER, &self.frag) {
                Ok(frag) => frag,
                Err(e) => {
                    gl::DeleteShader(vert);
                    return Err(e);
                }
            };

            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            let mut success = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
            if success != 1 {
                let log = program_info_log(program);
                gl::DeleteProgram(program);

                return Err(ProgramError::Link(log));
            }

            Ok(Program { id: program })
        }
    }
}

unsafe fn compile_stage(kind: GLenum, src: &CString) -> Result<GLuint, ProgramError> {
    let shader = gl::CreateShader(kind);

    gl::ShaderSource(shader, 1, &src.as_ptr(), std::ptr::null());
    gl::CompileShader(shader);

    let mut success = 0;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
    if success != 1 {
        let log = shader_info_log(shader);
        gl::DeleteShader(shader);

        return Err(ProgramError::Compile(stage_name(kind), log));
    }

    Ok(shader)
}

unsafe fn shader_info_log(shader: GLuint) -> String {
    let mut len = 0;
    gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);

    let mut buf = vec![0_u8; len.max(1) as usize];
    gl::GetShaderInfoLog(
        shader,
        buf.len() as i32,
        std::ptr::null_mut(),
        buf.as_mut_ptr() as *mut GLchar,
    );

    trim_log(buf)
}

unsafe fn program_info_log(program: GLuint) -> String {
    let mut len = 0;
    gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);

    let mut buf = vec![0_u8; len.max(1) as usize];
    gl::GetProgramInfoLog(
        program,
        buf.len() as i32,
        std::ptr::null_mut(),
        buf.as_mut_ptr() as *mut GLchar,
    );

    trim_log(buf)
}

fn trim_log(buf: Vec<u8>) -> String {
    let end = buf.iter().position(|b| *b == 0).unwrap_or(buf.len());

    String::from_utf8_lossy(&buf[..end]).trim_end().to_string()
}

fn stage_name(kind: GLenum) -> &'static str {
    match kind {
        gl::VERTEX_SHADER => "vertex",
        gl::FRAGMENT_SHADER => "fragment",
        _ => "shader",
    }
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("could not read shader source: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} shader compilation failed: {1}")]
    Compile(&'static str, String),
    #[error("program linking failed: {0}")]
    Link(String),
}

/// Handle for a named uniform, valid while the program that resolved it
/// stays linked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UniformLocation(i32);

pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self, bindings: &mut Bindings) {
        if bindings.bind_program(self.id) {
            unsafe { gl::UseProgram(self.id) }
        }
    }

    /// `None` when the linker assigned the name no location (unused or
    /// absent uniforms).
    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        let name = CString::new(name).ok()?;

        let location = unsafe { gl::GetUniformLocation(self.id, name.as_ptr()) };

        (location != -1).then_some(UniformLocation(location))
    }

    pub fn set_vec4(&self, location: UniformLocation, value: Vector4<f32>) {
        unsafe { gl::ProgramUniform4f(self.id, location.0, value.x, value.y, value.z, value.w) }
    }

    pub fn set_int(&self, location: UniformLocation, value: i32) {
        unsafe { gl::ProgramUniform1i(self.id, location.0, value) }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_logs_stop_at_the_terminator() {
        let buf = b"0:1: error: syntax error\0\0\0\0".to_vec();

        assert_eq!(trim_log(buf), "0:1: error: syntax error");
    }

    #[test]
    fn unterminated_logs_survive() {
        let buf = b"ran out of room".to_vec();

        assert_eq!(trim_log(buf), "ran out of room");
    }

    #[test]
    fn stages_have_names() {
        assert_eq!(stage_name(gl::VERTEX_SHADER), "vertex");
        assert_eq!(stage_name(gl::FRAGMENT_SHADER), "fragment");
    }
}
