use std::ffi::c_void;

use gl::types::GLenum;
use thiserror::Error;

use crate::bindings::Bindings;

pub struct Texture2D {
    id: u32,
}

impl Texture2D {
    /// Uploads an RGBA8 pixel buffer once; the texture is left unbound
    /// afterwards. The buffer must hold exactly `width * height` pixels.
    pub fn new(
        width: u32,
        height: u32,
        data: &[u8],
        filter: TextureFilter,
    ) -> Result<Self, TextureError> {
        if (width as usize * height as usize * 4) != data.len() {
            return Err(TextureError::InvalidSrcLength);
        }

        let mut id = 0;

        unsafe {
            gl::GenTextures(1, &mut id);
            gl::BindTexture(gl::TEXTURE_2D, id);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MIN_FILTER,
                filter.gl_value() as i32,
            );
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MAG_FILTER,
                filter.gl_value() as i32,
            );

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                data.as_ptr() as *const c_void,
            );

            gl::BindTexture(gl::TEXTURE_2D, 0);
        }

        Ok(Self { id })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn bind(&self, unit: u8, bindings: &mut Bindings) {
        if bindings.bind_texture(unit, self.id) {
            unsafe {
                gl::ActiveTexture(gl::TEXTURE0 + unit as u32);
                gl::BindTexture(gl::TEXTURE_2D, self.id);
            }
        }
    }

    pub fn unbind(&self, unit: u8, bindings: &mut Bindings) {
        if bindings.clear_texture(unit) {
            unsafe {
                gl::ActiveTexture(gl::TEXTURE0 + unit as u32);
                gl::BindTexture(gl::TEXTURE_2D, 0);
            }
        }
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
    }
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("invalid source data length")]
    InvalidSrcLength,
}

#[derive(Copy, Clone)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

impl TextureFilter {
    pub fn gl_value(&self) -> GLenum {
        match self {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_length_is_validated_before_upload() {
        let result = Texture2D::new(2, 2, &[0_u8; 3], TextureFilter::Linear);

        assert!(matches!(result, Err(TextureError::InvalidSrcLength)));
    }

    #[test]
    fn filters_map_to_gl_values() {
        assert_eq!(TextureFilter::Nearest.gl_value(), gl::NEAREST);
        assert_eq!(TextureFilter::Linear.gl_value(), gl::LINEAR);
    }
}
