use std::ffi::c_void;
use std::mem;

use gl::types::GLenum;

use crate::bindings::Bindings;

pub struct IndexBuffer {
    ebo: u32,
    indices: usize,
    element_size: usize,
}

impl IndexBuffer {
    /// Allocates an element buffer and uploads `indices` once. Call with
    /// the target vertex array bound; the element binding is recorded
    /// into it and stays active.
    pub fn new(indices: &[u32], bindings: &mut Bindings) -> Self {
        let mut ebo = 0;

        unsafe {
            gl::GenBuffers(1, &mut ebo);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);

            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                (indices.len() * mem::size_of::<u32>()) as isize,
                indices.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }

        bindings.bind_element_buffer(ebo);

        Self {
            ebo,
            indices: indices.len(),
            element_size: mem::size_of::<u32>(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices == 0
    }

    pub fn element_size(&self) -> usize {
        self.element_size
    }

    pub fn gl_type(&self) -> GLenum {
        index_type(self.element_size)
    }

    pub fn bind(&self, bindings: &mut Bindings) {
        if bindings.bind_element_buffer(self.ebo) {
            unsafe { gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, self.ebo) }
        }
    }

    pub fn unbind(&self, bindings: &mut Bindings) {
        if bindings.clear_element_buffer() {
            unsafe { gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, 0) }
        }
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.ebo);
        }
    }
}

pub fn index_type(element_size: usize) -> GLenum {
    match element_size {
        1 => gl::UNSIGNED_BYTE,
        2 => gl::UNSIGNED_SHORT,
        _ => gl::UNSIGNED_INT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_widths_map_to_gl_types() {
        assert_eq!(index_type(1), gl::UNSIGNED_BYTE);
        assert_eq!(index_type(2), gl::UNSIGNED_SHORT);
        assert_eq!(index_type(4), gl::UNSIGNED_INT);
    }
}
