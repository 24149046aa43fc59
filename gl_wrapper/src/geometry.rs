use std::ffi::c_void;
use std::mem;

use cgmath::{Vector2, Vector3, Vector4};

use crate::bindings::Bindings;

/// One corner of the uploaded geometry: position, texture coordinate and
/// color, tightly packed to match the attribute pointers set up by
/// [`VertexBuffer::new`].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vector3<f32>,
    pub uv: Vector2<f32>,
    pub color: Vector4<f32>,
}

impl Vertex {
    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute::Vec3,
        VertexAttribute::Vec2,
        VertexAttribute::Vec4,
    ];

    pub fn new(position: [f32; 3], uv: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            position: Vector3::from(position),
            uv: Vector2::from(uv),
            color: Vector4::from(color),
        }
    }
}

pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
            VertexAttribute::Vec4 => 4,
        }
    }
}

pub struct VertexBuffer {
    vao: u32,
    vbo: u32,
    vertices: usize,
}

impl VertexBuffer {
    /// Allocates a vertex array and buffer and uploads `vertices` once.
    /// The vertex array stays bound and recorded in `bindings`, so an
    /// index buffer created right after is attached to it.
    pub fn new(vertices: &[Vertex], bindings: &mut Bindings) -> Self {
        let mut vao = 0;
        let mut vbo = 0;

        let stride = mem::size_of::<Vertex>();

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                (vertices.len() * stride) as isize,
                vertices.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            let mut offset = 0;

            for (i, attr) in Vertex::ATTRIBUTES.iter().enumerate() {
                gl::VertexAttribPointer(
                    i as u32,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    stride as i32,
                    offset as *const c_void,
                );
                gl::EnableVertexAttribArray(i as u32);

                offset += attr.size() * mem::size_of::<f32>();
            }

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        bindings.bind_vertex_array(vao);

        Self {
            vao,
            vbo,
            vertices: vertices.len(),
        }
    }

    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn len(&self) -> usize {
        self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices == 0
    }

    pub fn bind(&self, bindings: &mut Bindings) {
        if bindings.bind_vertex_array(self.vao) {
            unsafe { gl::BindVertexArray(self.vao) }
        }
    }

    pub fn unbind(&self, bindings: &mut Bindings) {
        if bindings.clear_vertex_array() {
            unsafe { gl::BindVertexArray(0) }
        }
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_attributes() {
        let floats: usize = Vertex::ATTRIBUTES.iter().map(|a| a.size()).sum();

        assert_eq!(floats, 9);
        assert_eq!(mem::size_of::<Vertex>(), floats * mem::size_of::<f32>());
    }

    #[test]
    fn vertex_new_fills_all_attributes() {
        let vertex = Vertex::new([1.0, 2.0, 3.0], [0.5, 0.25], [0.1, 0.2, 0.3, 0.4]);

        assert_eq!(vertex.position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(vertex.uv, Vector2::new(0.5, 0.25));
        assert_eq!(vertex.color, Vector4::new(0.1, 0.2, 0.3, 0.4));
    }
}
