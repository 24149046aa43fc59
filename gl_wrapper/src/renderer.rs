use crate::bindings::Bindings;
use crate::debug;
use crate::geometry::VertexBuffer;
use crate::index::IndexBuffer;
use crate::program::Program;

/// Issues draw and state calls through an explicit binding table instead
/// of GL's hidden current-object state. With `debug` set, the error queue
/// is drained and logged after every operation.
pub struct GlRenderer {
    bindings: Bindings,
    debug: bool,
}

impl GlRenderer {
    pub fn new(debug: bool) -> Self {
        Self {
            bindings: Bindings::new(),
            debug,
        }
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        self.check("glClear");
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }

        self.check("glViewport");
    }

    /// One indexed triangle-list draw covering every index in `indices`.
    /// Program, vertex array and element buffer are bound on demand.
    pub fn draw_indexed(
        &mut self,
        program: &Program,
        geometry: &VertexBuffer,
        indices: &IndexBuffer,
    ) {
        program.bind(&mut self.bindings);
        geometry.bind(&mut self.bindings);
        indices.bind(&mut self.bindings);

        unsafe {
            gl::DrawElements(
                gl::TRIANGLES,
                indices.len() as i32,
                indices.gl_type(),
                std::ptr::null(),
            );
        }

        self.check("glDrawElements");
    }

    fn check(&self, call: &str) {
        if self.debug {
            debug::drain_errors(call);
        }
    }
}
