pub const MAX_TEXTURE_UNITS: usize = 16;

/// Tracked copy of the context's binding points.
///
/// GL keeps the current vertex array, element buffer, program and textures
/// as hidden global state. This table holds that state as a plain value:
/// every mutator returns `true` only when the recorded binding actually
/// changed, so callers issue the matching GL call on transitions and skip
/// redundant rebinds. No GL calls happen here.
#[derive(Debug, Default)]
pub struct Bindings {
    vertex_array: u32,
    element_buffer: u32,
    program: u32,
    textures: [u32; MAX_TEXTURE_UNITS],
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_vertex_array(&mut self, id: u32) -> bool {
        let changed = self.vertex_array != id;
        self.vertex_array = id;

        changed
    }

    pub fn clear_vertex_array(&mut self) -> bool {
        self.bind_vertex_array(0)
    }

    pub fn vertex_array(&self) -> u32 {
        self.vertex_array
    }

    pub fn bind_element_buffer(&mut self, id: u32) -> bool {
        let changed = self.element_buffer != id;
        self.element_buffer = id;

        changed
    }

    pub fn clear_element_buffer(&mut self) -> bool {
        self.bind_element_buffer(0)
    }

    pub fn element_buffer(&self) -> u32 {
        self.element_buffer
    }

    pub fn bind_program(&mut self, id: u32) -> bool {
        let changed = self.program != id;
        self.program = id;

        changed
    }

    pub fn program(&self) -> u32 {
        self.program
    }

    pub fn bind_texture(&mut self, unit: u8, id: u32) -> bool {
        let slot = &mut self.textures[unit as usize];
        let changed = *slot != id;
        *slot = id;

        changed
    }

    pub fn clear_texture(&mut self, unit: u8) -> bool {
        self.bind_texture(unit, 0)
    }

    pub fn texture(&self, unit: u8) -> u32 {
        self.textures[unit as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_reflects_last_call() {
        let mut bindings = Bindings::new();

        assert!(bindings.bind_vertex_array(3));
        assert_eq!(bindings.vertex_array(), 3);

        assert!(bindings.clear_vertex_array());
        assert_eq!(bindings.vertex_array(), 0);
    }

    #[test]
    fn repeated_binds_are_recorded_noops() {
        let mut bindings = Bindings::new();

        assert!(bindings.bind_vertex_array(7));
        assert!(!bindings.bind_vertex_array(7));

        assert!(bindings.clear_vertex_array());
        assert!(!bindings.clear_vertex_array());
    }

    #[test]
    fn switching_objects_is_a_transition() {
        let mut bindings = Bindings::new();

        assert!(bindings.bind_element_buffer(1));
        assert!(bindings.bind_element_buffer(2));
        assert_eq!(bindings.element_buffer(), 2);

        assert!(bindings.bind_program(5));
        assert!(!bindings.bind_program(5));
        assert!(bindings.bind_program(6));
        assert_eq!(bindings.program(), 6);
    }

    #[test]
    fn texture_units_track_independently() {
        let mut bindings = Bindings::new();

        assert!(bindings.bind_texture(0, 10));
        assert!(bindings.bind_texture(1, 11));
        assert!(!bindings.bind_texture(0, 10));

        assert_eq!(bindings.texture(0), 10);
        assert_eq!(bindings.texture(1), 11);
        assert_eq!(bindings.texture(2), 0);

        assert!(bindings.clear_texture(0));
        assert_eq!(bindings.texture(0), 0);
        assert_eq!(bindings.texture(1), 11);
    }
}
