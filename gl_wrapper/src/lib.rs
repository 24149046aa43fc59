pub mod bindings;
pub mod debug;
pub mod geometry;
pub mod index;
pub mod program;
pub mod renderer;
pub mod texture;
