use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::ffi::CString;
use std::num::NonZeroU32;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use gl_wrapper::debug;
use gl_wrapper::geometry::{Vertex, VertexBuffer};
use gl_wrapper::index::IndexBuffer;
use gl_wrapper::program::ProgramBuilder;
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::{Texture2D, TextureFilter};

use quadpulse::image::Image;
use quadpulse::pulse;
use quadpulse::timing::FrameTimer;

use crate::args::Args;

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;

const TEXTURE_PATH: &str = "graphics/logo.png";
const VERT_PATH: &str = "shaders/basic.vert";
const FRAG_PATH: &str = "shaders/basic.frag";

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    gl_debug: bool,
}

impl App {
    pub fn new(args: &Args) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT)))
            .with_resizable(false)
            .with_title("quadpulse");
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new().with_alpha_size(8);

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |mut configs| configs.next().unwrap())
            .unwrap();

        let handle = window.as_ref().map(|w| w.raw_window_handle());
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(4, 5))))
            .with_debug(args.gl_debug)
            .build(handle);

        let gl_window = GlWindow::new(window.unwrap(), &gl_config);

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attr)
                .unwrap()
        }
        .make_current(&gl_window.surface)
        .unwrap();

        gl::load_with(|s| {
            gl_display
                .get_proc_address(CString::new(s).unwrap().as_c_str())
                .cast()
        });

        if !gl::ClearColor::is_loaded() || !gl::DrawElements::is_loaded() {
            return Err(AppError::LoaderInit);
        }

        match debug::version() {
            Some(version) => println!("OpenGL version: {version}"),
            None => eprintln!("OpenGL version string unavailable"),
        }

        if args.gl_debug && !debug::install_callback() {
            eprintln!("driver does not expose glDebugMessageCallback");
        }

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            gl_debug: args.gl_debug,
        })
    }

    pub fn run(self) -> ! {
        let Self {
            event_loop,
            gl_context,
            gl_window,
            gl_debug,
        } = self;

        let mut renderer = GlRenderer::new(gl_debug);
        renderer.resize(WINDOW_WIDTH, WINDOW_HEIGHT);

        let vertices = quad_vertices();
        let vertex_buffer = VertexBuffer::new(&vertices, renderer.bindings_mut());
        let index_buffer = IndexBuffer::new(&QUAD_INDICES, renderer.bindings_mut());

        index_buffer.unbind(renderer.bindings_mut());
        vertex_buffer.unbind(renderer.bindings_mut());

        let texture_image = match Image::open(TEXTURE_PATH, true) {
            Ok(image) => image,
            Err(e) => {
                eprintln!("Could not load {TEXTURE_PATH}: {e}");
                Image::placeholder()
            }
        };

        let texture = Texture2D::new(
            texture_image.width(),
            texture_image.height(),
            texture_image.pixels(),
            TextureFilter::Linear,
        )
        .unwrap();

        drop(texture_image);

        let program = match ProgramBuilder::from_paths(VERT_PATH, FRAG_PATH)
            .and_then(ProgramBuilder::build)
        {
            Ok(program) => program,
            Err(e) => {
                eprintln!("Could not build shader program: {e}");
                std::process::exit(-1);
            }
        };

        program.bind(renderer.bindings_mut());

        let color_location = program.uniform_location("u_color");
        let texture_location = program.uniform_location("u_texture");

        if let Some(location) = texture_location {
            program.set_int(location, 0);
        }

        let mut timer = FrameTimer::start();
        let mut time = 0.0_f32;

        event_loop.run(move |event, _window_target, control_flow| {
            *control_flow = ControlFlow::Poll;

            match event {
                Event::MainEventsCleared => {
                    gl_window.window.request_redraw();
                }
                Event::RedrawRequested(_) => {
                    time += timer.tick();

                    renderer.clear_color(0.0, 0.0, 0.0);

                    if let Some(location) = color_location {
                        program.set_vec4(location, pulse::color(time));
                    }

                    vertex_buffer.bind(renderer.bindings_mut());
                    index_buffer.bind(renderer.bindings_mut());
                    texture.bind(0, renderer.bindings_mut());

                    renderer.draw_indexed(&program, &vertex_buffer, &index_buffer);

                    index_buffer.unbind(renderer.bindings_mut());
                    vertex_buffer.unbind(renderer.bindings_mut());

                    gl_window.surface.swap_buffers(&gl_context).unwrap();
                }
                Event::WindowEvent { event, .. } => {
                    if should_close(&event) {
                        control_flow.set_exit();
                    }
                }
                _ => (),
            }
        })
    }
}

fn quad_vertices() -> [Vertex; 4] {
    [
        Vertex::new([-0.5, -0.5, 0.0], [0.0, 0.0], [1.0, 0.0, 0.0, 1.0]),
        Vertex::new([-0.5, 0.5, 0.0], [0.0, 1.0], [0.0, 1.0, 0.0, 1.0]),
        Vertex::new([0.5, -0.5, 0.0], [1.0, 0.0], [0.0, 0.0, 1.0, 1.0]),
        Vertex::new([0.5, 0.5, 0.0], [1.0, 1.0], [1.0, 0.0, 0.0, 1.0]),
    ]
}

#[rustfmt::skip]
const QUAD_INDICES: [u32; 6] = [
    0, 1, 2,
    1, 2, 3,
];

fn should_close(event: &WindowEvent) -> bool {
    matches!(event, WindowEvent::CloseRequested)
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Self {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).unwrap(),
            NonZeroU32::new(height).unwrap(),
        );

        let surface = unsafe {
            config
                .display()
                .create_window_surface(config, &attrs)
                .unwrap()
        };

        Self { window, surface }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not load OpenGL function pointers")]
    LoaderInit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn close_requested_ends_the_loop() {
        assert!(should_close(&WindowEvent::CloseRequested));
    }

    #[test]
    fn other_events_are_discarded() {
        assert!(!should_close(&WindowEvent::Focused(true)));
        assert!(!should_close(&WindowEvent::Moved(PhysicalPosition::new(
            10, 20
        ))));
    }

    #[test]
    fn quad_indices_reference_the_four_corners() {
        let vertices = quad_vertices();

        assert_eq!(vertices.len(), 4);
        assert_eq!(QUAD_INDICES.len(), 6);
        assert!(QUAD_INDICES.iter().all(|i| (*i as usize) < vertices.len()));
    }
}
