use clap::Parser;

#[derive(Debug, Parser)]
pub struct Args {
    /// Request a debug context and log every OpenGL error as it happens
    #[arg(long)]
    pub gl_debug: bool,
}
