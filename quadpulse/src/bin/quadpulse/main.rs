use clap::Parser;

mod app;
mod args;

use app::App;
use args::Args;

fn main() {
    let args = Args::parse();

    let app = match App::new(&args) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Could not initialize OpenGL: {e}");
            std::process::exit(1);
        }
    };

    app.run();
}
