mod app;
mod audio;
mod config;
mod library;
mod mpris;
mod playlist;
mod runtime;
mod ui;
mod viz;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
