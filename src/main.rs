mod app;
mod config;
mod detail;
mod drag_area;
mod error;
mod grid;
mod layout;
mod metadata;
mod route;
mod source;
mod tile;

fn main() -> iced::Result {
    env_logger::init();
    let config = match config::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    app::run(config)
}
