mod api;
mod app;
mod application;
mod domain;
mod ui;
mod utils;

fn main() -> iced::Result {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Starting song downloader");

    iced::application(app::DownloadApp::default, app::update, app::view)
        .title("Song Downloader")
        .run()
}
