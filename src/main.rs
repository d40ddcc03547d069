#[tokio::main]
async fn main() {
    if let Err(err) = app::run().await {
        eprintln!("teamgate failed to start: {err}");
        std::process::exit(1);
    }
}

mod api;
mod app;
mod auth;
mod dto;
mod error;
mod gate;
mod models;
mod repositories;
mod services;
mod telemetry;
mod usecases;
