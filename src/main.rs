use actix_web::{web, App, HttpServer};
use log::info;
use log4rs;

use image_store::api::{get_photo, health, list_photos, save_photo};
use image_store::app_state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    log4rs::init_file("server_log.yaml", Default::default()).unwrap();

    let state = AppState::new();
    let host = state.config.server.host.clone();
    let port = state.config.server.port;
    let workers = state.config.server.workers;
    let max_payload_size = state.config.server.max_payload_size as usize;

    info!("Starting image service on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .app_data(web::Data::new(state.clone()))
            .service(list_photos)
            .service(save_photo)
            .service(get_photo)
            .service(health)
    })
    .bind((host, port))?
    .workers(workers)
    .run()
    .await
}
