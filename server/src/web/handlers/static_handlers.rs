// server/src/web/handlers/static_handlers.rs

use actix_files::NamedFile;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::{error, instrument};

use crate::state::AppState;

/// Serves the front-end's `index.html`.
#[instrument(name = "handler::index", skip_all)]
pub async fn index_handler(req: HttpRequest, app_state: web::Data<AppState>) -> HttpResponse {
  let index_path = app_state.config.static_dir.join("index.html");
  match NamedFile::open_async(&index_path).await {
    Ok(file) => file.into_response(&req),
    Err(err) => {
      error!(error = %err, path = %index_path.display(), "Failed to load index.html.");
      HttpResponse::InternalServerError().body("Error loading the application")
    }
  }
}

pub async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "ok" }))
}
