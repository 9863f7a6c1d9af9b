//! Plain request/response HTTP endpoint alongside the WebSocket one, for
//! callers that don't need a persistent connection (the CLI, health
//! checks, simple integration tests).

use std::sync::Arc;

use actix_web::{post, web, HttpResponse};

use crate::worker::{Request, Response, RoutingWorker};

#[post("/route")]
pub async fn route(
    request: web::Json<Request>,
    worker: web::Data<Arc<RoutingWorker>>,
) -> HttpResponse {
    let worker = worker.get_ref().clone();
    let request = request.into_inner();

    let response =
        match actix_web::rt::task::spawn_blocking(move || worker.handle(request)).await {
            Ok(response) => response,
            Err(e) => Response::Error { error: format!("routing task panicked: {e}") },
        };

    HttpResponse::Ok().json(response)
}
