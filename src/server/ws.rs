//! WebSocket transport for the routing core, modelled on the teacher's
//! `OptimizationWs` actor: a heartbeat loop guarding against dead
//! connections, and request handling dispatched to a blocking thread
//! pool so a slow search never stalls the actix-web event loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::{Actor, ActorContext, AsyncContext, Handler, Message, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;

use crate::worker::{Request, Response, RoutingWorker};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(15);

pub struct RouteWs {
    worker: Arc<RoutingWorker>,
    last_heartbeat: Instant,
}

impl RouteWs {
    pub fn new(worker: Arc<RoutingWorker>) -> Self {
        RouteWs { worker, last_heartbeat: Instant::now() }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                log::warn!("routing websocket client timed out, closing");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }
}

impl Actor for RouteWs {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.start_heartbeat(ctx);
    }
}

/// Internal message carrying a worker response back onto the actor's
/// mailbox once the blocking calculation finishes.
struct CalculateDone(Response);

impl Message for CalculateDone {
    type Result = ();
}

impl Handler<CalculateDone> for RouteWs {
    type Result = ();

    fn handle(&mut self, msg: CalculateDone, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg.0) {
            Ok(body) => ctx.text(body),
            Err(e) => log::error!("failed to serialise routing response: {e}"),
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for RouteWs {
    fn handle(&mut self, item: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        let msg = match item {
            Ok(msg) => msg,
            Err(e) => {
                log::warn!("routing websocket protocol error: {e}");
                ctx.stop();
                return;
            }
        };

        match msg {
            ws::Message::Ping(bytes) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&bytes);
            }
            ws::Message::Pong(_) => {
                self.last_heartbeat = Instant::now();
            }
            ws::Message::Text(text) => {
                let request: Request = match serde_json::from_str(&text) {
                    Ok(req) => req,
                    Err(e) => {
                        let response = Response::Error { error: format!("malformed request: {e}") };
                        if let Ok(body) = serde_json::to_string(&response) {
                            ctx.text(body);
                        }
                        return;
                    }
                };

                let worker = self.worker.clone();
                let addr = ctx.address();
                actix_web::rt::spawn(async move {
                    let response =
                        actix_web::rt::task::spawn_blocking(move || worker.handle(request))
                            .await
                            .unwrap_or_else(|e| Response::Error {
                                error: format!("routing task panicked: {e}"),
                            });
                    addr.do_send(CalculateDone(response));
                });
            }
            ws::Message::Close(reason) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => {}
        }
    }
}

pub async fn route_ws(
    req: HttpRequest,
    stream: web::Payload,
    worker: web::Data<Arc<RoutingWorker>>,
) -> Result<HttpResponse, Error> {
    ws::start(RouteWs::new(worker.get_ref().clone()), &req, stream)
}
