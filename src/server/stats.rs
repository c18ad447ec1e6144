//! Broker counters over HTTP.

use actix_web::{error, web, Error, HttpResponse};

use crate::server::signaling::server::GetStats;
use crate::server::state::AppState;

/// `GET /stats`: connected clients, waiting clients and live rooms.
pub async fn stats(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let stats = data
        .signaling_addr
        .send(GetStats)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(stats))
}

#[cfg(test)]
mod tests {
    use actix::prelude::*;
    use actix_web::{http::StatusCode, test, web, App};

    use crate::server::router;
    use crate::server::signaling::messages::Deliver;
    use crate::server::signaling::server::{Connect, JoinWaiting, SignalingServer};
    use crate::server::signaling::types::{BrokerStats, ClientId};
    use crate::server::state::AppState;

    struct Sink;

    impl Actor for Sink {
        type Context = Context<Self>;
    }

    impl Handler<Deliver> for Sink {
        type Result = ();

        fn handle(&mut self, _msg: Deliver, _ctx: &mut Self::Context) {}
    }

    #[actix_web::test]
    async fn stats_reflects_broker_state() {
        let server = SignalingServer::new().start();
        let sink = Sink.start();
        for _ in 0..3 {
            let client_id = ClientId::new();
            server
                .send(Connect {
                    client_id,
                    username: None,
                    addr: sink.clone().recipient(),
                })
                .await
                .unwrap();
            server
                .send(JoinWaiting {
                    client_id,
                    username: None,
                })
                .await
                .unwrap();
        }

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(server)))
                .configure(router::config),
        )
        .await;
        let req = test::TestRequest::get().uri("/stats").to_request();
        let body: BrokerStats = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, BrokerStats { clients: 3, waiting: 1, rooms: 1 });
    }

    #[actix_web::test]
    async fn ws_route_requires_upgrade() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(SignalingServer::new().start())))
                .configure(router::config),
        )
        .await;
        let req = test::TestRequest::get().uri("/ws").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
