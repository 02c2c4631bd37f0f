use actix_web::{web, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use tracing::debug;

use crate::error::AppError;
use crate::extractors::request_context::RequestContext;
use crate::graphql::classify::MAX_BODY_BYTES;
use crate::middleware::graphql_auth::GraphqlAuth;
use crate::state::app_state::AppState;

pub const GRAPHQL_PATH: &str = "/query";

/// Execute one GraphQL request, from a POST body or GET query parameters.
///
/// A request that does not decode is a 400; anything the schema sees
/// answers 200, with failures in `errors`.
async fn query(
    state: web::Data<AppState>,
    ctx: RequestContext,
    request: Result<GraphQLRequest, actix_web::Error>,
) -> Result<GraphQLResponse, AppError> {
    let request = request.map_err(|e| {
        debug!(error = %e, "graphql request does not decode");
        AppError::bad_request("Invalid GraphQL request body")
    })?;

    let request = request.into_inner().data(state.clone()).data(ctx);
    Ok(state.schema.execute(request).await.into())
}

/// GraphiQL IDE pointed at the GraphQL endpoint.
async fn playground() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(GRAPHQL_PATH)
            .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
            .wrap(GraphqlAuth)
            .route(web::post().to(query))
            .route(web::get().to(query)),
    )
    .service(web::resource("/").route(web::get().to(playground)));
}
