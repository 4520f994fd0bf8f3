/**
 * GraphQL Handlers
 *
 * - `POST /graphql` - execute a query or mutation
 * - `GET /graphql` - GraphiQL playground
 * - `GET /graphql/ws` - subscriptions over websocket (graphql-ws)
 * - `GET /graphql/schema` - schema in SDL
 */

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use crate::backend::graphql::schema::FeedSchema;
use crate::backend::middleware::auth::Identity;

pub const GRAPHQL_PATH: &str = "/graphql";
pub const GRAPHQL_WS_PATH: &str = "/graphql/ws";

/// Execute a GraphQL request with the caller's identity attached
pub async fn graphql_handler(
    State(schema): State<FeedSchema>,
    Identity(identity): Identity,
    request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(request.into_inner().data(identity)).await.into()
}

pub async fn graphiql() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint(GRAPHQL_PATH)
            .subscription_endpoint(GRAPHQL_WS_PATH)
            .finish(),
    )
}

pub async fn schema_sdl(State(schema): State<FeedSchema>) -> String {
    schema.sdl()
}
