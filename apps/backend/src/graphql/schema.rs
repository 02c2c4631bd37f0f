use async_graphql::extensions::apollo_persisted_queries::ApolloPersistedQueries;
use async_graphql::{EmptySubscription, Schema};

use super::extensions::EngineErrorCodes;
use super::persisted::PersistedQueryCache;
use super::resolvers::{MutationRoot, QueryRoot};

/// Deepest selection nesting a document may use. Leaves room for the
/// standard introspection query.
pub const MAX_QUERY_DEPTH: usize = 32;

pub type CustomerSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// The executable customer schema with introspection, persisted queries and
/// coded engine errors.
///
/// Per-request data (the `web::Data<AppState>` and the [`RequestContext`])
/// is attached by the `/query` handler.
///
/// [`RequestContext`]: crate::extractors::request_context::RequestContext
pub fn build_schema() -> CustomerSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .extension(EngineErrorCodes)
        .extension(ApolloPersistedQueries::new(PersistedQueryCache::default()))
        .limit_depth(MAX_QUERY_DEPTH)
        .finish()
}
