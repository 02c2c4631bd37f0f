//! Schema extension that tags engine-level failures with a code.
//!
//! Errors raised before any resolver runs (a document that does not parse,
//! a selection the schema rejects) come out of async-graphql without
//! `extensions.code`; this adds one so clients can branch on it.

use std::sync::Arc;

use async_graphql::extensions::{
    Extension, ExtensionContext, ExtensionFactory, NextParseQuery, NextValidation,
};
use async_graphql::parser::types::ExecutableDocument;
use async_graphql::{ServerError, ServerResult, ValidationResult, Variables};
use tracing::debug;

pub const GRAPHQL_PARSE_FAILED: &str = "GRAPHQL_PARSE_FAILED";
pub const GRAPHQL_VALIDATION_FAILED: &str = "GRAPHQL_VALIDATION_FAILED";

pub struct EngineErrorCodes;

impl ExtensionFactory for EngineErrorCodes {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(EngineErrorCodesExtension)
    }
}

struct EngineErrorCodesExtension;

/// Set `code` unless the error already carries one.
pub fn with_code(mut err: ServerError, code: &str) -> ServerError {
    let mut extensions = err.extensions.take().unwrap_or_default();
    if extensions.get("code").is_none() {
        extensions.set("code", code.to_string());
    }
    err.extensions = Some(extensions);
    err
}

#[async_trait::async_trait]
impl Extension for EngineErrorCodesExtension {
    async fn parse_query(
        &self,
        ctx: &ExtensionContext<'_>,
        query: &str,
        variables: &Variables,
        next: NextParseQuery<'_>,
    ) -> ServerResult<ExecutableDocument> {
        next.run(ctx, query, variables).await.map_err(|err| {
            debug!(error = %err.message, "graphql: document rejected by parser");
            with_code(err, GRAPHQL_PARSE_FAILED)
        })
    }

    async fn validation(
        &self,
        ctx: &ExtensionContext<'_>,
        next: NextValidation<'_>,
    ) -> Result<ValidationResult, Vec<ServerError>> {
        next.run(ctx).await.map_err(|errors| {
            debug!(count = errors.len(), "graphql: document failed validation");
            errors
                .into_iter()
                .map(|err| with_code(err, GRAPHQL_VALIDATION_FAILED))
                .collect()
        })
    }
}
