/**
 * Validation Stage
 *
 * Binds a schema to one request section. On success the cleaned value
 * replaces that section for every downstream stage; on failure the chain
 * terminates with the collected messages and nothing downstream — neither
 * authentication nor business logic — ever runs.
 *
 * Rejected input is a client condition, not a system fault: it is reported
 * through the funnel as a 412 and never logged as an error.
 */

use async_trait::async_trait;

use crate::error::ApiError;
use crate::pipeline::{RequestContext, Section, Stage, StageOutcome};
use crate::validate::schema::Schema;

pub struct ValidateStage {
    schema: Schema,
    section: Section,
}

impl ValidateStage {
    pub fn new(schema: Schema, section: Section) -> Self {
        Self { schema, section }
    }

    /// Validate the request body — the common case.
    pub fn body(schema: Schema) -> Self {
        Self::new(schema, Section::Body)
    }

    /// Validate the path parameters.
    pub fn params(schema: Schema) -> Self {
        Self::new(schema, Section::Params)
    }
}

#[async_trait]
impl Stage for ValidateStage {
    fn name(&self) -> &'static str {
        "validate"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        let input = ctx.section(self.section);
        match self.schema.validate(&input) {
            Ok(clean) => {
                ctx.replace_section(self.section, clean);
                Ok(StageOutcome::Next)
            }
            Err(errors) => Err(ApiError::validation(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::schema::Kind;
    use axum::{body::Body, extract::Request};
    use serde_json::json;

    async fn ctx_with_body(body: &str) -> RequestContext {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body.to_string()))
            .unwrap();
        RequestContext::from_request(req).await.unwrap()
    }

    #[tokio::test]
    async fn test_success_replaces_the_body() {
        let mut ctx = ctx_with_body(r#"{"title":" hi ","junk":1,"body":"text"}"#).await;
        let stage = ValidateStage::body(
            Schema::new()
                .require("title", Kind::text())
                .require("body", Kind::text()),
        );

        let outcome = stage.run(&mut ctx).await.unwrap();
        assert!(matches!(outcome, StageOutcome::Next));
        assert_eq!(ctx.body(), &json!({"title": "hi", "body": "text"}));
    }

    #[tokio::test]
    async fn test_failure_terminates_with_all_messages() {
        let mut ctx = ctx_with_body("{}").await;
        let stage = ValidateStage::body(
            Schema::new()
                .require("title", Kind::text())
                .require("body", Kind::text()),
        );

        let err = stage.run(&mut ctx).await.unwrap_err();
        match err {
            ApiError::Validation { errors } => assert_eq!(errors.len(), 2),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
