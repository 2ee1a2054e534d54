/**
 * Chain Driver
 *
 * Executes the ordered stages bound to one route. Stages run strictly in
 * sequence; the first terminal action (a response or a failure) ends the
 * request and nothing runs after it. Failures are not handled locally:
 * they flow to the error funnel, the only place that renders an error
 * response.
 */

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::pipeline::context::{ApiReply, RequestContext};

/// What a stage decided after inspecting the context.
#[derive(Debug)]
pub enum StageOutcome {
    /// Pass control to the next stage in the chain.
    Next,
    /// Terminate the chain with this success response.
    Respond(ApiReply),
}

/// One step of a request-processing chain.
///
/// A stage may mutate the context (attach an identity, park an intermediate
/// result) and then either continue the chain, finish it with a response,
/// or fail it with a typed error.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Short stage name, used in trace output.
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError>;
}

/// The ordered list of stages bound to one route.
pub struct Chain {
    name: &'static str,
    stages: Vec<Arc<dyn Stage>>,
}

impl Chain {
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            stages: Vec::new(),
        }
    }

    pub fn stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Build the request context and drive the chain to its one terminal
    /// action.
    pub async fn execute(self, req: Request) -> Response {
        let ctx = match RequestContext::from_request(req).await {
            Ok(ctx) => ctx,
            Err(err) => return err.into_response(),
        };
        self.run(ctx).await
    }

    /// Drive the stages over an already-built context.
    pub async fn run(&self, mut ctx: RequestContext) -> Response {
        for stage in &self.stages {
            match stage.run(&mut ctx).await {
                Ok(StageOutcome::Next) => {
                    tracing::debug!(chain = self.name, stage = stage.name(), "stage complete");
                }
                Ok(StageOutcome::Respond(reply)) => {
                    tracing::debug!(
                        chain = self.name,
                        stage = stage.name(),
                        status = reply.status.as_u16(),
                        "chain complete"
                    );
                    return reply.into_response();
                }
                Err(err) => {
                    tracing::debug!(chain = self.name, stage = stage.name(), "chain failed");
                    return err.into_response();
                }
            }
        }

        // Every chain must end in a responding stage; falling off the end is
        // a wiring mistake.
        tracing::error!(chain = self.name, "chain finished without a terminal stage");
        ApiError::system("chain finished without a terminal stage").into_response()
    }
}
