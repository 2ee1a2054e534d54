/**
 * Per-Request Context
 *
 * The mutable scratch space threaded through a chain. It is built once from
 * the inbound request, owned exclusively by the chain executing that
 * request, and dropped when the response is emitted.
 *
 * Stages read the raw input (body, params, query, bearer token) and extend
 * the context with intermediate results: the validation stage replaces a
 * section with its stripped value, the authentication stage attaches the
 * resolved identity, and business stages park typed values in the bag for
 * the formatting stages downstream.
 */

use std::collections::HashMap;

use axum::{
    body::to_bytes,
    extract::{FromRequestParts, Query, RawPathParams, Request},
    http::{header::AUTHORIZATION, Extensions, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::{Map, Value};

use crate::auth::Identity;
use crate::error::ApiError;

/// Request sections a validation schema can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Body,
    Params,
    Query,
}

/// A finished success response: status plus JSON payload.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: StatusCode,
    pub payload: Value,
}

impl ApiReply {
    pub fn ok(payload: Value) -> Self {
        Self {
            status: StatusCode::OK,
            payload,
        }
    }

    pub fn created(payload: Value) -> Self {
        Self {
            status: StatusCode::CREATED,
            payload,
        }
    }
}

impl IntoResponse for ApiReply {
    fn into_response(self) -> Response {
        (self.status, Json(self.payload)).into_response()
    }
}

/// Mutable per-request scratch space shared by the stages of one chain.
#[derive(Debug)]
pub struct RequestContext {
    body: Value,
    params: HashMap<String, String>,
    query: HashMap<String, String>,
    bearer: Option<String>,
    identity: Option<Identity>,
    bag: Extensions,
}

/// Request bodies above this size are rejected before parsing.
const BODY_LIMIT: usize = 1024 * 1024;

impl RequestContext {
    /// Capture everything the stages may need from the inbound request.
    ///
    /// A body that is present but not valid JSON is a client-input
    /// condition and is reported as a validation failure, not a fault.
    pub async fn from_request(req: Request) -> Result<Self, ApiError> {
        let (mut parts, body) = req.into_parts();

        let params = match RawPathParams::from_request_parts(&mut parts, &()).await {
            Ok(raw) => raw
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            Err(_) => HashMap::new(),
        };

        let query = match Query::<HashMap<String, String>>::from_request_parts(&mut parts, &())
            .await
        {
            Ok(Query(map)) => map,
            Err(_) => HashMap::new(),
        };

        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .map(str::to_string);

        let bytes = to_bytes(body, BODY_LIMIT)
            .await
            .map_err(|err| ApiError::system(format!("failed to read request body: {err}")))?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|_| {
                ApiError::validation(vec!["request body must be valid JSON".to_string()])
            })?
        };

        Ok(Self {
            body,
            params,
            query,
            bearer,
            identity: None,
            bag: Extensions::default(),
        })
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn bearer(&self) -> Option<&str> {
        self.bearer.as_deref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn set_identity(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    /// Current value of a request section, as JSON.
    pub fn section(&self, section: Section) -> Value {
        match section {
            Section::Body => self.body.clone(),
            Section::Params => string_map_to_json(&self.params),
            Section::Query => string_map_to_json(&self.query),
        }
    }

    /// Replace a section with its validated (stripped, coerced) value.
    pub fn replace_section(&mut self, section: Section, clean: Map<String, Value>) {
        match section {
            Section::Body => self.body = Value::Object(clean),
            Section::Params => self.params = json_to_string_map(clean),
            Section::Query => self.query = json_to_string_map(clean),
        }
    }

    /// Park an intermediate result for a downstream stage.
    pub fn put<T: Clone + Send + Sync + 'static>(&mut self, value: T) {
        self.bag.insert(value);
    }

    /// Claim an intermediate result left by an upstream stage.
    ///
    /// A missing value means the chain was assembled wrong, which is a
    /// programming error, so this surfaces as a system fault.
    pub fn take<T: Clone + Send + Sync + 'static>(&mut self) -> Result<T, ApiError> {
        self.bag.remove::<T>().ok_or_else(|| {
            ApiError::system(format!(
                "missing {} in request context",
                std::any::type_name::<T>()
            ))
        })
    }
}

fn string_map_to_json(map: &HashMap<String, String>) -> Value {
    Value::Object(
        map.iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect(),
    )
}

fn json_to_string_map(clean: Map<String, Value>) -> HashMap<String, String> {
    clean
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect()
}
