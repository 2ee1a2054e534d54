//! API Resources
//!
//! One module per resource, each following the same layout: `model`
//! (document + views), `validation` (request schemas), `service` (domain
//! operations over a store collection), `stages` (pipeline stages) and
//! `routes` (route-to-chain bindings).

pub mod post;
pub mod user;
