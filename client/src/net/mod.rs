//! Networking modules for the CRM GraphQL API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `queries` holds the operation text, `graphql` the request envelope and
//! transport, `api` the typed calls built on both, and `types` the wire
//! schema.

pub mod api;
pub mod graphql;
pub mod queries;
pub mod types;
