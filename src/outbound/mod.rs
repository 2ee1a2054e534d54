//! Outbound integrations. External HTTP collaborators only; nothing here
//! touches the document store.

pub mod mailing;
