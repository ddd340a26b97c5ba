//! Wire types shared between the agentmart client and anything else that
//! speaks the marketplace API.

pub mod envelope;
pub mod types;

pub use envelope::{DataEnvelope, ErrorBody, Listing, OptionalData, PrebuiltTeams};
pub use types::*;
