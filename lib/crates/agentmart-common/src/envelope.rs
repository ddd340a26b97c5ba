//! Response envelopes.
//!
//! The marketplace API is not consistent about wrapping: some endpoints
//! return a bare array, some wrap it in `{data: ...}`, and the pre-built
//! team endpoint may key teams by category. Every shape is accepted here so
//! callers only ever see plain vectors.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::PrebuiltTeam;

/// `{ "data": T }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// `{ "data": T }` where `data` may be absent or null, as in a bare
/// `{ "success": true }` acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionalData<T> {
    #[serde(default)]
    pub data: Option<T>,
}

/// A list that may or may not be wrapped in `{data: [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Wrapped { data } | Listing::Bare(data) => data,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PrebuiltShape {
    List(Vec<PrebuiltTeam>),
    ByCategory(IndexMap<String, PrebuiltTeam>),
}

/// Pre-built teams as returned by the explore endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PrebuiltTeams {
    Wrapped { data: PrebuiltShapeWrapper },
    Direct(PrebuiltShapeWrapper),
}

/// Opaque carrier for the list-or-map body.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct PrebuiltShapeWrapper(PrebuiltShape);

impl PrebuiltTeams {
    /// Flatten to a list, filling a missing `category` from the map key.
    #[must_use]
    pub fn into_teams(self) -> Vec<PrebuiltTeam> {
        let (PrebuiltTeams::Wrapped { data: shape } | PrebuiltTeams::Direct(shape)) = self;
        match shape.0 {
            PrebuiltShape::List(teams) => teams,
            PrebuiltShape::ByCategory(map) => map
                .into_iter()
                .map(|(category, mut team)| {
                    if team.category.is_empty() {
                        team.category = category;
                    }
                    team
                })
                .collect(),
        }
    }
}

/// Error body returned by the API on failure.
///
/// Some endpoints answer 200 with `{"success": false, "message": ...}`, so
/// `success` is read too.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Server-supplied message, preferring `message` over `error`.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}
