use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered mapping from credential key to its human-readable description.
///
/// Order is the order keys were first declared; the API sends objects whose
/// key order is meaningful to the dashboard, so it is preserved on decode.
pub type RequirementMap = IndexMap<String, String>;

/// Value type of a single secret sub-field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Number,
    Boolean,
}

impl FieldType {
    /// Wire name of the type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared sub-key of a tool's credential schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecretFieldSpec {
    pub key: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// What a tool declares for one credential key.
///
/// Most tools only describe the key; some also declare the sub-fields the
/// secret payload must contain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CredentialRequirement {
    Description(String),
    Schema {
        #[serde(default)]
        description: Option<String>,
        fields: Vec<SecretFieldSpec>,
    },
}

impl CredentialRequirement {
    /// Human-readable description, empty when the schema carries none.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            CredentialRequirement::Description(d) => d,
            CredentialRequirement::Schema { description, .. } => {
                description.as_deref().unwrap_or_default()
            }
        }
    }

    /// Declared secret sub-fields (empty for description-only requirements).
    #[must_use]
    pub fn fields(&self) -> &[SecretFieldSpec] {
        match self {
            CredentialRequirement::Description(_) => &[],
            CredentialRequirement::Schema { fields, .. } => fields,
        }
    }
}

/// A tool an agent can use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tool {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub credentials: IndexMap<String, CredentialRequirement>,
}

/// A marketplace agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub tools: Vec<Tool>,
    #[serde(default)]
    pub required_credentials: RequirementMap,
    #[serde(default)]
    pub status: String,
}

/// A credential stored for the signed-in user.
///
/// `key` is shared by every credential for the same service; `name` tells
/// two stored credentials with the same key apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub key: String,
    pub name: String,
    /// JSON-encoded object of sub-key/value pairs.
    #[serde(default)]
    pub secret: String,
}

/// The server's echo of a stored credential. Any field may be missing;
/// missing strings decode as empty so the caller can fill them from the
/// request it sent.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CredentialEcho {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub secret: String,
}

impl From<CredentialEcho> for Credential {
    fn from(echo: CredentialEcho) -> Self {
        Self {
            id: echo.id,
            key: echo.key,
            name: echo.name,
            secret: echo.secret,
        }
    }
}

/// Body of the store-credential call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCredential {
    pub key: String,
    pub secret: String,
    pub name: String,
}

/// Body of the update-credential call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialUpdate {
    pub key: String,
    pub name: String,
    pub value: String,
}

/// Identifies a stored credential for deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialRef {
    pub key: String,
    pub name: String,
}

/// A team the user already owns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub agent_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A curated team offered on the explore page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrebuiltTeam {
    #[serde(default)]
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub agents: Vec<Agent>,
}

/// Discriminates user-assembled teams from recruited pre-built ones.
///
/// Sent as a bare integer: `1` for custom, `2` for pre-built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionKind {
    Custom,
    Prebuilt,
}

impl ProvisionKind {
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            ProvisionKind::Custom => 1,
            ProvisionKind::Prebuilt => 2,
        }
    }
}

impl Serialize for ProvisionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for ProvisionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            1 => Ok(ProvisionKind::Custom),
            2 => Ok(ProvisionKind::Prebuilt),
            other => Err(serde::de::Error::custom(format!(
                "unknown provision kind {other}, expected 1 or 2"
            ))),
        }
    }
}

/// Team section of a create-team request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamPayload {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub agent_ids: Vec<String>,
    pub credentials: IndexMap<String, Credential>,
}

/// Body of the recruit/create-team call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamCreateRequest {
    pub name: String,
    pub provision: ProvisionKind,
    pub team: TeamPayload,
}

/// Data returned after a team has been created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamCreated {
    #[serde(rename = "teamId")]
    pub team_id: String,
}

impl TeamCreated {
    /// Dashboard route of the new team.
    #[must_use]
    pub fn dashboard_path(&self) -> String {
        format!("/dashboard/team/{}", self.team_id)
    }
}

/// Sign-up / sign-in body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

/// Token issued by sign-up / sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: String,
    #[serde(default)]
    pub email: Option<String>,
}
