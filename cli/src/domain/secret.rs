//! Secret field model: the editable rows making up one credential's secret.
//!
//! A credential's `secret` is a JSON object of sub-key/value pairs. While it
//! is being authored it is held as an ordered list of [`SecretField`] rows,
//! validated as a whole, and only then serialized back to JSON.
//!
//! Pure data in, data out. No I/O.

use std::collections::BTreeMap;

use agentmart_common::{FieldType, SecretFieldSpec};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::domain::error::SecretFormError;

/// Key given to the single row holding a secret that is not a JSON object.
pub const DEFAULT_FIELD_KEY: &str = "default";

pub const MSG_REQUIRED: &str = "This field is required";
pub const MSG_AT_LEAST_ONE: &str = "At least one secret value is required";
pub const MSG_VALUE_WITHOUT_KEY: &str = "Key is required when a value is set";
pub const MSG_KEY_WITHOUT_VALUE: &str = "Value is required when a key is set";
pub const MSG_DUPLICATE_KEY: &str = "Duplicate key";
pub const MSG_NOT_A_NUMBER: &str = "Must be a number";
pub const MSG_NOT_A_BOOLEAN: &str = "Must be true or false";

/// One key/value row of a secret being composed or edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretField {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Seeded from a tool's declared schema.
    pub tool_sourced: bool,
}

impl SecretField {
    /// A user-defined row.
    #[must_use]
    pub fn freeform(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            field_type: FieldType::String,
            required: false,
            description: None,
            tool_sourced: false,
        }
    }

    /// A required row declared by a tool's schema, with an empty value.
    #[must_use]
    pub fn from_spec(spec: &SecretFieldSpec) -> Self {
        Self {
            key: spec.key.clone(),
            value: String::new(),
            field_type: spec.field_type,
            required: true,
            description: spec.description.clone(),
            tool_sourced: true,
        }
    }

    /// Whether the key of this row may be edited.
    #[must_use]
    pub fn key_locked(&self) -> bool {
        self.tool_sourced || self.required
    }

    fn is_blank(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }
}

/// Validation messages for a single row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Result of [`SecretForm::validate`]. Empty means the form may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    /// Error about the form as a whole rather than a single row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
    /// Row errors keyed by row index.
    pub rows: BTreeMap<usize, RowError>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.form.is_none() && self.rows.is_empty()
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&RowError> {
        self.rows.get(&index)
    }

    // The first message recorded for a slot is kept.
    fn key_error(&mut self, index: usize, msg: &str) {
        self.rows
            .entry(index)
            .or_default()
            .key
            .get_or_insert_with(|| msg.to_string());
    }

    fn value_error(&mut self, index: usize, msg: &str) {
        self.rows
            .entry(index)
            .or_default()
            .value
            .get_or_insert_with(|| msg.to_string());
    }

    /// Flatten to one human-readable line per problem, labelling rows by key
    /// (or by position when the key is empty).
    #[must_use]
    pub fn messages(&self, fields: &[SecretField]) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(msg) = &self.form {
            out.push(msg.clone());
        }
        for (index, err) in &self.rows {
            let label = fields
                .get(*index)
                .map(|f| f.key.as_str())
                .filter(|k| !k.is_empty())
                .map_or_else(|| format!("field #{}", index + 1), |k| format!("'{k}'"));
            if let Some(msg) = &err.key {
                out.push(format!("{label} key: {msg}"));
            }
            if let Some(msg) = &err.value {
                out.push(format!("{label} value: {msg}"));
            }
        }
        out
    }
}

/// Ordered list of secret rows for one credential being authored.
///
/// Always holds at least one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretForm {
    fields: Vec<SecretField>,
    schema_locked: bool,
}

impl Default for SecretForm {
    fn default() -> Self {
        Self::blank()
    }
}

impl SecretForm {
    /// Seed a form. First match wins:
    ///
    /// 1. a non-empty `schema` seeds one required row per declared sub-key;
    /// 2. an `existing` secret is parsed (see [`SecretForm::from_existing`]);
    /// 3. otherwise a single empty row.
    #[must_use]
    pub fn seed(schema: Option<&[SecretFieldSpec]>, existing: Option<&str>) -> Self {
        match (schema, existing) {
            (Some(specs), _) if !specs.is_empty() => Self::from_schema(specs),
            (_, Some(secret)) => Self::from_existing(secret),
            _ => Self::blank(),
        }
    }

    /// A single empty freeform row.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            fields: vec![SecretField::freeform("", "")],
            schema_locked: false,
        }
    }

    /// One required, tool-sourced row per declared sub-key. Falls back to a
    /// blank form when `specs` is empty.
    #[must_use]
    pub fn from_schema(specs: &[SecretFieldSpec]) -> Self {
        if specs.is_empty() {
            return Self::blank();
        }
        Self {
            fields: specs.iter().map(SecretField::from_spec).collect(),
            schema_locked: true,
        }
    }

    /// Rebuild rows from a stored secret.
    ///
    /// A JSON object gives one row per property, typed after the JSON value.
    /// Anything else (including text that is not JSON at all) becomes a single
    /// `default` row holding the raw string.
    #[must_use]
    pub fn from_existing(secret: &str) -> Self {
        let fields = match serde_json::from_str::<Value>(secret) {
            Ok(Value::Object(map)) if !map.is_empty() => map
                .into_iter()
                .map(|(key, value)| {
                    let (text, field_type) = render_json_value(value);
                    SecretField {
                        field_type,
                        ..SecretField::freeform(key, text)
                    }
                })
                .collect(),
            Ok(Value::Object(_)) => vec![SecretField::freeform("", "")],
            _ => vec![SecretField::freeform(DEFAULT_FIELD_KEY, secret)],
        };
        Self {
            fields,
            schema_locked: false,
        }
    }

    #[must_use]
    pub fn fields(&self) -> &[SecretField] {
        &self.fields
    }

    /// Whether the rows are fixed by a tool's schema.
    #[must_use]
    pub fn is_schema_locked(&self) -> bool {
        self.schema_locked
    }

    #[must_use]
    pub fn can_add_field(&self) -> bool {
        !self.schema_locked
    }

    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key == key)
    }

    /// Append an empty freeform row and return its index.
    pub fn add_field(&mut self) -> Result<usize, SecretFormError> {
        if self.schema_locked {
            return Err(SecretFormError::SchemaLocked);
        }
        self.fields.push(SecretField::freeform("", ""));
        Ok(self.fields.len() - 1)
    }

    pub fn remove_field(&mut self, index: usize) -> Result<SecretField, SecretFormError> {
        let field = self
            .fields
            .get(index)
            .ok_or(SecretFormError::NoSuchField(index))?;
        if field.required || field.tool_sourced {
            return Err(SecretFormError::RequiredField(field.key.clone()));
        }
        if self.fields.len() == 1 {
            return Err(SecretFormError::LastField);
        }
        Ok(self.fields.remove(index))
    }

    pub fn set_key(&mut self, index: usize, key: impl Into<String>) -> Result<(), SecretFormError> {
        let field = self
            .fields
            .get_mut(index)
            .ok_or(SecretFormError::NoSuchField(index))?;
        if field.key_locked() {
            return Err(SecretFormError::KeyLocked(field.key.clone()));
        }
        field.key = key.into();
        Ok(())
    }

    pub fn set_value(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), SecretFormError> {
        let field = self
            .fields
            .get_mut(index)
            .ok_or(SecretFormError::NoSuchField(index))?;
        field.value = value.into();
        Ok(())
    }

    /// Set `key` to `value`, the way a user would fill the form in:
    /// an existing row with that key gets the value; otherwise a single blank
    /// row is reused; otherwise a new row is added.
    pub fn upsert(&mut self, key: &str, value: &str) -> Result<usize, SecretFormError> {
        if let Some(index) = self.position(key) {
            self.set_value(index, value)?;
            return Ok(index);
        }
        let index = match self.fields.iter().position(SecretField::is_blank) {
            Some(blank) if !self.fields[blank].key_locked() => blank,
            _ => self.add_field()?,
        };
        self.set_key(index, key)?;
        self.set_value(index, value)?;
        Ok(index)
    }

    /// Check the rows before submission.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        for (i, field) in self.fields.iter().enumerate() {
            if field.required && field.value.is_empty() {
                errors.value_error(i, MSG_REQUIRED);
            }
        }

        if let [only] = self.fields.as_slice() {
            if only.is_blank() {
                errors.form = Some(MSG_AT_LEAST_ONE.to_string());
            }
        }

        for (i, field) in self.fields.iter().enumerate() {
            match (field.key.is_empty(), field.value.is_empty()) {
                (false, true) => errors.value_error(i, MSG_KEY_WITHOUT_VALUE),
                (true, false) => errors.key_error(i, MSG_VALUE_WITHOUT_KEY),
                _ => {}
            }
        }

        let mut seen: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (i, field) in self.fields.iter().enumerate() {
            if !field.key.is_empty() {
                seen.entry(field.key.as_str()).or_default().push(i);
            }
        }
        for indices in seen.values().filter(|v| v.len() > 1) {
            for &i in indices {
                errors.key_error(i, MSG_DUPLICATE_KEY);
            }
        }

        for (i, field) in self.fields.iter().enumerate() {
            if field.value.is_empty() {
                continue;
            }
            match field.field_type {
                FieldType::Number if parse_number(&field.value).is_none() => {
                    errors.value_error(i, MSG_NOT_A_NUMBER);
                }
                FieldType::Boolean if !matches!(field.value.as_str(), "true" | "false") => {
                    errors.value_error(i, MSG_NOT_A_BOOLEAN);
                }
                _ => {}
            }
        }

        errors
    }

    /// Build the secret object from rows with both a key and a value, in row
    /// order, coercing values by type. Incomplete rows are dropped.
    #[must_use]
    pub fn to_secret_object(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|f| !f.key.is_empty() && !f.value.is_empty())
            .map(|f| (f.key.clone(), coerce(f)))
            .collect()
    }

    /// The JSON string stored as the credential's `secret`.
    #[must_use]
    pub fn to_secret_json(&self) -> String {
        Value::Object(self.to_secret_object()).to_string()
    }
}

fn render_json_value(value: Value) -> (String, FieldType) {
    match value {
        Value::String(s) => (s, FieldType::String),
        Value::Number(n) => (n.to_string(), FieldType::Number),
        Value::Bool(b) => (b.to_string(), FieldType::Boolean),
        other => (other.to_string(), FieldType::String),
    }
}

/// Parse a numeric field. Integral values encode as integers, so `"1"`,
/// `"1.0"` and `"1e0"` all become `1`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn parse_number(raw: &str) -> Option<Number> {
    let trimmed = raw.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Number::from(i));
    }
    if let Ok(u) = trimmed.parse::<u64>() {
        return Some(Number::from(u));
    }
    let v = trimmed.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        return Some(Number::from(v as i64));
    }
    Number::from_f64(v)
}

fn coerce(field: &SecretField) -> Value {
    match field.field_type {
        FieldType::Number => parse_number(&field.value)
            .map_or_else(|| Value::String(field.value.clone()), Value::Number),
        FieldType::Boolean => Value::Bool(field.value == "true"),
        FieldType::String => Value::String(field.value.clone()),
    }
}
