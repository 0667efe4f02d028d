//! Admin profile as returned by the authentication API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role name that grants every admin module.
pub const SUPER_ADMIN_ROLE: &str = "super_admin";

/// Identity, role and permitted modules of a logged-in admin.
///
/// The profile is kept as the JSON object the API sent, so a stored
/// profile reads back deep-equal to what was written, nulls and unknown
/// attributes included. Accessors interpret the well-known fields and
/// treat `null` like an absent field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminProfile(Map<String, Value>);

impl AdminProfile {
    /// Wrap a profile object as received.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a profile carrying only an identifier.
    pub fn with_id(id: impl Into<Value>) -> Self {
        Self::default().with_field("id", id)
    }

    /// Set an attribute, replacing any previous value.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Raw attribute lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The profile object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Admin identifier (numeric or UUID string, depending on the backend).
    pub fn id(&self) -> Option<&Value> {
        self.get("id").filter(|v| !v.is_null())
    }

    /// Login email.
    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    /// Display name.
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// Role name, e.g. `super_admin` or `admin`.
    pub fn role(&self) -> Option<&str> {
        self.str_field("role")
    }

    /// Back-office modules this admin may open. Absent, `null` or
    /// non-array values mean none.
    pub fn modules(&self) -> Vec<&str> {
        self.get("modules")
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether the profile has the super-admin role.
    pub fn is_super_admin(&self) -> bool {
        self.role() == Some(SUPER_ADMIN_ROLE)
    }

    /// Whether this admin may open the given module.
    pub fn permits(&self, module: &str) -> bool {
        self.is_super_admin() || self.modules().contains(&module)
    }

    /// Human-readable label for logs and terminal output.
    pub fn label(&self) -> String {
        if let Some(name) = self.name().or_else(|| self.email()) {
            return name.to_string();
        }
        match self.id() {
            Some(Value::String(id)) => id.clone(),
            Some(id) => id.to_string(),
            None => "admin".to_string(),
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }
}
