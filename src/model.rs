use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKey {
    FirstName,
    LastName,
    Username,
    Password,
    Phone,
    Email,
}

impl FieldKey {
    pub const COUNT: usize = 6;

    // Record order; also the index into ErrorMap
    pub const ALL: [FieldKey; FieldKey::COUNT] = [
        FieldKey::FirstName,
        FieldKey::LastName,
        FieldKey::Username,
        FieldKey::Password,
        FieldKey::Phone,
        FieldKey::Email,
    ];

    // Order the dialog lays rows out in
    pub const FORM_ORDER: [FieldKey; FieldKey::COUNT] = [
        FieldKey::FirstName,
        FieldKey::LastName,
        FieldKey::Username,
        FieldKey::Email,
        FieldKey::Password,
        FieldKey::Phone,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FieldKey::FirstName => "firstName",
            FieldKey::LastName => "lastName",
            FieldKey::Username => "username",
            FieldKey::Password => "password",
            FieldKey::Phone => "phone",
            FieldKey::Email => "email",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKey::FirstName => "First Name",
            FieldKey::LastName => "Last Name",
            FieldKey::Username => "User Name",
            FieldKey::Password => "Password",
            FieldKey::Phone => "Phone",
            FieldKey::Email => "Email",
        }
    }

    pub fn from_name(name: &str) -> Option<FieldKey> {
        FieldKey::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn is_masked(self) -> bool {
        matches!(self, FieldKey::Password)
    }

    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            FieldKey::Email => Some("Optional"),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            FieldKey::FirstName => 0,
            FieldKey::LastName => 1,
            FieldKey::Username => 2,
            FieldKey::Password => 3,
            FieldKey::Phone => 4,
            FieldKey::Email => 5,
        }
    }
}

/// Client being drafted in the dialog; also the payload of a create request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub phone: String,
    pub email: String,
}

impl ClientRecord {
    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::FirstName => &self.first_name,
            FieldKey::LastName => &self.last_name,
            FieldKey::Username => &self.username,
            FieldKey::Password => &self.password,
            FieldKey::Phone => &self.phone,
            FieldKey::Email => &self.email,
        }
    }

    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        let slot = match key {
            FieldKey::FirstName => &mut self.first_name,
            FieldKey::LastName => &mut self.last_name,
            FieldKey::Username => &mut self.username,
            FieldKey::Password => &mut self.password,
            FieldKey::Phone => &mut self.phone,
            FieldKey::Email => &mut self.email,
        };
        *slot = value.into();
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// One message per field; an empty string means the field is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorMap {
    messages: [String; FieldKey::COUNT],
}

impl ErrorMap {
    pub fn get(&self, key: FieldKey) -> &str {
        &self.messages[key.index()]
    }

    pub fn set(&mut self, key: FieldKey, message: impl Into<String>) {
        self.messages[key.index()] = message.into();
    }

    pub fn has_error(&self, key: FieldKey) -> bool {
        !self.get(key).is_empty()
    }

    pub fn is_clear(&self) -> bool {
        self.messages.iter().all(|m| m.is_empty())
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.is_empty()).count()
    }
}

fn default_title() -> String {
    "Add New Client".into()
}

fn default_details_heading() -> String {
    "Client Details".into()
}

fn default_true() -> bool {
    true
}

fn default_tick_ms() -> u64 {
    200
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_details_heading")]
    pub details_heading: String,
    // Command run once per create request; record JSON arrives on stdin
    #[serde(default)]
    pub create_cmd: Option<String>,
    #[serde(default = "default_true")]
    pub open_on_start: bool,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            details_heading: default_details_heading(),
            create_cmd: None,
            open_on_start: true,
            tick_ms: default_tick_ms(),
        }
    }
}
