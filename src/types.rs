use std::fmt;

use serde::{Deserialize, Serialize};

/// Staff role, fixed at registration. Gates endpoint access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Uploader,
    Reviewer,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Uploader => "Uploader",
            Role::Reviewer => "Reviewer",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "Uploader" => Some(Role::Uploader),
            "Reviewer" => Some(Role::Reviewer),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anatomical region tag on a scan record. Inputs are validated against this
/// closed set; stored values round-trip as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Frontal")]
    Frontal,
    #[serde(rename = "Upper Arch")]
    UpperArch,
    #[serde(rename = "Lower Arch")]
    LowerArch,
}

impl Region {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Region::Frontal => "Frontal",
            Region::UpperArch => "Upper Arch",
            Region::LowerArch => "Lower Arch",
        }
    }

    pub fn parse(s: &str) -> Option<Region> {
        match s {
            "Frontal" => Some(Region::Frontal),
            "Upper Arch" => Some(Region::UpperArch),
            "Lower Arch" => Some(Region::LowerArch),
            _ => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full account row. Never serialized; the password hash stays internal.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: String,
}

impl Account {
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at.clone(),
        }
    }
}

/// Client-facing account shape, used by register/login/profile responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub created_at: String,
}

/// A patient-scan metadata record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: i64,
    pub patient_name: String,
    pub patient_id: String,
    pub scan_type: String,
    pub region: String,
    pub image_url: String,
    pub upload_date: String,
    pub uploaded_by: i64,
    /// Owning account's email, present on reviewer-facing reads only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_by_email: Option<String>,
}

// Request DTOs. String fields default to empty so missing-field handling
// stays in the validation layer with its fixed per-endpoint messages.

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

/// Body for create and full-replace update of a scan record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanPayload {
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub patient_id: String,
    #[serde(default = "default_scan_type")]
    pub scan_type: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub image_url: String,
}

fn default_scan_type() -> String {
    "RGB".to_string()
}

/// Success envelope: `{ message, data?, pagination? }`.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageMeta>,
}

impl<T> Envelope<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self { message: message.into(), data: Some(data), pagination: None }
    }

    pub fn paginated(message: impl Into<String>, data: T, pagination: PageMeta) -> Self {
        Self { message: message.into(), data: Some(data), pagination: Some(pagination) }
    }
}

impl Envelope<serde_json::Value> {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self { message: message.into(), data: None, pagination: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_records: i64,
    pub per_page: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionCount {
    pub region: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_scans: i64,
    pub total_patients: i64,
    pub scans_by_region: Vec<RegionCount>,
    pub today_uploads: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSummary {
    pub patient_id: String,
    pub patient_name: String,
}
