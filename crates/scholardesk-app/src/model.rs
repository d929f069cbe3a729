// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Hod,
    FacultyAdmin,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hod => "hod",
            Self::FacultyAdmin => "faculty_admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hod" => Some(Self::Hod),
            "faculty_admin" => Some(Self::FacultyAdmin),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Hod => "HOD",
            Self::FacultyAdmin => "faculty admin",
        }
    }

    pub const fn scope_level(self) -> ScopeLevel {
        match self {
            Self::Hod => ScopeLevel::Department,
            Self::FacultyAdmin => ScopeLevel::Faculty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeLevel {
    Department,
    Faculty,
}

impl ScopeLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Faculty => "faculty",
        }
    }
}

/// Workflow states as the backend stores them. Record status fields stay raw
/// strings; this enum only drives transitions and tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Forwarded,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::Forwarded, Self::Approved, Self::Rejected];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Forwarded => "Forwarded",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(Self::Pending),
            "Forwarded" => Some(Self::Forwarded),
            "Approved" => Some(Self::Approved),
            "Rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Theme {
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::System];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL
            .iter()
            .position(|theme| *theme == self)
            .unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenKind {
    Dashboard,
    DepartmentApplications,
    FacultyApplications,
    Examinations,
    Settings,
}

impl ScreenKind {
    const HOD_SCREENS: [Self; 4] = [
        Self::Dashboard,
        Self::DepartmentApplications,
        Self::Examinations,
        Self::Settings,
    ];

    const FACULTY_SCREENS: [Self; 3] = [
        Self::Dashboard,
        Self::FacultyApplications,
        Self::Settings,
    ];

    pub const fn for_role(role: Role) -> &'static [Self] {
        match role {
            Role::Hod => &Self::HOD_SCREENS,
            Role::FacultyAdmin => &Self::FACULTY_SCREENS,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::DepartmentApplications => "hod portal",
            Self::FacultyApplications => "faculty workflow",
            Self::Examinations => "exams",
            Self::Settings => "settings",
        }
    }

    pub const fn is_table(self) -> bool {
        matches!(
            self,
            Self::DepartmentApplications | Self::FacultyApplications | Self::Examinations
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingKey {
    UiTheme,
    UiShowDashboard,
}

impl SettingKey {
    pub const ALL: [Self; 2] = [Self::UiTheme, Self::UiShowDashboard];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UiTheme => "ui.theme",
            Self::UiShowDashboard => "ui.show_dashboard",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ui.theme" => Some(Self::UiTheme),
            "ui.show_dashboard" => Some(Self::UiShowDashboard),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UiTheme => "theme",
            Self::UiShowDashboard => "dashboard startup",
        }
    }

    pub const fn expected_value_kind(self) -> SettingValueKind {
        match self {
            Self::UiTheme => SettingValueKind::Theme,
            Self::UiShowDashboard => SettingValueKind::Bool,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingValueKind {
    Bool,
    Theme,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingValue {
    Bool(bool),
    Theme(Theme),
}

impl SettingValue {
    pub fn parse_for_key(key: SettingKey, raw: &str) -> Option<Self> {
        match key.expected_value_kind() {
            SettingValueKind::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => Some(Self::Bool(true)),
                "0" | "false" | "off" | "no" => Some(Self::Bool(false)),
                _ => None,
            },
            SettingValueKind::Theme => Theme::parse(raw).map(Self::Theme),
        }
    }

    pub fn to_storage(&self, key: SettingKey) -> Option<String> {
        match (key.expected_value_kind(), self) {
            (SettingValueKind::Bool, Self::Bool(value)) => {
                Some(if *value { "true" } else { "false" }.to_owned())
            }
            (SettingValueKind::Theme, Self::Theme(theme)) => Some(theme.as_str().to_owned()),
            _ => None,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Bool(true) => "on".to_owned(),
            Self::Bool(false) => "off".to_owned(),
            Self::Theme(theme) => theme.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSetting {
    pub key: SettingKey,
    pub value: SettingValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormKind {
    Profile,
    Decision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMode {
    Nav,
    Search,
    Form(FormKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub email: String,
    pub display_name: String,
    pub phone: String,
    pub role: Role,
    pub faculty: Option<String>,
    pub department: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Actor {
    /// Assigned scope value for `level`, or "" when unassigned.
    pub fn scope_value(&self, level: ScopeLevel) -> &str {
        let value = match level {
            ScopeLevel::Department => self.department.as_deref(),
            ScopeLevel::Faculty => self.faculty.as_deref(),
        };
        value.unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub actor_id: ActorId,
    pub started_at: OffsetDateTime,
    pub ended_at: Option<OffsetDateTime>,
}

impl Session {
    pub const fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarApplication {
    pub id: ApplicationId,
    pub application_no: Option<String>,
    pub scholar_name: Option<String>,
    pub department: Option<String>,
    pub legacy_department: Option<String>,
    pub faculty: Option<String>,
    pub legacy_faculty: Option<String>,
    pub status: Option<String>,
    pub scheme: Option<String>,
    pub semester: Option<i64>,
    pub remarks: Option<String>,
    pub submitted_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExaminationRecord {
    pub id: ExaminationId,
    pub register_no: Option<String>,
    pub scholar_name: Option<String>,
    pub department: Option<String>,
    pub legacy_department: Option<String>,
    pub exam_name: Option<String>,
    pub result: Option<String>,
    pub score: Option<f64>,
    pub exam_date: Option<Date>,
}

/// Records as supplied by the fetch layer: absent until the fetch completes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecordSet<R> {
    #[default]
    Loading,
    Ready(Vec<R>),
}

impl<R> RecordSet<R> {
    pub fn as_ready(&self) -> Option<&[R]> {
        match self {
            Self::Loading => None,
            Self::Ready(records) => Some(records),
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}
