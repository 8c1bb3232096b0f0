// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Language used for display labels and export headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English labels.
    #[default]
    English,
    /// Arabic labels.
    Arabic,
}

impl Locale {
    /// Returns the short language tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Arabic => "ar",
        }
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "en" | "english" => Ok(Self::English),
            "ar" | "arabic" => Ok(Self::Arabic),
            _ => Err(DomainError::InvalidLocale(s.to_string())),
        }
    }
}

/// Professional category of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeCategory {
    /// Physician.
    Doctor,
    /// Pharmacist.
    Pharmacist,
    /// Dentist.
    Dentist,
    /// Physiotherapist.
    Physiotherapist,
    /// Administrative staff.
    Administrative,
    /// Anything else.
    Other,
}

impl EmployeeCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Doctor,
        Self::Pharmacist,
        Self::Dentist,
        Self::Physiotherapist,
        Self::Administrative,
        Self::Other,
    ];

    /// The categories shown on the dashboard chart.
    ///
    /// `Other` is deliberately absent.
    pub const CHARTED: [Self; 5] = [
        Self::Doctor,
        Self::Pharmacist,
        Self::Dentist,
        Self::Physiotherapist,
        Self::Administrative,
    ];

    /// Returns the stable identifier used in storage and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Doctor => "doctor",
            Self::Pharmacist => "pharmacist",
            Self::Dentist => "dentist",
            Self::Physiotherapist => "physiotherapist",
            Self::Administrative => "administrative",
            Self::Other => "other",
        }
    }

    /// Returns the display label for the given locale.
    #[must_use]
    pub const fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Doctor, Locale::English) => "Doctor",
            (Self::Pharmacist, Locale::English) => "Pharmacist",
            (Self::Dentist, Locale::English) => "Dentist",
            (Self::Physiotherapist, Locale::English) => "Physiotherapist",
            (Self::Administrative, Locale::English) => "Administrative",
            (Self::Other, Locale::English) => "Other",
            (Self::Doctor, Locale::Arabic) => "طبيب",
            (Self::Pharmacist, Locale::Arabic) => "صيدلي",
            (Self::Dentist, Locale::Arabic) => "أسنان",
            (Self::Physiotherapist, Locale::Arabic) => "علاج طبيعي",
            (Self::Administrative, Locale::Arabic) => "إداري",
            (Self::Other, Locale::Arabic) => "أخرى",
        }
    }
}

impl FromStr for EmployeeCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doctor" => Ok(Self::Doctor),
            "pharmacist" => Ok(Self::Pharmacist),
            "dentist" => Ok(Self::Dentist),
            "physiotherapist" => Ok(Self::Physiotherapist),
            "administrative" => Ok(Self::Administrative),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for EmployeeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Civil-service grade of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeGrade {
    /// Excellent grade.
    Excellent,
    /// Senior grade.
    Senior,
    /// First grade.
    First,
    /// Second grade.
    Second,
    /// Third grade.
    Third,
}

impl EmployeeGrade {
    /// Returns the stable identifier used in storage and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Senior => "senior",
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
        }
    }

    /// Returns the display label for the given locale.
    #[must_use]
    pub const fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Excellent, Locale::English) => "Excellent",
            (Self::Senior, Locale::English) => "Senior",
            (Self::First, Locale::English) => "First",
            (Self::Second, Locale::English) => "Second",
            (Self::Third, Locale::English) => "Third",
            (Self::Excellent, Locale::Arabic) => "ممتازة",
            (Self::Senior, Locale::Arabic) => "كبير",
            (Self::First, Locale::Arabic) => "الأولى",
            (Self::Second, Locale::Arabic) => "الثانية",
            (Self::Third, Locale::Arabic) => "الثالثة",
        }
    }
}

impl FromStr for EmployeeGrade {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "excellent" => Ok(Self::Excellent),
            "senior" => Ok(Self::Senior),
            "first" => Ok(Self::First),
            "second" => Ok(Self::Second),
            "third" => Ok(Self::Third),
            _ => Err(DomainError::InvalidGrade(s.to_string())),
        }
    }
}

impl std::fmt::Display for EmployeeGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an employee is attached to the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    /// Permanent appointment.
    Permanent,
    /// Delegated from another organization.
    Delegated,
    /// On mission.
    Mission,
    /// Temporary assignment.
    Assignment,
    /// Anything else.
    Other,
}

impl AppointmentType {
    /// Returns the stable identifier used in storage and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Permanent => "permanent",
            Self::Delegated => "delegated",
            Self::Mission => "mission",
            Self::Assignment => "assignment",
            Self::Other => "other",
        }
    }

    /// Returns the display label for the given locale.
    #[must_use]
    pub const fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Permanent, Locale::English) => "Permanent",
            (Self::Delegated, Locale::English) => "Delegated",
            (Self::Mission, Locale::English) => "Mission",
            (Self::Assignment, Locale::English) => "Assignment",
            (Self::Other, Locale::English) => "Other",
            (Self::Permanent, Locale::Arabic) => "معين",
            (Self::Delegated, Locale::Arabic) => "منتدب",
            (Self::Mission, Locale::Arabic) => "مأمورية",
            (Self::Assignment, Locale::Arabic) => "تكليف",
            (Self::Other, Locale::Arabic) => "أخرى",
        }
    }
}

impl FromStr for AppointmentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permanent" => Ok(Self::Permanent),
            "delegated" => Ok(Self::Delegated),
            "mission" => Ok(Self::Mission),
            "assignment" => Ok(Self::Assignment),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidAppointment(s.to_string())),
        }
    }
}

impl std::fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque employee identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Creates a new employee identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque evaluation identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationId(String);

impl EvaluationId {
    /// Creates a new evaluation identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The editable part of an employee record.
///
/// Used for both the add and the edit action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeProfile {
    /// Full name.
    pub name: String,
    /// National identifier. Empty when not recorded.
    pub national_id: String,
    /// Professional category.
    pub category: EmployeeCategory,
    /// Civil-service grade.
    pub grade: EmployeeGrade,
    /// Appointment type.
    pub appointment: AppointmentType,
    /// Date the employee joined.
    pub join_date: Date,
    /// Labels of files assigned to the employee, in entry order.
    pub assigned_files: Vec<String>,
}

/// An employee record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Store-assigned identifier.
    pub id: EmployeeId,
    /// Full name.
    pub name: String,
    /// National identifier. Empty when not recorded.
    pub national_id: String,
    /// Professional category.
    pub category: EmployeeCategory,
    /// Civil-service grade.
    pub grade: EmployeeGrade,
    /// Appointment type.
    pub appointment: AppointmentType,
    /// Date the employee joined.
    pub join_date: Date,
    /// Labels of files assigned to the employee, in entry order.
    pub assigned_files: Vec<String>,
    /// False once the employee has been removed.
    pub is_active: bool,
    /// When the record was created.
    pub created_at: OffsetDateTime,
    /// When the record was last changed.
    pub updated_at: OffsetDateTime,
}

impl Employee {
    /// Builds an active employee from a profile.
    #[must_use]
    pub fn from_profile(id: EmployeeId, profile: EmployeeProfile, now: OffsetDateTime) -> Self {
        Self {
            id,
            name: profile.name,
            national_id: profile.national_id,
            category: profile.category,
            grade: profile.grade,
            appointment: profile.appointment,
            join_date: profile.join_date,
            assigned_files: profile.assigned_files,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the editable part of this record.
    #[must_use]
    pub fn profile(&self) -> EmployeeProfile {
        EmployeeProfile {
            name: self.name.clone(),
            national_id: self.national_id.clone(),
            category: self.category,
            grade: self.grade,
            appointment: self.appointment,
            join_date: self.join_date,
            assigned_files: self.assigned_files.clone(),
        }
    }

    /// Returns the national identifier, or `None` when it was never recorded.
    #[must_use]
    pub fn national_id(&self) -> Option<&str> {
        if self.national_id.is_empty() {
            None
        } else {
            Some(&self.national_id)
        }
    }
}
