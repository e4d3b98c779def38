//! The closed set of portal screens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::error::{MedinestError, Result};
use crate::session::UserType;

/// A screen the navigation controller can point at.
///
/// Identifiers are kebab-case (`patient-dashboard`, `ai-assistant`, ...).
/// Parsing any other string fails with [`MedinestError::UnknownView`].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum View {
    #[default]
    Home,
    PatientAuth,
    DoctorAuth,
    PatientDashboard,
    DoctorDashboard,
    Setup,
    Problems,
    Nutrition,
    Appointments,
    AiAssistant,
    MedicineReminders,
    MedicineExpiration,
    Fitness,
    Privacy,
    Blockchain,
    PatientRecords,
    Prescriptions,
    Analytics,
}

/// How a view relates to authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Landing and sign-in screens; a signed-in user is moved off them.
    Entry,
    /// Visible to everyone.
    Public,
    /// Never visible without a signed-in user.
    Protected,
}

impl View {
    /// The kebab-case identifier.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    pub fn access(&self) -> Access {
        match self {
            View::Home | View::PatientAuth | View::DoctorAuth => Access::Entry,
            View::Setup | View::Privacy => Access::Public,
            View::PatientDashboard
            | View::DoctorDashboard
            | View::Problems
            | View::Nutrition
            | View::Appointments
            | View::AiAssistant
            | View::MedicineReminders
            | View::MedicineExpiration
            | View::Fitness
            | View::Blockchain
            | View::PatientRecords
            | View::Prescriptions
            | View::Analytics => Access::Protected,
        }
    }

    pub fn is_entry(&self) -> bool {
        self.access() == Access::Entry
    }

    pub fn is_protected(&self) -> bool {
        self.access() == Access::Protected
    }

    pub fn is_dashboard(&self) -> bool {
        matches!(self, View::PatientDashboard | View::DoctorDashboard)
    }

    /// Feature screens leave through back-navigation rather than a menu.
    pub fn is_feature(&self) -> bool {
        !self.is_entry() && !self.is_dashboard() && *self != View::Setup
    }

    /// The landing dashboard for an account type.
    pub fn dashboard_for(user_type: UserType) -> View {
        match user_type {
            UserType::Patient => View::PatientDashboard,
            UserType::Doctor => View::DoctorDashboard,
        }
    }

    /// Human-readable screen title.
    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::PatientAuth => "Patient Sign In",
            View::DoctorAuth => "Doctor Sign In",
            View::PatientDashboard => "Patient Dashboard",
            View::DoctorDashboard => "Doctor Dashboard",
            View::Setup => "Account Setup",
            View::Problems => "Problem Reporting",
            View::Nutrition => "Nutrition Tracker",
            View::Appointments => "Appointment Scheduler",
            View::AiAssistant => "AI Assistant",
            View::MedicineReminders => "Medicine Reminders",
            View::MedicineExpiration => "Medicine Expiration",
            View::Fitness => "Fitness Tracker",
            View::Privacy => "Privacy Policy",
            View::Blockchain => "Blockchain Identity",
            View::PatientRecords => "Patient Records",
            View::Prescriptions => "Prescriptions",
            View::Analytics => "Analytics",
        }
    }

    /// All views in declaration order.
    pub fn all() -> impl Iterator<Item = View> {
        View::iter()
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = MedinestError;

    fn from_str(value: &str) -> Result<Self> {
        View::iter()
            .find(|view| view.as_str() == value)
            .ok_or_else(|| MedinestError::UnknownView(value.to_string()))
    }
}
