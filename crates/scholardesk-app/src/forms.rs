// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow, bail};

use crate::validation::parse_phone;
use crate::{ApplicationId, ApplicationStatus, Decision, FormKind, Role};

pub const MAX_DISPLAY_NAME_CHARS: usize = 80;
pub const MAX_REMARKS_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFormInput {
    pub display_name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionFormInput {
    pub application_id: ApplicationId,
    pub current_status: String,
    pub decision: Decision,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPayload {
    Profile(ProfileFormInput),
    Decision(DecisionFormInput),
}

impl FormPayload {
    pub fn kind(&self) -> FormKind {
        match self {
            Self::Profile(_) => FormKind::Profile,
            Self::Decision(_) => FormKind::Decision,
        }
    }

    pub fn validate(&self, role: Role) -> Result<()> {
        match self {
            Self::Profile(profile) => profile.validate(),
            Self::Decision(decision) => decision.validate(role).map(|_| ()),
        }
    }
}

impl ProfileFormInput {
    pub fn validate(&self) -> Result<()> {
        let name = self.display_name.trim();
        if name.is_empty() {
            bail!("display name is required -- enter a name and retry");
        }
        if name.chars().count() > MAX_DISPLAY_NAME_CHARS {
            bail!("display name is longer than {MAX_DISPLAY_NAME_CHARS} characters -- shorten it and retry");
        }
        parse_phone(&self.phone).map_err(|error| {
            anyhow!("{error} -- use digits, spaces, and + - ( ) only")
        })?;
        Ok(())
    }

    /// Trimmed values as they should be stored.
    pub fn normalized(&self) -> Result<Self> {
        self.validate()?;
        Ok(Self {
            display_name: self.display_name.trim().to_owned(),
            phone: parse_phone(&self.phone).map_err(|error| anyhow!("{error}"))?,
        })
    }
}

impl DecisionFormInput {
    /// Validates the decision and returns the status it produces.
    pub fn validate(&self, role: Role) -> Result<ApplicationStatus> {
        if self.application_id.get() <= 0 {
            bail!("application is required -- select an application and retry");
        }
        if self.remarks.trim().chars().count() > MAX_REMARKS_CHARS {
            bail!("remarks are longer than {MAX_REMARKS_CHARS} characters -- shorten them and retry");
        }
        ApplicationStatus::next_for(role, &self.current_status, self.decision)
    }
}

#[cfg(test)]
mod tests {
    use super::{DecisionFormInput, FormPayload, ProfileFormInput};
    use crate::{ApplicationId, ApplicationStatus, Decision, FormKind, Role};

    fn profile(name: &str, phone: &str) -> ProfileFormInput {
        ProfileFormInput {
            display_name: name.to_owned(),
            phone: phone.to_owned(),
        }
    }

    fn decision(status: &str, decision: Decision, remarks: &str) -> DecisionFormInput {
        DecisionFormInput {
            application_id: ApplicationId::new(4),
            current_status: status.to_owned(),
            decision,
            remarks: remarks.to_owned(),
        }
    }

    #[test]
    fn profile_validation_rejects_blank_name() {
        let error = profile("   ", "").validate().expect_err("blank name should fail");
        assert!(error.to_string().contains("display name is required"));
    }

    #[test]
    fn profile_validation_rejects_long_name() {
        let error = profile(&"x".repeat(81), "")
            .validate()
            .expect_err("long name should fail");
        assert!(error.to_string().contains("80 characters"));
        profile(&"x".repeat(80), "").validate().expect("80 chars is fine");
    }

    #[test]
    fn profile_validation_rejects_bad_phone() {
        let error = profile("Dr. Meera", "call me")
            .validate()
            .expect_err("letters in phone should fail");
        assert!(error.to_string().contains("invalid phone number"));
    }

    #[test]
    fn profile_normalization_trims() {
        let normalized = profile("  Dr. Meera ", " +91 98400 12345 ")
            .normalized()
            .expect("valid profile");
        assert_eq!(normalized, profile("Dr. Meera", "+91 98400 12345"));
    }

    #[test]
    fn decision_validation_returns_next_status() {
        let next = decision("Pending", Decision::Forward, "")
            .validate(Role::Hod)
            .expect("hod can forward pending");
        assert_eq!(next, ApplicationStatus::Forwarded);
    }

    #[test]
    fn decision_validation_rejects_long_remarks() {
        let error = decision("Forwarded", Decision::Approve, &"r".repeat(501))
            .validate(Role::FacultyAdmin)
            .expect_err("long remarks should fail");
        assert!(error.to_string().contains("500 characters"));
    }

    #[test]
    fn payload_kind_and_validation_dispatch() {
        let payload = FormPayload::Decision(decision("Approved", Decision::Reject, ""));
        assert_eq!(payload.kind(), FormKind::Decision);
        payload
            .validate(Role::FacultyAdmin)
            .expect_err("approved applications are final");

        let payload = FormPayload::Profile(profile("Asha", ""));
        assert_eq!(payload.kind(), FormKind::Profile);
        payload.validate(Role::Hod).expect("valid profile");
    }
}
