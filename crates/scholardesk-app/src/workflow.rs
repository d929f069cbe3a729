// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::model::{ApplicationStatus, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Forward,
    Approve,
    Reject,
}

impl Decision {
    const HOD_DECISIONS: [Self; 2] = [Self::Forward, Self::Reject];
    const FACULTY_DECISIONS: [Self; 2] = [Self::Approve, Self::Reject];

    pub const fn for_role(role: Role) -> &'static [Self] {
        match role {
            Role::Hod => &Self::HOD_DECISIONS,
            Role::FacultyAdmin => &Self::FACULTY_DECISIONS,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl ApplicationStatus {
    /// Status an application moves to when `role` takes `decision` on it.
    pub fn next_for(role: Role, from: &str, decision: Decision) -> Result<Self> {
        let Some(current) = Self::parse(from) else {
            bail!(
                "application status {from:?} is not a workflow state -- fix the record before deciding on it"
            );
        };
        let next = match (role, current, decision) {
            (Role::Hod, Self::Pending, Decision::Forward) => Self::Forwarded,
            (Role::Hod, Self::Pending, Decision::Reject) => Self::Rejected,
            (Role::FacultyAdmin, Self::Forwarded, Decision::Approve) => Self::Approved,
            (Role::FacultyAdmin, Self::Forwarded, Decision::Reject) => Self::Rejected,
            (role, current, decision) => bail!(
                "{} cannot {} an application that is {} -- choose an application awaiting {} review",
                role.label(),
                decision.label(),
                current.as_str(),
                role.label()
            ),
        };
        Ok(next)
    }
}
