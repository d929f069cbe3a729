// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{ApplicationStatus, RecordSet, ScholarApplication, ScopeLevel};
use crate::pipeline::{ScreenSpec, scope_filter, sort_rows};
use crate::record::{ApplicationField, Record};

const RECENT_LIMIT: usize = 5;
const UNASSIGNED_DEPARTMENT: &str = "(unassigned)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusTally {
    pub total: usize,
    pub pending: usize,
    pub forwarded: usize,
    pub approved: usize,
    pub rejected: usize,
    pub other: usize,
}

impl StatusTally {
    fn add(&mut self, status: Option<&str>) {
        self.total += 1;
        match status.and_then(ApplicationStatus::parse) {
            Some(ApplicationStatus::Pending) => self.pending += 1,
            Some(ApplicationStatus::Forwarded) => self.forwarded += 1,
            Some(ApplicationStatus::Approved) => self.approved += 1,
            Some(ApplicationStatus::Rejected) => self.rejected += 1,
            None => self.other += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentTally {
    pub department: String,
    pub tally: StatusTally,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub scope_level: ScopeLevel,
    pub scope: String,
    pub overall: StatusTally,
    pub departments: Vec<DepartmentTally>,
    pub recent: Vec<ScholarApplication>,
}

/// Tallies over the scope-filtered applications. `None` while loading.
pub fn summarize(
    spec: &ScreenSpec<ApplicationField>,
    records: &RecordSet<ScholarApplication>,
    scope: &str,
) -> Option<DashboardSummary> {
    let records = records.as_ready()?;
    let mut scoped = scope_filter(records, &spec.ownership, scope);

    let mut overall = StatusTally::default();
    let mut departments: Vec<DepartmentTally> = Vec::new();
    for record in &scoped {
        let status = record.status.as_deref();
        overall.add(status);

        let department = match record.text(ApplicationField::Department) {
            value if value.is_empty() => UNASSIGNED_DEPARTMENT.to_owned(),
            value => value,
        };
        match departments
            .iter_mut()
            .find(|entry| entry.department == department)
        {
            Some(entry) => entry.tally.add(status),
            None => {
                let mut tally = StatusTally::default();
                tally.add(status);
                departments.push(DepartmentTally { department, tally });
            }
        }
    }

    sort_rows(&mut scoped, spec.default_sort);
    let recent = scoped
        .into_iter()
        .take(RECENT_LIMIT)
        .cloned()
        .collect();

    Some(DashboardSummary {
        scope_level: spec.scope_level,
        scope: scope.to_owned(),
        overall,
        departments,
        recent,
    })
}
