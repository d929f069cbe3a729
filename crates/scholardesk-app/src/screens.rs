// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{ScopeLevel, SortDirection};
use crate::pipeline::{FilterDimension, Ownership, ScreenSpec, SortSpec};
use crate::record::{ApplicationField, ExaminationField};

const APPLICATION_SEARCH: [ApplicationField; 3] = [
    ApplicationField::ScholarName,
    ApplicationField::ApplicationNo,
    ApplicationField::Department,
];

const APPLICATION_FILTERS: [FilterDimension<ApplicationField>; 2] = [
    FilterDimension {
        name: "department",
        field: ApplicationField::Department,
        all_label: "All Departments",
    },
    FilterDimension {
        name: "status",
        field: ApplicationField::Status,
        all_label: "All Statuses",
    },
];

const APPLICATION_SORT: SortSpec<ApplicationField> = SortSpec {
    field: ApplicationField::SubmittedAt,
    direction: SortDirection::Desc,
};

pub const DEPARTMENT_APPLICATIONS: ScreenSpec<ApplicationField> = ScreenSpec {
    title: "Department applications",
    scope_level: ScopeLevel::Department,
    ownership: Ownership {
        primary: ApplicationField::Department,
        fallback: Some(ApplicationField::LegacyDepartment),
    },
    search_fields: &APPLICATION_SEARCH,
    filters: &APPLICATION_FILTERS,
    columns: &[
        ApplicationField::ApplicationNo,
        ApplicationField::ScholarName,
        ApplicationField::Scheme,
        ApplicationField::Semester,
        ApplicationField::Status,
        ApplicationField::SubmittedAt,
    ],
    default_sort: APPLICATION_SORT,
};

pub const FACULTY_APPLICATIONS: ScreenSpec<ApplicationField> = ScreenSpec {
    title: "Faculty workflow",
    scope_level: ScopeLevel::Faculty,
    ownership: Ownership {
        primary: ApplicationField::Faculty,
        fallback: Some(ApplicationField::LegacyFaculty),
    },
    search_fields: &APPLICATION_SEARCH,
    filters: &APPLICATION_FILTERS,
    columns: &[
        ApplicationField::ApplicationNo,
        ApplicationField::ScholarName,
        ApplicationField::Department,
        ApplicationField::Scheme,
        ApplicationField::Status,
        ApplicationField::SubmittedAt,
    ],
    default_sort: APPLICATION_SORT,
};

pub const EXAMINATIONS: ScreenSpec<ExaminationField> = ScreenSpec {
    title: "Examinations",
    scope_level: ScopeLevel::Department,
    ownership: Ownership {
        primary: ExaminationField::Department,
        fallback: Some(ExaminationField::LegacyDepartment),
    },
    search_fields: &[
        ExaminationField::ScholarName,
        ExaminationField::RegisterNo,
        ExaminationField::Department,
    ],
    filters: &[
        FilterDimension {
            name: "exam",
            field: ExaminationField::ExamName,
            all_label: "All Exams",
        },
        FilterDimension {
            name: "result",
            field: ExaminationField::Result,
            all_label: "All Results",
        },
    ],
    columns: &[
        ExaminationField::RegisterNo,
        ExaminationField::ScholarName,
        ExaminationField::ExamName,
        ExaminationField::Result,
        ExaminationField::Score,
        ExaminationField::ExamDate,
    ],
    default_sort: SortSpec {
        field: ExaminationField::ScholarName,
        direction: SortDirection::Asc,
    },
};
