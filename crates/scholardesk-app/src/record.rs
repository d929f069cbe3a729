// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt::Debug;

use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use crate::model::{ExaminationRecord, ScholarApplication};

/// A single field value borrowed from a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
    Decimal(f64),
    Timestamp(OffsetDateTime),
    Date(Date),
}

impl FieldValue<'_> {
    /// String form used by search, filtering, and sorting. Numbers are not
    /// padded, so they order lexically ("10" sorts before "9").
    pub fn stringify(&self) -> String {
        match self {
            Self::Text(value) => (*value).to_owned(),
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) => value.to_string(),
            Self::Timestamp(value) => value.format(&Rfc3339).unwrap_or_else(|_| value.to_string()),
            Self::Date(value) => value.to_string(),
        }
    }
}

pub trait RecordField: Copy + Eq + Debug + 'static {
    fn label(self) -> &'static str;
}

/// Read-only field access over a typed record snapshot.
pub trait Record {
    type Field: RecordField;

    fn key(&self) -> i64;

    fn value(&self, field: Self::Field) -> Option<FieldValue<'_>>;

    /// Stringified value, with missing fields reading as "".
    fn text(&self, field: Self::Field) -> String {
        self.value(field)
            .map(|value| value.stringify())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationField {
    ApplicationNo,
    ScholarName,
    Department,
    LegacyDepartment,
    Faculty,
    LegacyFaculty,
    Status,
    Scheme,
    Semester,
    SubmittedAt,
    UpdatedAt,
}

impl RecordField for ApplicationField {
    fn label(self) -> &'static str {
        match self {
            Self::ApplicationNo => "App No",
            Self::ScholarName => "Scholar",
            Self::Department => "Department",
            Self::LegacyDepartment => "Dept (legacy)",
            Self::Faculty => "Faculty",
            Self::LegacyFaculty => "Faculty (legacy)",
            Self::Status => "Status",
            Self::Scheme => "Scheme",
            Self::Semester => "Sem",
            Self::SubmittedAt => "Submitted",
            Self::UpdatedAt => "Updated",
        }
    }
}

fn text(value: &Option<String>) -> Option<FieldValue<'_>> {
    value.as_deref().map(FieldValue::Text)
}

impl Record for ScholarApplication {
    type Field = ApplicationField;

    fn key(&self) -> i64 {
        self.id.get()
    }

    fn value(&self, field: ApplicationField) -> Option<FieldValue<'_>> {
        match field {
            ApplicationField::ApplicationNo => text(&self.application_no),
            ApplicationField::ScholarName => text(&self.scholar_name),
            ApplicationField::Department => text(&self.department),
            ApplicationField::LegacyDepartment => text(&self.legacy_department),
            ApplicationField::Faculty => text(&self.faculty),
            ApplicationField::LegacyFaculty => text(&self.legacy_faculty),
            ApplicationField::Status => text(&self.status),
            ApplicationField::Scheme => text(&self.scheme),
            ApplicationField::Semester => self.semester.map(FieldValue::Integer),
            ApplicationField::SubmittedAt => self.submitted_at.map(FieldValue::Timestamp),
            ApplicationField::UpdatedAt => self.updated_at.map(FieldValue::Timestamp),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExaminationField {
    RegisterNo,
    ScholarName,
    Department,
    LegacyDepartment,
    ExamName,
    Result,
    Score,
    ExamDate,
}

impl RecordField for ExaminationField {
    fn label(self) -> &'static str {
        match self {
            Self::RegisterNo => "Register No",
            Self::ScholarName => "Scholar",
            Self::Department => "Department",
            Self::LegacyDepartment => "Dept (legacy)",
            Self::ExamName => "Exam",
            Self::Result => "Result",
            Self::Score => "Score",
            Self::ExamDate => "Date",
        }
    }
}

impl Record for ExaminationRecord {
    type Field = ExaminationField;

    fn key(&self) -> i64 {
        self.id.get()
    }

    fn value(&self, field: ExaminationField) -> Option<FieldValue<'_>> {
        match field {
            ExaminationField::RegisterNo => text(&self.register_no),
            ExaminationField::ScholarName => text(&self.scholar_name),
            ExaminationField::Department => text(&self.department),
            ExaminationField::LegacyDepartment => text(&self.legacy_department),
            ExaminationField::ExamName => text(&self.exam_name),
            ExaminationField::Result => text(&self.result),
            ExaminationField::Score => self.score.map(FieldValue::Decimal),
            ExaminationField::ExamDate => self.exam_date.map(FieldValue::Date),
        }
    }
}
