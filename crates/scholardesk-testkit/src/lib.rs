// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use scholardesk_app::validation::format_date;
use scholardesk_app::{
    ApplicationId, ApplicationStatus, ExaminationId, ExaminationRecord, Role, ScholarApplication,
};
use serde::{Serialize, Serializer};
use std::path::PathBuf;
use time::{Date, Duration, Month, OffsetDateTime, Time};

const FACULTIES: &[(&str, &[&str])] = &[
    ("Engineering", &["CSE", "ECE", "MECH", "CIVIL"]),
    ("Science", &["Physics", "Chemistry", "Mathematics"]),
    ("Arts", &["English", "History", "Economics"]),
];

const FIRST_NAMES: [&str; 20] = [
    "Asha", "Ben", "Chitra", "Deepak", "Esther", "Farhan", "Gayathri", "Harish", "Ishita",
    "Joel", "Kavya", "Lokesh", "Meera", "Naveen", "Oviya", "Pranav", "Revathi", "Suresh",
    "Tanvi", "Vikram",
];
const LAST_NAMES: [&str; 14] = [
    "Iyer", "Thomas", "Raman", "Khan", "Menon", "Das", "Pillai", "Joseph", "Reddy", "Nair",
    "Subramanian", "Fernandes", "Kumar", "Varghese",
];

const SCHEMES: [&str; 5] = [
    "Merit Scholarship",
    "Post-Matric",
    "Research Fellowship",
    "Sports Quota",
    "Need-Based Grant",
];

const EXAM_NAMES: [&str; 5] = [
    "Semester End",
    "Internal Assessment I",
    "Internal Assessment II",
    "Qualifying Exam",
    "Comprehensive Viva",
];

// Weighted toward the early workflow states.
const STATUS_WEIGHTS: [(ApplicationStatus, usize); 4] = [
    (ApplicationStatus::Pending, 5),
    (ApplicationStatus::Forwarded, 3),
    (ApplicationStatus::Approved, 2),
    (ApplicationStatus::Rejected, 1),
];

const OFF_WORKFLOW_STATUS: &str = "On Hold";
const DEMO_APPLICATIONS: usize = 48;
const DEMO_EXAMINATIONS: usize = 36;
const REFERENCE_YEAR: i32 = 2026;
pub const DEMO_EMAIL_DOMAIN: &str = "demo.scholardesk.test";
pub const UNASSIGNED_HOD_EMAIL: &str = "hod.unassigned@demo.scholardesk.test";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoActor {
    pub email: String,
    pub display_name: String,
    pub phone: String,
    pub role: Role,
    pub faculty: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoApplication {
    pub application_no: String,
    pub scholar_name: String,
    pub department: Option<String>,
    pub legacy_department: Option<String>,
    pub faculty: Option<String>,
    pub legacy_faculty: Option<String>,
    pub status: String,
    pub scheme: String,
    pub semester: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoExamination {
    pub register_no: String,
    pub scholar_name: String,
    pub department: Option<String>,
    pub legacy_department: Option<String>,
    pub exam_name: String,
    pub result: String,
    pub score: f64,
    #[serde(serialize_with = "serialize_date")]
    pub exam_date: Date,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoDataset {
    pub actors: Vec<DemoActor>,
    pub applications: Vec<DemoApplication>,
    pub examinations: Vec<DemoExamination>,
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for scholars, staff accounts, and exam results.
#[derive(Debug, Clone)]
pub struct ScholarFaker {
    rng: DeterministicRng,
    serial: usize,
}

impl ScholarFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            serial: 0,
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn scholar_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    pub fn phone(&mut self) -> String {
        format!(
            "+91 {} {}",
            self.int_range_i64(90_000, 99_999),
            self.int_range_i64(10_000, 99_999)
        )
    }

    pub fn hod(&mut self, faculty: &str, department: &str) -> DemoActor {
        DemoActor {
            email: format!("hod.{}@{DEMO_EMAIL_DOMAIN}", slug(department)),
            display_name: format!("Dr. {}", self.scholar_name()),
            phone: self.phone(),
            role: Role::Hod,
            faculty: Some(faculty.to_owned()),
            department: Some(department.to_owned()),
        }
    }

    pub fn faculty_admin(&mut self, faculty: &str) -> DemoActor {
        DemoActor {
            email: format!("admin.{}@{DEMO_EMAIL_DOMAIN}", slug(faculty)),
            display_name: format!("Prof. {}", self.scholar_name()),
            phone: self.phone(),
            role: Role::FacultyAdmin,
            faculty: Some(faculty.to_owned()),
            department: None,
        }
    }

    pub fn application(&mut self, faculty: &str, department: &str) -> DemoApplication {
        self.serial += 1;
        let mut application = DemoApplication {
            application_no: format!("SCH-{REFERENCE_YEAR}-{:04}", self.serial),
            scholar_name: self.scholar_name(),
            department: Some(department.to_owned()),
            legacy_department: None,
            faculty: Some(faculty.to_owned()),
            legacy_faculty: None,
            status: self.status(),
            scheme: self.pick(&SCHEMES).to_owned(),
            semester: self.int_range_i64(1, 10),
            submitted_at: self.datetime_in_year(REFERENCE_YEAR),
        };

        // Older records only carry the legacy ownership columns.
        if self.rng.int_n(7) == 0 {
            application.legacy_department = application.department.take();
        }
        if self.rng.int_n(9) == 0 {
            application.legacy_faculty = application.faculty.take();
        }
        application
    }

    pub fn examination(&mut self, department: &str) -> DemoExamination {
        self.serial += 1;
        let score = self.int_range_i64(180, 1000) as f64 / 10.0;
        let result = if score < 40.0 {
            "Fail"
        } else if self.rng.int_n(10) == 0 {
            "Withheld"
        } else {
            "Pass"
        };
        let mut examination = DemoExamination {
            register_no: format!("REG{}{:05}", &slug(department)[..2], self.serial),
            scholar_name: self.scholar_name(),
            department: Some(department.to_owned()),
            legacy_department: None,
            exam_name: self.pick(&EXAM_NAMES).to_owned(),
            result: result.to_owned(),
            score,
            exam_date: self.datetime_in_year(REFERENCE_YEAR).date(),
        };
        if self.rng.int_n(8) == 0 {
            examination.legacy_department = examination.department.take();
        }
        examination
    }

    /// Staff for every faculty and department, one HOD without a department,
    /// and records spread across all of them.
    pub fn demo_dataset(&mut self) -> DemoDataset {
        let mut actors = Vec::new();
        for (faculty, departments) in FACULTIES {
            actors.push(self.faculty_admin(faculty));
            for department in *departments {
                actors.push(self.hod(faculty, department));
            }
        }
        actors.push(DemoActor {
            email: UNASSIGNED_HOD_EMAIL.to_owned(),
            display_name: format!("Dr. {}", self.scholar_name()),
            phone: String::new(),
            role: Role::Hod,
            faculty: None,
            department: None,
        });

        let applications = (0..DEMO_APPLICATIONS)
            .map(|_| {
                let (faculty, department) = self.placement();
                self.application(faculty, department)
            })
            .collect();
        let examinations = (0..DEMO_EXAMINATIONS)
            .map(|_| {
                let (_, department) = self.placement();
                self.examination(department)
            })
            .collect();

        DemoDataset {
            actors,
            applications,
            examinations,
        }
    }

    fn placement(&mut self) -> (&'static str, &'static str) {
        let (faculty, departments) = FACULTIES[self.rng.int_n(FACULTIES.len())];
        (faculty, departments[self.rng.int_n(departments.len())])
    }

    fn status(&mut self) -> String {
        if self.rng.int_n(20) == 0 {
            return OFF_WORKFLOW_STATUS.to_owned();
        }
        let total: usize = STATUS_WEIGHTS.iter().map(|(_, weight)| weight).sum();
        let mut roll = self.rng.int_n(total);
        for (status, weight) in STATUS_WEIGHTS {
            if roll < weight {
                return status.as_str().to_owned();
            }
            roll -= weight;
        }
        ApplicationStatus::Pending.as_str().to_owned()
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range_i64(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    fn datetime_in_year(&mut self, year: i32) -> OffsetDateTime {
        let start = midnight_utc(year, 1);
        let seconds = self.int_range_i64(0, 364 * 24 * 60 * 60);
        start + Duration::seconds(seconds)
    }
}

pub fn demo_dataset(seed: u64) -> DemoDataset {
    ScholarFaker::new(seed).demo_dataset()
}

pub fn faculties() -> &'static [(&'static str, &'static [&'static str])] {
    FACULTIES
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("scholardesk.db");
    Ok((dir, db_path))
}

pub fn fixture_datetime() -> &'static str {
    "2026-02-19T12:34:56Z"
}

/// Application snapshot with the common fields filled in.
pub fn application_fixture(
    id: i64,
    scholar_name: &str,
    department: &str,
    faculty: &str,
    status: &str,
) -> ScholarApplication {
    ScholarApplication {
        id: ApplicationId::new(id),
        application_no: Some(format!("APP-{id:03}")),
        scholar_name: Some(scholar_name.to_owned()),
        department: Some(department.to_owned()),
        legacy_department: None,
        faculty: Some(faculty.to_owned()),
        legacy_faculty: None,
        status: Some(status.to_owned()),
        scheme: Some(SCHEMES[0].to_owned()),
        semester: Some(1),
        remarks: None,
        submitted_at: Some(midnight_utc(REFERENCE_YEAR, id.rem_euclid(300) as u16 + 1)),
        updated_at: None,
    }
}

pub fn examination_fixture(
    id: i64,
    scholar_name: &str,
    department: &str,
    exam_name: &str,
    result: &str,
) -> ExaminationRecord {
    ExaminationRecord {
        id: ExaminationId::new(id),
        register_no: Some(format!("REG{id:05}")),
        scholar_name: Some(scholar_name.to_owned()),
        department: Some(department.to_owned()),
        legacy_department: None,
        exam_name: Some(exam_name.to_owned()),
        result: Some(result.to_owned()),
        score: Some(50.0),
        exam_date: Some(midnight_utc(REFERENCE_YEAR, 32).date()),
    }
}

fn serialize_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_date(Some(*date)))
}

fn slug(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase()
}

fn midnight_utc(year: i32, ordinal: u16) -> OffsetDateTime {
    let date = Date::from_ordinal_date(year, ordinal)
        .or_else(|_| Date::from_calendar_date(year, Month::January, 1))
        .unwrap_or(Date::MIN);
    date.with_time(Time::MIDNIGHT).assume_utc()
}
