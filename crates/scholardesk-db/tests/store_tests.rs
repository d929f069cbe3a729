// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use scholardesk_app::{
    ApplicationStatus, Decision, DecisionFormInput, ProfileFormInput, Role, SessionId,
};
use scholardesk_db::{NewActor, NewApplication, NewExamination, Store, validate_db_path};
use scholardesk_testkit::{ScholarFaker, temp_db_path};
use time::{Date, Month};

fn hod(email: &str, department: Option<&str>) -> NewActor {
    NewActor {
        email: email.to_owned(),
        display_name: "Dr. Meera Iyer".to_owned(),
        phone: "+91 98400 12345".to_owned(),
        role: Role::Hod,
        faculty: Some("Engineering".to_owned()),
        department: department.map(str::to_owned),
    }
}

fn pending(department: &str) -> NewApplication {
    NewApplication {
        application_no: Some("SCH-2026-0001".to_owned()),
        scholar_name: Some("Asha Raman".to_owned()),
        department: Some(department.to_owned()),
        faculty: Some("Engineering".to_owned()),
        status: Some(ApplicationStatus::Pending.as_str().to_owned()),
        semester: Some(3),
        ..NewApplication::default()
    }
}

#[test]
fn validate_db_path_rejects_uri_forms() {
    assert!(validate_db_path("file:test.db").is_err());
    assert!(validate_db_path("https://example.com/db.sqlite").is_err());
    assert!(validate_db_path("db.sqlite?mode=ro").is_err());
    assert!(validate_db_path("/tmp/scholardesk.db").is_ok());
}

#[test]
fn bootstrap_is_idempotent_on_disk() -> Result<()> {
    let (_dir, path) = temp_db_path()?;
    {
        let store = Store::open(&path)?;
        store.bootstrap()?;
        store.create_actor(&hod("hod.cse@example.edu", Some("CSE")))?;
    }

    let store = Store::open(&path)?;
    store.bootstrap()?;
    assert_eq!(store.list_actors()?.len(), 1);
    Ok(())
}

#[test]
fn bootstrap_rejects_schema_missing_required_column() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    store.raw_connection().execute_batch(
        "
            ALTER TABLE scholar_applications RENAME TO scholar_applications_old;
            CREATE TABLE scholar_applications (
              id INTEGER PRIMARY KEY,
              application_no TEXT,
              scholar_name TEXT,
              department TEXT,
              faculty TEXT,
              status TEXT,
              scheme TEXT,
              semester INTEGER,
              remarks TEXT,
              submitted_at TEXT,
              updated_at TEXT
            );
            DROP TABLE scholar_applications_old;
            ",
    )?;

    let err = store
        .bootstrap()
        .expect_err("schema validation should fail");
    let message = err.to_string();
    assert!(message.contains("table `scholar_applications` is missing required columns"));
    assert!(message.contains("legacy_department"));
    assert!(message.contains("legacy_faculty"));
    Ok(())
}

#[test]
fn applications_round_trip_with_missing_fields() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let full = store.create_application(&pending("CSE"))?;
    let sparse = store.create_application(&NewApplication {
        legacy_department: Some("ECE".to_owned()),
        ..NewApplication::default()
    })?;

    let applications = store.list_applications()?;
    assert_eq!(applications.len(), 2);
    assert_eq!(applications[0].id, full);
    assert_eq!(applications[0].semester, Some(3));
    assert_eq!(applications[1].id, sparse);
    assert!(applications[1].department.is_none());
    assert_eq!(applications[1].legacy_department.as_deref(), Some("ECE"));
    assert!(applications[1].status.is_none());
    Ok(())
}

#[test]
fn create_application_rejects_out_of_range_semester() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let error = store
        .create_application(&NewApplication {
            semester: Some(14),
            ..pending("CSE")
        })
        .expect_err("semester 14 should fail");
    assert!(error.to_string().contains("between 1 and 12"));
    Ok(())
}

#[test]
fn update_status_of_missing_application_is_actionable() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let error = store
        .update_application_status(99.into(), "Forwarded", ApplicationStatus::Approved, "")
        .expect_err("missing application should fail");
    assert!(error.to_string().contains("refresh the list"));
    Ok(())
}

#[test]
fn status_write_from_another_connection_blocks_stale_update() -> Result<()> {
    let (_dir, db_path) = temp_db_path()?;
    let first = Store::open(&db_path)?;
    first.bootstrap()?;
    let second = Store::open(&db_path)?;
    let application_id = first.create_application(&pending("CSE"))?;

    second.update_application_status(
        application_id,
        "Pending",
        ApplicationStatus::Rejected,
        "missing transcript",
    )?;
    let error = first
        .update_application_status(application_id, "Pending", ApplicationStatus::Forwarded, "")
        .expect_err("stale status should not be overwritten");
    let message = error.to_string();
    assert!(message.contains("is now \"Rejected\""), "unexpected message: {message}");
    assert!(message.contains("refresh the list"));

    let stored = first.get_application(application_id)?;
    assert_eq!(stored.status.as_deref(), Some("Rejected"));
    assert_eq!(stored.remarks.as_deref(), Some("missing transcript"));
    Ok(())
}

#[test]
fn decisions_follow_the_workflow() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    let application_id = store.create_application(&pending("CSE"))?;

    let forwarded = store.decide_application(
        Role::Hod,
        &DecisionFormInput {
            application_id,
            current_status: "Pending".to_owned(),
            decision: Decision::Forward,
            remarks: "  documents verified ".to_owned(),
        },
    )?;
    assert_eq!(forwarded, ApplicationStatus::Forwarded);

    let stored = store.get_application(application_id)?;
    assert_eq!(stored.status.as_deref(), Some("Forwarded"));
    assert_eq!(stored.remarks.as_deref(), Some("documents verified"));
    assert!(stored.updated_at.is_some());

    // A stale form still sees the stored status.
    let error = store
        .decide_application(
            Role::Hod,
            &DecisionFormInput {
                application_id,
                current_status: "Pending".to_owned(),
                decision: Decision::Reject,
                remarks: String::new(),
            },
        )
        .expect_err("hod cannot reject a forwarded application");
    assert!(error.to_string().contains("Forwarded"));

    let approved = store.decide_application(
        Role::FacultyAdmin,
        &DecisionFormInput {
            application_id,
            current_status: "Forwarded".to_owned(),
            decision: Decision::Approve,
            remarks: String::new(),
        },
    )?;
    assert_eq!(approved, ApplicationStatus::Approved);
    assert!(store.get_application(application_id)?.remarks.is_none());
    Ok(())
}

#[test]
fn examinations_round_trip() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let exam_date = Date::from_calendar_date(2026, Month::March, 9)?;
    store.create_examination(&NewExamination {
        register_no: Some("REGcs00001".to_owned()),
        scholar_name: Some("Ben Thomas".to_owned()),
        department: Some("CSE".to_owned()),
        exam_name: Some("Semester End".to_owned()),
        result: Some("Pass".to_owned()),
        score: Some(71.5),
        exam_date: Some(exam_date),
        ..NewExamination::default()
    })?;

    let exams = store.list_examinations()?;
    assert_eq!(exams.len(), 1);
    assert_eq!(exams[0].score, Some(71.5));
    assert_eq!(exams[0].exam_date, Some(exam_date));

    store
        .create_examination(&NewExamination {
            score: Some(140.0),
            ..NewExamination::default()
        })
        .expect_err("score above 100 should fail");
    Ok(())
}

#[test]
fn actor_lookup_is_case_insensitive_and_unique() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let actor_id = store.create_actor(&hod("HOD.CSE@example.edu", Some("CSE")))?;
    let found = store
        .find_actor_by_email("hod.cse@EXAMPLE.edu")?
        .expect("actor should be found");
    assert_eq!(found.id, actor_id);
    assert_eq!(found.role, Role::Hod);
    assert!(store.find_actor_by_email("nobody@example.edu")?.is_none());

    store
        .create_actor(&hod("hod.cse@example.edu", Some("ECE")))
        .expect_err("duplicate email should fail");
    Ok(())
}

#[test]
fn create_actor_validates_profile_fields() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let error = store
        .create_actor(&hod("not-an-email", Some("CSE")))
        .expect_err("missing @ should fail");
    assert!(error.to_string().contains("enter a full email"));

    let error = store
        .create_actor(&NewActor {
            phone: "call the office".to_owned(),
            ..hod("hod.ece@example.edu", Some("ECE"))
        })
        .expect_err("bad phone should fail");
    assert!(error.to_string().contains("invalid phone number"));
    Ok(())
}

#[test]
fn profile_update_trims_and_persists() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    let actor_id = store.create_actor(&hod("hod.cse@example.edu", Some("CSE")))?;

    store.update_actor_profile(
        actor_id,
        &ProfileFormInput {
            display_name: "  Dr. Meera I. ".to_owned(),
            phone: String::new(),
        },
    )?;
    let actor = store.get_actor(actor_id)?;
    assert_eq!(actor.display_name, "Dr. Meera I.");
    assert_eq!(actor.phone, "");

    store
        .update_actor_profile(
            actor_id,
            &ProfileFormInput {
                display_name: " ".to_owned(),
                phone: String::new(),
            },
        )
        .expect_err("blank name should fail");
    Ok(())
}

#[test]
fn sign_in_and_out_track_sessions() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.create_actor(&hod("hod.cse@example.edu", Some("CSE")))?;

    let error = store
        .sign_in("hod.ece@example.edu")
        .expect_err("unknown email should fail");
    assert!(error.to_string().contains("no account registered"));

    let (actor, session) = store.sign_in("hod.cse@example.edu")?;
    assert_eq!(session.actor_id, actor.id);
    assert!(session.is_active());
    assert_eq!(store.active_session()?.map(|active| active.id), Some(session.id));

    store.sign_out(session.id)?;
    assert!(store.active_session()?.is_none());
    assert!(!store.get_session(session.id)?.is_active());

    store
        .sign_out(session.id)
        .expect_err("second sign-out should fail");
    store
        .sign_out(SessionId::new(404))
        .expect_err("unknown session should fail");
    Ok(())
}

#[test]
fn unassigned_actor_reads_blank_scope() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    let actor_id = store.create_actor(&hod("hod.new@example.edu", None))?;
    let actor = store.get_actor(actor_id)?;
    assert_eq!(actor.scope_value(Role::Hod.scope_level()), "");
    Ok(())
}

#[test]
fn faker_records_load_into_store() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let mut faker = ScholarFaker::new(21);
    for _ in 0..10 {
        let application = faker.application("Science", "Physics");
        store.create_application(&NewApplication {
            application_no: Some(application.application_no),
            scholar_name: Some(application.scholar_name),
            department: application.department,
            legacy_department: application.legacy_department,
            faculty: application.faculty,
            legacy_faculty: application.legacy_faculty,
            status: Some(application.status),
            scheme: Some(application.scheme),
            semester: Some(application.semester),
            submitted_at: Some(application.submitted_at),
        })?;
    }

    let applications = store.list_applications()?;
    assert_eq!(applications.len(), 10);
    assert!(applications.iter().all(|application| {
        application.department.as_deref() == Some("Physics")
            || application.legacy_department.as_deref() == Some("Physics")
    }));
    assert!(applications.iter().all(|application| application.submitted_at.is_some()));
    Ok(())
}
