// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use rusqlite::{Connection, OptionalExtension, Row, params};
use scholardesk_app::validation::{check_score, check_semester, format_date, parse_required_date};
use scholardesk_app::{
    Actor, ActorId, AppSetting, ApplicationId, ApplicationStatus, DecisionFormInput,
    ExaminationId, ExaminationRecord, ProfileFormInput, Role, ScholarApplication, Session,
    SessionId, SettingKey, SettingValue, Theme,
};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, info};

pub const APP_NAME: &str = "scholardesk";

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "actors",
        &[
            "id",
            "email",
            "display_name",
            "phone",
            "role",
            "faculty",
            "department",
            "created_at",
            "updated_at",
        ],
    ),
    ("sessions", &["id", "actor_id", "started_at", "ended_at"]),
    (
        "scholar_applications",
        &[
            "id",
            "application_no",
            "scholar_name",
            "department",
            "legacy_department",
            "faculty",
            "legacy_faculty",
            "status",
            "scheme",
            "semester",
            "remarks",
            "submitted_at",
            "updated_at",
        ],
    ),
    (
        "examinations",
        &[
            "id",
            "register_no",
            "scholar_name",
            "department",
            "legacy_department",
            "exam_name",
            "result",
            "score",
            "exam_date",
        ],
    ),
    ("settings", &["key", "value", "updated_at"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequiredIndex {
    name: &'static str,
    create_sql: &'static str,
}

const REQUIRED_INDEXES: &[RequiredIndex] = &[
    RequiredIndex {
        name: "idx_actors_email",
        create_sql: "CREATE UNIQUE INDEX IF NOT EXISTS idx_actors_email ON actors (email COLLATE NOCASE);",
    },
    RequiredIndex {
        name: "idx_sessions_actor_id",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_sessions_actor_id ON sessions (actor_id);",
    },
    RequiredIndex {
        name: "idx_applications_department",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_applications_department ON scholar_applications (department);",
    },
    RequiredIndex {
        name: "idx_applications_faculty",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_applications_faculty ON scholar_applications (faculty);",
    },
    RequiredIndex {
        name: "idx_examinations_department",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_examinations_department ON examinations (department);",
    },
];

const ACTOR_COLUMNS: &str =
    "id, email, display_name, phone, role, faculty, department, created_at, updated_at";

const APPLICATION_COLUMNS: &str = "
  id, application_no, scholar_name, department, legacy_department,
  faculty, legacy_faculty, status, scheme, semester, remarks,
  submitted_at, updated_at
";

const EXAMINATION_COLUMNS: &str = "
  id, register_no, scholar_name, department, legacy_department,
  exam_name, result, score, exam_date
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActor {
    pub email: String,
    pub display_name: String,
    pub phone: String,
    pub role: Role,
    pub faculty: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewApplication {
    pub application_no: Option<String>,
    pub scholar_name: Option<String>,
    pub department: Option<String>,
    pub legacy_department: Option<String>,
    pub faculty: Option<String>,
    pub legacy_faculty: Option<String>,
    pub status: Option<String>,
    pub scheme: Option<String>,
    pub semester: Option<i64>,
    pub submitted_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewExamination {
    pub register_no: Option<String>,
    pub scholar_name: Option<String>,
    pub department: Option<String>,
    pub legacy_department: Option<String>,
    pub exam_name: Option<String>,
    pub result: Option<String>,
    pub score: Option<f64>,
    pub exam_date: Option<Date>,
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        let conn = Connection::open(path)
            .with_context(|| format!("open database at {}", path.display()))?;
        configure_connection(&conn)?;
        debug!(path = %path.display(), "opened database");
        Ok(Self { conn })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bootstrap(&self) -> Result<()> {
        if has_user_tables(&self.conn)? {
            validate_schema(&self.conn)?;
        } else {
            self.conn
                .execute_batch(include_str!("sql/schema.sql"))
                .context("create schema")?;
            debug!("created schema");
        }

        ensure_required_indexes(&self.conn)?;
        Ok(())
    }

    pub fn create_actor(&self, actor: &NewActor) -> Result<ActorId> {
        let email = actor.email.trim();
        if email.is_empty() || !email.contains('@') {
            bail!("actor email {email:?} is not an address -- enter a full email and retry");
        }
        ProfileFormInput {
            display_name: actor.display_name.clone(),
            phone: actor.phone.clone(),
        }
        .validate()?;

        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO actors (
                  email, display_name, phone, role, faculty, department,
                  created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ",
                params![
                    email,
                    actor.display_name.trim(),
                    actor.phone.trim(),
                    actor.role.as_str(),
                    actor.faculty,
                    actor.department,
                    now,
                    now,
                ],
            )
            .with_context(|| format!("insert actor {email}"))?;

        Ok(ActorId::new(self.conn.last_insert_rowid()))
    }

    pub fn get_actor(&self, actor_id: ActorId) -> Result<Actor> {
        self.conn
            .query_row(
                &format!("SELECT {ACTOR_COLUMNS} FROM actors WHERE id = ?"),
                params![actor_id.get()],
                actor_from_row,
            )
            .with_context(|| format!("load actor {}", actor_id.get()))
    }

    pub fn find_actor_by_email(&self, email: &str) -> Result<Option<Actor>> {
        self.conn
            .query_row(
                &format!("SELECT {ACTOR_COLUMNS} FROM actors WHERE email = ? COLLATE NOCASE"),
                params![email.trim()],
                actor_from_row,
            )
            .optional()
            .with_context(|| format!("look up actor {email}"))
    }

    pub fn list_actors(&self) -> Result<Vec<Actor>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {ACTOR_COLUMNS} FROM actors ORDER BY email ASC, id ASC"
            ))
            .context("prepare actors query")?;
        let rows = stmt
            .query_map([], actor_from_row)
            .context("query actors")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect actors")
    }

    pub fn update_actor_profile(
        &self,
        actor_id: ActorId,
        profile: &ProfileFormInput,
    ) -> Result<()> {
        let profile = profile.normalized()?;
        let now = now_rfc3339()?;
        let rows_affected = self
            .conn
            .execute(
                "
                UPDATE actors
                SET display_name = ?, phone = ?, updated_at = ?
                WHERE id = ?
                ",
                params![profile.display_name, profile.phone, now, actor_id.get()],
            )
            .context("update actor profile")?;
        if rows_affected == 0 {
            bail!(
                "actor {} not found -- sign in again and retry",
                actor_id.get()
            );
        }
        info!(actor = actor_id.get(), "profile updated");
        Ok(())
    }

    /// Starts a session for the actor registered under `email`.
    pub fn sign_in(&self, email: &str) -> Result<(Actor, Session)> {
        let actor = self.find_actor_by_email(email)?.ok_or_else(|| {
            anyhow!("no account registered for {email:?} -- check the address or run with --demo")
        })?;
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "INSERT INTO sessions (actor_id, started_at) VALUES (?, ?)",
                params![actor.id.get(), now],
            )
            .with_context(|| format!("start session for {}", actor.email))?;
        let session_id = SessionId::new(self.conn.last_insert_rowid());
        let session = self.get_session(session_id)?;
        info!(actor = %actor.email, session = session_id.get(), "signed in");
        Ok((actor, session))
    }

    pub fn sign_out(&self, session_id: SessionId) -> Result<()> {
        let now = now_rfc3339()?;
        let rows_affected = self
            .conn
            .execute(
                "UPDATE sessions SET ended_at = ? WHERE id = ? AND ended_at IS NULL",
                params![now, session_id.get()],
            )
            .context("end session")?;
        if rows_affected == 0 {
            bail!(
                "session {} is not active -- it may already be signed out",
                session_id.get()
            );
        }
        info!(session = session_id.get(), "signed out");
        Ok(())
    }

    pub fn get_session(&self, session_id: SessionId) -> Result<Session> {
        self.conn
            .query_row(
                "SELECT id, actor_id, started_at, ended_at FROM sessions WHERE id = ?",
                params![session_id.get()],
                session_from_row,
            )
            .with_context(|| format!("load session {}", session_id.get()))
    }

    /// Most recently started session that has not been ended.
    pub fn active_session(&self) -> Result<Option<Session>> {
        self.conn
            .query_row(
                "
                SELECT id, actor_id, started_at, ended_at
                FROM sessions
                WHERE ended_at IS NULL
                ORDER BY started_at DESC, id DESC
                LIMIT 1
                ",
                [],
                session_from_row,
            )
            .optional()
            .context("load active session")
    }

    pub fn create_application(&self, application: &NewApplication) -> Result<ApplicationId> {
        if let Some(semester) = application.semester {
            check_semester(semester).map_err(|error| {
                anyhow!("{error} {semester} -- use a semester between 1 and 12")
            })?;
        }
        let submitted_at = application
            .submitted_at
            .map(format_datetime)
            .transpose()?;
        self.conn
            .execute(
                "
                INSERT INTO scholar_applications (
                  application_no, scholar_name, department, legacy_department,
                  faculty, legacy_faculty, status, scheme, semester,
                  submitted_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ",
                params![
                    application.application_no,
                    application.scholar_name,
                    application.department,
                    application.legacy_department,
                    application.faculty,
                    application.legacy_faculty,
                    application.status,
                    application.scheme,
                    application.semester,
                    submitted_at,
                    submitted_at,
                ],
            )
            .context("insert scholar application")?;

        Ok(ApplicationId::new(self.conn.last_insert_rowid()))
    }

    pub fn get_application(&self, application_id: ApplicationId) -> Result<ScholarApplication> {
        self.conn
            .query_row(
                &format!("SELECT {APPLICATION_COLUMNS} FROM scholar_applications WHERE id = ?"),
                params![application_id.get()],
                application_from_row,
            )
            .with_context(|| format!("load application {}", application_id.get()))
    }

    /// Every application in insertion order. Scoping happens in the caller.
    pub fn list_applications(&self) -> Result<Vec<ScholarApplication>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {APPLICATION_COLUMNS} FROM scholar_applications ORDER BY id ASC"
            ))
            .context("prepare applications query")?;
        let rows = stmt
            .query_map([], application_from_row)
            .context("query applications")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect applications")
    }

    /// Moves an application from `from` to `to`. The write only lands when
    /// the stored status still reads `from`.
    pub fn update_application_status(
        &self,
        application_id: ApplicationId,
        from: &str,
        to: ApplicationStatus,
        remarks: &str,
    ) -> Result<()> {
        let now = now_rfc3339()?;
        let remarks = remarks.trim();
        let rows_affected = self
            .conn
            .execute(
                "
                UPDATE scholar_applications
                SET status = ?, remarks = ?, updated_at = ?
                WHERE id = ? AND COALESCE(status, '') = ?
                ",
                params![
                    to.as_str(),
                    (!remarks.is_empty()).then_some(remarks),
                    now,
                    application_id.get(),
                    from,
                ],
            )
            .context("update application status")?;
        if rows_affected == 0 {
            let current = self.get_application(application_id).with_context(|| {
                format!(
                    "application {} not found -- refresh the list and retry",
                    application_id.get()
                )
            })?;
            bail!(
                "application {} is now {:?}, not {from:?} -- refresh the list and retry",
                application_id.get(),
                current.status.unwrap_or_default()
            );
        }
        Ok(())
    }

    /// Applies a workflow decision against the stored status, not the one the
    /// form was opened with.
    pub fn decide_application(
        &self,
        role: Role,
        decision: &DecisionFormInput,
    ) -> Result<ApplicationStatus> {
        let current = self.get_application(decision.application_id)?;
        let stored = DecisionFormInput {
            current_status: current.status.unwrap_or_default(),
            ..decision.clone()
        };
        let next = stored.validate(role)?;
        self.update_application_status(
            decision.application_id,
            &stored.current_status,
            next,
            &decision.remarks,
        )?;
        info!(
            application = decision.application_id.get(),
            from = %stored.current_status,
            to = next.as_str(),
            "application decided"
        );
        Ok(next)
    }

    pub fn create_examination(&self, examination: &NewExamination) -> Result<ExaminationId> {
        if let Some(score) = examination.score {
            check_score(score)
                .map_err(|error| anyhow!("{error} {score} -- use a score from 0 to 100"))?;
        }
        self.conn
            .execute(
                "
                INSERT INTO examinations (
                  register_no, scholar_name, department, legacy_department,
                  exam_name, result, score, exam_date
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ",
                params![
                    examination.register_no,
                    examination.scholar_name,
                    examination.department,
                    examination.legacy_department,
                    examination.exam_name,
                    examination.result,
                    examination.score,
                    examination.exam_date.map(|date| format_date(Some(date))),
                ],
            )
            .context("insert examination")?;

        Ok(ExaminationId::new(self.conn.last_insert_rowid()))
    }

    pub fn list_examinations(&self) -> Result<Vec<ExaminationRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {EXAMINATION_COLUMNS} FROM examinations ORDER BY id ASC"
            ))
            .context("prepare examinations query")?;
        let rows = stmt
            .query_map([], examination_from_row)
            .context("query examinations")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect examinations")
    }

    fn get_setting_raw(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| format!("read setting {key}"))
    }

    fn put_setting_raw(&self, key: &str, value: &str) -> Result<()> {
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO settings (key, value, updated_at)
                VALUES (?, ?, ?)
                ON CONFLICT(key) DO UPDATE SET
                  value = excluded.value,
                  updated_at = excluded.updated_at
                ",
                params![key, value, now],
            )
            .with_context(|| format!("upsert setting {key}"))?;
        Ok(())
    }

    pub fn get_setting(&self, key: SettingKey) -> Result<Option<SettingValue>> {
        let raw = self.get_setting_raw(key.as_str())?;
        raw.map(|value| {
            SettingValue::parse_for_key(key, &value).ok_or_else(|| {
                anyhow!(
                    "setting `{}` has invalid value `{}`; run `scholardesk --check`, then set a valid value in Settings",
                    key.as_str(),
                    value
                )
            })
        })
        .transpose()
    }

    pub fn put_setting(&self, key: SettingKey, value: SettingValue) -> Result<()> {
        let raw = value.to_storage(key).ok_or_else(|| {
            anyhow!(
                "setting `{}` expected {:?} value; reopen Settings and choose a valid option",
                key.as_str(),
                key.expected_value_kind()
            )
        })?;
        self.put_setting_raw(key.as_str(), &raw)
    }

    pub fn list_settings(&self) -> Result<Vec<AppSetting>> {
        let mut settings = Vec::with_capacity(SettingKey::ALL.len());
        for key in SettingKey::ALL {
            let value = self
                .get_setting(key)?
                .unwrap_or_else(|| default_setting_value(key));
            settings.push(AppSetting { key, value });
        }
        Ok(settings)
    }

    pub fn get_theme(&self) -> Result<Theme> {
        match self.get_setting(SettingKey::UiTheme)? {
            Some(SettingValue::Theme(theme)) => Ok(theme),
            Some(SettingValue::Bool(_)) => bail!(
                "setting `{}` must be light, dark, or system; open Settings and pick one",
                SettingKey::UiTheme.as_str()
            ),
            None => Ok(Theme::System),
        }
    }

    pub fn put_theme(&self, theme: Theme) -> Result<()> {
        self.put_setting(SettingKey::UiTheme, SettingValue::Theme(theme))
    }

    pub fn get_show_dashboard_override(&self) -> Result<Option<bool>> {
        match self.get_setting(SettingKey::UiShowDashboard)? {
            Some(SettingValue::Bool(value)) => Ok(Some(value)),
            Some(SettingValue::Theme(_)) => bail!(
                "setting `{}` must be on/off; open Settings and toggle it",
                SettingKey::UiShowDashboard.as_str()
            ),
            None => Ok(None),
        }
    }

    pub fn put_show_dashboard(&self, show: bool) -> Result<()> {
        self.put_setting(SettingKey::UiShowDashboard, SettingValue::Bool(show))
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os("SCHOLARDESK_DB_PATH") {
        return Ok(PathBuf::from(override_path));
    }

    let app_dir = data_dir()?;
    Ok(app_dir.join("scholardesk.db"))
}

/// Per-user data directory, created on first use.
pub fn data_dir() -> Result<PathBuf> {
    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set SCHOLARDESK_DB_PATH to a writable database path")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir)
}

pub fn validate_db_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("database path must not be empty");
    }
    if path == ":memory:" {
        return Ok(());
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "database path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("database path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    if path.contains('?') {
        bail!(
            "database path {path:?} contains '?'; remove query parameters and use a plain file path"
        );
    }

    Ok(())
}

fn actor_from_row(row: &Row<'_>) -> rusqlite::Result<Actor> {
    let role_raw: String = row.get(4)?;
    let role = Role::parse(&role_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("unknown actor role {role_raw}"),
            )),
        )
    })?;
    let created_at_raw: String = row.get(7)?;
    let updated_at_raw: String = row.get(8)?;

    Ok(Actor {
        id: ActorId::new(row.get(0)?),
        email: row.get(1)?,
        display_name: row.get(2)?,
        phone: row.get(3)?,
        role,
        faculty: row.get(5)?,
        department: row.get(6)?,
        created_at: parse_datetime(&created_at_raw).map_err(to_sql_error)?,
        updated_at: parse_datetime(&updated_at_raw).map_err(to_sql_error)?,
    })
}

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<Session> {
    let started_at_raw: String = row.get(2)?;
    let ended_at_raw: Option<String> = row.get(3)?;
    Ok(Session {
        id: SessionId::new(row.get(0)?),
        actor_id: ActorId::new(row.get(1)?),
        started_at: parse_datetime(&started_at_raw).map_err(to_sql_error)?,
        ended_at: parse_opt_datetime(ended_at_raw).map_err(to_sql_error)?,
    })
}

fn application_from_row(row: &Row<'_>) -> rusqlite::Result<ScholarApplication> {
    let submitted_at_raw: Option<String> = row.get(11)?;
    let updated_at_raw: Option<String> = row.get(12)?;
    Ok(ScholarApplication {
        id: ApplicationId::new(row.get(0)?),
        application_no: row.get(1)?,
        scholar_name: row.get(2)?,
        department: row.get(3)?,
        legacy_department: row.get(4)?,
        faculty: row.get(5)?,
        legacy_faculty: row.get(6)?,
        status: row.get(7)?,
        scheme: row.get(8)?,
        semester: row.get(9)?,
        remarks: row.get(10)?,
        submitted_at: parse_opt_datetime(submitted_at_raw).map_err(to_sql_error)?,
        updated_at: parse_opt_datetime(updated_at_raw).map_err(to_sql_error)?,
    })
}

fn examination_from_row(row: &Row<'_>) -> rusqlite::Result<ExaminationRecord> {
    let exam_date_raw: Option<String> = row.get(8)?;
    Ok(ExaminationRecord {
        id: ExaminationId::new(row.get(0)?),
        register_no: row.get(1)?,
        scholar_name: row.get(2)?,
        department: row.get(3)?,
        legacy_department: row.get(4)?,
        exam_name: row.get(5)?,
        result: row.get(6)?,
        score: row.get(7)?,
        exam_date: parse_opt_date(exam_date_raw).map_err(to_sql_error)?,
    })
}

fn has_user_tables(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "
            SELECT COUNT(*)
            FROM sqlite_master
            WHERE type = 'table'
              AND name NOT LIKE 'sqlite_%'
            ",
            [],
            |row| row.get(0),
        )
        .context("count user tables")?;
    Ok(count > 0)
}

fn validate_schema(conn: &Connection) -> Result<()> {
    for (table, required_columns) in REQUIRED_SCHEMA {
        if !table_exists(conn, table)? {
            bail!(
                "database is missing required table `{table}`; use a scholardesk database or migrate first"
            );
        }

        let columns = table_columns(conn, table)?;
        let missing: Vec<&str> = required_columns
            .iter()
            .copied()
            .filter(|column| !columns.contains(*column))
            .collect();

        if !missing.is_empty() {
            bail!(
                "table `{table}` is missing required columns: {}; run migration before launching",
                missing.join(", ")
            );
        }
    }

    Ok(())
}

fn ensure_required_indexes(conn: &Connection) -> Result<()> {
    for index in REQUIRED_INDEXES {
        conn.execute_batch(index.create_sql)
            .with_context(|| format!("ensure required index `{}`", index.name))?;
    }

    let existing_indexes = index_names(conn)?;
    let missing = REQUIRED_INDEXES
        .iter()
        .filter(|index| !existing_indexes.contains(index.name))
        .map(|index| index.name)
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        bail!(
            "database is missing required indexes: {}; run migration before launching",
            missing.join(", ")
        );
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let exists = conn
        .query_row(
            "
            SELECT EXISTS(
              SELECT 1
              FROM sqlite_master
              WHERE type = 'table' AND name = ?
            )
            ",
            params![table],
            |row| row.get::<_, i64>(0),
        )
        .with_context(|| format!("check table existence for {table}"))?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .with_context(|| format!("inspect columns for {table}"))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .with_context(|| format!("query column info for {table}"))?;

    let names = rows
        .collect::<rusqlite::Result<BTreeSet<_>>>()
        .with_context(|| format!("collect columns for {table}"))?;
    Ok(names)
}

fn index_names(conn: &Connection) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(
            "
            SELECT name
            FROM sqlite_master
            WHERE type = 'index'
              AND name NOT LIKE 'sqlite_%'
            ORDER BY name ASC
            ",
        )
        .context("prepare index names query")?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .context("query index names")?;
    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .context("collect index names")
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .context("configure sqlite pragmas")
}

fn default_setting_value(key: SettingKey) -> SettingValue {
    match key {
        SettingKey::UiTheme => SettingValue::Theme(Theme::System),
        SettingKey::UiShowDashboard => SettingValue::Bool(true),
    }
}

fn now_rfc3339() -> Result<String> {
    format_datetime(OffsetDateTime::now_utc())
}

fn format_datetime(value: OffsetDateTime) -> Result<String> {
    value.format(&Rfc3339).context("format timestamp")
}

fn parse_datetime(raw: &str) -> Result<OffsetDateTime> {
    if let Ok(value) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(value);
    }

    if let Ok(value) = OffsetDateTime::parse(
        raw,
        &format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
        ),
    ) {
        return Ok(value);
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Ok(value.assume_utc());
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Ok(value.assume_utc());
    }

    bail!("unsupported datetime format {raw:?}")
}

fn parse_date(raw: &str) -> Result<Date> {
    if let Ok(value) = parse_required_date(raw) {
        return Ok(value);
    }

    // Some imports store exam dates as full timestamps.
    let date_time = parse_datetime(raw)?;
    Ok(date_time.date())
}

fn parse_opt_datetime(raw: Option<String>) -> Result<Option<OffsetDateTime>> {
    raw.as_deref().map(parse_datetime).transpose()
}

fn parse_opt_date(raw: Option<String>) -> Result<Option<Date>> {
    raw.as_deref().map(parse_date).transpose()
}

fn to_sql_error(error: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            error.to_string(),
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::Store;
    use anyhow::Result;
    use scholardesk_app::{SettingKey, SettingValue, Theme};

    #[test]
    fn list_settings_returns_typed_defaults() -> Result<()> {
        let store = Store::open_memory()?;
        store.bootstrap()?;

        let settings = store.list_settings()?;
        assert_eq!(settings.len(), 2);
        assert_eq!(settings[0].key, SettingKey::UiTheme);
        assert_eq!(settings[0].value, SettingValue::Theme(Theme::System));
        assert_eq!(settings[1].key, SettingKey::UiShowDashboard);
        assert_eq!(settings[1].value, SettingValue::Bool(true));
        Ok(())
    }

    #[test]
    fn typed_settings_round_trip() -> Result<()> {
        let store = Store::open_memory()?;
        store.bootstrap()?;

        store.put_show_dashboard(false)?;
        store.put_theme(Theme::Dark)?;

        assert_eq!(store.get_theme()?, Theme::Dark);
        assert_eq!(store.get_show_dashboard_override()?, Some(false));
        Ok(())
    }

    #[test]
    fn invalid_bool_setting_is_actionable() -> Result<()> {
        let store = Store::open_memory()?;
        store.bootstrap()?;

        store.put_setting_raw(SettingKey::UiShowDashboard.as_str(), "maybe")?;
        let error = store
            .get_show_dashboard_override()
            .expect_err("invalid bool should be rejected");
        assert!(error.to_string().contains("set a valid value in Settings"));
        Ok(())
    }

    #[test]
    fn mismatched_setting_value_is_rejected() -> Result<()> {
        let store = Store::open_memory()?;
        store.bootstrap()?;

        let error = store
            .put_setting(SettingKey::UiTheme, SettingValue::Bool(true))
            .expect_err("bool theme should be rejected");
        assert!(error.to_string().contains("choose a valid option"));
        Ok(())
    }
}
