// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use runtime::DbRuntime;
use scholardesk_app::{Actor, AppState, Role, ScreenKind, SessionId, SettingKey};
use scholardesk_db::{NewActor, NewApplication, NewExamination, Store};
use scholardesk_testkit::{DemoDataset, demo_dataset};
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEMO_SEED: u64 = 42;
const LOG_FILE_NAME: &str = "scholardesk.log";
const DEFAULT_LOG_FILTER: &str = "scholardesk=info";

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    if options.print_demo_json {
        let dataset = demo_dataset(DEMO_SEED);
        println!(
            "{}",
            serde_json::to_string_pretty(&dataset).context("encode demo dataset")?
        );
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `scholardesk --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let db_path = if options.demo {
        PathBuf::from(":memory:")
    } else {
        config.db_path()?
    };
    if options.print_db_path {
        println!("{}", db_path.display());
        return Ok(());
    }

    init_logging()?;

    let store = if options.demo {
        Store::open_memory()?
    } else {
        Store::open(&db_path).with_context(|| {
            format!(
                "open database {} -- if this path is wrong, set [storage].db_path or SCHOLARDESK_DB_PATH",
                db_path.display()
            )
        })?
    };
    store.bootstrap()?;

    let demo = if options.demo {
        let dataset = demo_dataset(DEMO_SEED);
        seed_demo_data(&store, &dataset)?;
        Some(dataset)
    } else {
        None
    };

    if let Some(theme) = config.theme()
        && store.get_setting(SettingKey::UiTheme)?.is_none()
    {
        store.put_theme(theme)?;
    }

    let email = sign_in_email(&options, &config, demo.as_ref());
    if options.check_only {
        let actor = check_actor(&store, email.as_deref())?;
        if let Some(actor) = actor {
            println!("ok: {} ({})", actor.email, actor.role.label());
        } else {
            println!("ok");
        }
        return Ok(());
    }

    let (actor, session_id) = sign_in(&store, email.as_deref())?;

    let show_dashboard = store
        .get_show_dashboard_override()?
        .unwrap_or_else(|| config.show_dashboard());
    let mut state = AppState::new(actor.role, start_screen(actor.role, show_dashboard));

    let mut runtime = DbRuntime::new(&store, actor.id, session_id);
    scholardesk_tui::run_app(&mut state, &mut runtime)?;
    if state.signed_out {
        info!(actor = %actor.email, "exited after sign-out");
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_db_path: bool,
    demo: bool,
    print_demo_json: bool,
    print_example: bool,
    actor_email: Option<String>,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_db_path: false,
        demo: false,
        print_demo_json: false,
        print_example: false,
        actor_email: None,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--as" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--as requires an account email"))?;
                options.actor_email = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-path" => {
                options.print_db_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--print-demo-json" => {
                options.print_demo_json = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                bail!("unknown argument {unknown:?}; run with --help to see supported options");
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("scholardesk");
    println!("  --config <path>          Use a specific config path");
    println!("  --as <email>             Sign in as this account");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-path             Print resolved database path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Launch with seeded demo data (in-memory)");
    println!("  --print-demo-json        Print the demo dataset as JSON");
    println!("  --check                  Validate config, database, and account, then exit");
    println!("  --help                   Show this help");
}

/// Logs go to a file in the data directory; the terminal belongs to the UI.
fn init_logging() -> Result<()> {
    let log_path = scholardesk_db::data_dir()?.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;
    let env_filter = EnvFilter::try_from_env("SCHOLARDESK_LOG")
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("build log filter; check SCHOLARDESK_LOG")?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow!("initialize logging: {error}"))
}

fn seed_demo_data(store: &Store, dataset: &DemoDataset) -> Result<()> {
    for actor in &dataset.actors {
        store.create_actor(&NewActor {
            email: actor.email.clone(),
            display_name: actor.display_name.clone(),
            phone: actor.phone.clone(),
            role: actor.role,
            faculty: actor.faculty.clone(),
            department: actor.department.clone(),
        })?;
    }
    for application in &dataset.applications {
        store.create_application(&NewApplication {
            application_no: Some(application.application_no.clone()),
            scholar_name: Some(application.scholar_name.clone()),
            department: application.department.clone(),
            legacy_department: application.legacy_department.clone(),
            faculty: application.faculty.clone(),
            legacy_faculty: application.legacy_faculty.clone(),
            status: Some(application.status.clone()),
            scheme: Some(application.scheme.clone()),
            semester: Some(application.semester),
            submitted_at: Some(application.submitted_at),
        })?;
    }
    for examination in &dataset.examinations {
        store.create_examination(&NewExamination {
            register_no: Some(examination.register_no.clone()),
            scholar_name: Some(examination.scholar_name.clone()),
            department: examination.department.clone(),
            legacy_department: examination.legacy_department.clone(),
            exam_name: Some(examination.exam_name.clone()),
            result: Some(examination.result.clone()),
            score: Some(examination.score),
            exam_date: Some(examination.exam_date),
        })?;
    }
    info!(
        actors = dataset.actors.len(),
        applications = dataset.applications.len(),
        examinations = dataset.examinations.len(),
        "seeded demo data"
    );
    Ok(())
}

/// `--as`, then `[session].email`, then the first assigned demo HOD.
fn sign_in_email(
    options: &CliOptions,
    config: &Config,
    demo: Option<&DemoDataset>,
) -> Option<String> {
    options
        .actor_email
        .clone()
        .or_else(|| config.session_email().map(str::to_owned))
        .or_else(|| {
            demo?
                .actors
                .iter()
                .find(|actor| actor.role == Role::Hod && actor.department.is_some())
                .map(|actor| actor.email.clone())
        })
}

fn check_actor(store: &Store, email: Option<&str>) -> Result<Option<Actor>> {
    let Some(email) = email else {
        return Ok(None);
    };
    let actor = store.find_actor_by_email(email)?.ok_or_else(|| {
        anyhow!("no account registered for {email:?} -- fix --as or [session].email")
    })?;
    Ok(Some(actor))
}

/// Starts a session for `email`, or resumes the open session when no
/// account was named.
fn sign_in(store: &Store, email: Option<&str>) -> Result<(Actor, SessionId)> {
    if let Some(email) = email {
        let (actor, session) = store.sign_in(email)?;
        return Ok((actor, session.id));
    }
    match store.active_session()? {
        Some(session) => {
            let actor = store.get_actor(session.actor_id)?;
            info!(actor = %actor.email, session = session.id.get(), "resumed session");
            Ok((actor, session.id))
        }
        None => {
            warn!("no account to sign in as");
            bail!("no account to sign in as -- pass --as <email> or set [session].email")
        }
    }
}

fn start_screen(role: Role, show_dashboard: bool) -> ScreenKind {
    if show_dashboard {
        return ScreenKind::Dashboard;
    }
    ScreenKind::for_role(role)
        .iter()
        .copied()
        .find(|screen| screen.is_table())
        .unwrap_or(ScreenKind::Dashboard)
}
