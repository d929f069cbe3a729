// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use scholardesk_app::{
    Actor, AppCommand, AppEvent, AppMode, AppSetting, AppState, ApplicationField, Decision,
    DecisionFormInput, DEPARTMENT_APPLICATIONS, EXAMINATIONS, ExaminationField, ExaminationRecord,
    FACULTY_APPLICATIONS, FieldValue, FilterOptions, FilterSelection, FormKind, FormPayload, ModalState,
    ProfileFormInput, Record, RecordField, RecordSet, Role, ScholarApplication, ScopeLevel,
    ScreenKind, ScreenSpec, SettingKey, SettingValue, SortDirection, StatusTally, Theme,
    ViewAction, ViewState, filter_options, project, summarize,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::macros::format_description;

const HALF_PAGE_ROWS: isize = 10;
const SORT_MARK_ASC: &str = "↑";
const SORT_MARK_DESC: &str = "↓";
const FILTER_MARK_ACTIVE: &str = "▼";
const LOADING_TEXT: &str = "loading records...";

/// Backend operations the UI needs. The CLI binds these to the SQLite store.
pub trait AppRuntime {
    fn load_actor(&mut self) -> Result<Actor>;
    fn load_applications(&mut self) -> Result<Vec<ScholarApplication>>;
    fn load_examinations(&mut self) -> Result<Vec<ExaminationRecord>>;
    fn load_settings(&mut self) -> Result<Vec<AppSetting>>;
    fn submit_form(&mut self, payload: &FormPayload) -> Result<()>;
    fn set_theme(&mut self, theme: Theme) -> Result<()>;
    fn set_show_dashboard_preference(&mut self, show: bool) -> Result<()>;
    fn sign_out(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TableRow {
    key: i64,
    cells: Vec<String>,
}

/// Rendered form of one pipeline projection.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TableProjection {
    title: &'static str,
    columns: Vec<&'static str>,
    sort_column: Option<usize>,
    sort_direction: SortDirection,
    search_term: String,
    filters: Vec<String>,
    rows: Vec<TableRow>,
    message: Option<String>,
}

impl TableProjection {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FilterModalEntry {
    choices: FilterOptions,
    selected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct TableUiState {
    screen: Option<ScreenKind>,
    selected_row: usize,
    selected_col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct FilterModalUiState {
    dimension: usize,
    option: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormUiState {
    Profile {
        input: ProfileFormInput,
        field_index: usize,
    },
    Decision {
        application_no: String,
        input: DecisionFormInput,
        field_index: usize,
    },
}

impl FormUiState {
    const PROFILE_FIELDS: [&'static str; 2] = ["display name", "phone"];
    const DECISION_FIELDS: [&'static str; 2] = ["decision", "remarks"];

    fn kind(&self) -> FormKind {
        match self {
            Self::Profile { .. } => FormKind::Profile,
            Self::Decision { .. } => FormKind::Decision,
        }
    }

    fn field_labels(&self) -> &'static [&'static str] {
        match self {
            Self::Profile { .. } => &Self::PROFILE_FIELDS,
            Self::Decision { .. } => &Self::DECISION_FIELDS,
        }
    }

    fn field_index(&self) -> usize {
        match self {
            Self::Profile { field_index, .. } | Self::Decision { field_index, .. } => *field_index,
        }
    }

    fn move_field(&mut self, delta: isize) -> &'static str {
        let labels = self.field_labels();
        let len = labels.len() as isize;
        let next = (self.field_index() as isize + delta).rem_euclid(len) as usize;
        match self {
            Self::Profile { field_index, .. } | Self::Decision { field_index, .. } => {
                *field_index = next;
            }
        }
        labels[next]
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Profile {
                input,
                field_index: 0,
            } => Some(&mut input.display_name),
            Self::Profile { input, .. } => Some(&mut input.phone),
            Self::Decision {
                input,
                field_index: 1,
                ..
            } => Some(&mut input.remarks),
            Self::Decision { .. } => None,
        }
    }

    fn select_decision(&mut self, role: Role, index: usize) -> Option<Decision> {
        let Self::Decision { input, .. } = self else {
            return None;
        };
        let decision = Decision::for_role(role).get(index).copied()?;
        input.decision = decision;
        Some(decision)
    }

    fn cycle_decision(&mut self, role: Role, delta: isize) -> Option<Decision> {
        let Self::Decision { input, .. } = self else {
            return None;
        };
        let options = Decision::for_role(role);
        if options.is_empty() {
            return None;
        }
        let current = options
            .iter()
            .position(|decision| *decision == input.decision)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(options.len() as isize) as usize;
        input.decision = options[next];
        Some(options[next])
    }

    fn payload(&self) -> FormPayload {
        match self {
            Self::Profile { input, .. } => FormPayload::Profile(input.clone()),
            Self::Decision { input, .. } => FormPayload::Decision(input.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableCommand {
    MoveRow(isize),
    MoveColumn(isize),
    JumpFirstRow,
    JumpLastRow,
    ToggleSort,
    ResetSort,
    OpenFilters,
    ClearFilters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TableStatus {
    SortUnavailable,
    SortAsc(&'static str),
    SortDesc(&'static str),
    SortReset,
    FiltersOpen,
    FiltersCleared,
}

impl TableStatus {
    fn message(self) -> String {
        match self {
            Self::SortUnavailable => "sort unavailable".to_owned(),
            Self::SortAsc(column) => format!("sort {column} asc"),
            Self::SortDesc(column) => format!("sort {column} desc"),
            Self::SortReset => "sort reset".to_owned(),
            Self::FiltersOpen => "filters open".to_owned(),
            Self::FiltersCleared => "filters cleared".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TableEvent {
    CursorUpdated,
    Status(TableStatus),
}

/// Screen-agnostic view-state input, mapped onto the typed reducer of
/// whichever table screen is active.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ViewInput {
    AppendSearch(char),
    PopSearch,
    ClearSearch,
    SelectFilter {
        dimension: &'static str,
        selection: FilterSelection,
    },
    ToggleSortColumn(usize),
    ResetSort,
    OpenFilterModal,
    ApplyFilterModal,
    CloseFilterModal,
    ClearFilters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    text: Color,
    accent: Color,
    status: Color,
    selected_bg: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                text: Color::Black,
                accent: Color::Blue,
                status: Color::Magenta,
                selected_bg: Color::Gray,
            },
            Theme::Dark | Theme::System => Self {
                text: Color::White,
                accent: Color::Cyan,
                status: Color::Yellow,
                selected_bg: Color::DarkGray,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone)]
struct ViewData {
    actor: Option<Actor>,
    applications: RecordSet<ScholarApplication>,
    examinations: RecordSet<ExaminationRecord>,
    settings: Vec<AppSetting>,
    department_view: ViewState<ApplicationField>,
    faculty_view: ViewState<ApplicationField>,
    examination_view: ViewState<ExaminationField>,
    table_state: TableUiState,
    filter_modal: FilterModalUiState,
    settings_cursor: usize,
    form: Option<FormUiState>,
    help_visible: bool,
    status_token: u64,
}

impl Default for ViewData {
    fn default() -> Self {
        Self {
            actor: None,
            applications: RecordSet::Loading,
            examinations: RecordSet::Loading,
            settings: Vec::new(),
            department_view: ViewState::new(&DEPARTMENT_APPLICATIONS),
            faculty_view: ViewState::new(&FACULTY_APPLICATIONS),
            examination_view: ViewState::new(&EXAMINATIONS),
            table_state: TableUiState::default(),
            filter_modal: FilterModalUiState::default(),
            settings_cursor: 0,
            form: None,
            help_visible: false,
            status_token: 0,
        }
    }
}

impl ViewData {
    fn scope(&self, level: ScopeLevel) -> &str {
        self.actor
            .as_ref()
            .map_or("", |actor| actor.scope_value(level))
    }

    fn setting(&self, key: SettingKey) -> Option<&SettingValue> {
        self.settings
            .iter()
            .find(|setting| setting.key == key)
            .map(|setting| &setting.value)
    }

    fn theme(&self) -> Theme {
        match self.setting(SettingKey::UiTheme) {
            Some(SettingValue::Theme(theme)) => *theme,
            _ => Theme::System,
        }
    }

    fn show_dashboard(&self) -> bool {
        !matches!(
            self.setting(SettingKey::UiShowDashboard),
            Some(SettingValue::Bool(false))
        )
    }
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();
    let mut loaded = false;

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        // the first frame shows the loading placeholder
        if !loaded {
            loaded = true;
            reload(state, runtime, &mut view_data, &internal_tx);
            continue;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn dispatch_and_sync(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    let events = state.dispatch(command);
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::ScreenChanged(_)))
    {
        clamp_table_cursor(state, view_data);
    }
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

fn refresh_view_data<R: AppRuntime>(runtime: &mut R, view_data: &mut ViewData) -> Result<()> {
    view_data.applications = RecordSet::Loading;
    view_data.examinations = RecordSet::Loading;
    view_data.actor = Some(runtime.load_actor()?);
    view_data.settings = runtime.load_settings()?;
    view_data.applications = RecordSet::Ready(runtime.load_applications()?);
    view_data.examinations = RecordSet::Ready(runtime.load_examinations()?);
    Ok(())
}

fn reload<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) -> bool {
    let loaded = match refresh_view_data(runtime, view_data) {
        Ok(()) => true,
        Err(error) => {
            emit_status(state, view_data, internal_tx, format!("load failed: {error}"));
            false
        }
    };
    clamp_table_cursor(state, view_data);
    loaded
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
            emit_status(state, view_data, internal_tx, "help hidden");
        }
        return false;
    }

    if matches!(state.mode, AppMode::Form(_)) {
        handle_form_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if active_modal(state, view_data) == ModalState::FilterModalOpen {
        handle_filter_modal_key(state, view_data, internal_tx, key);
        return false;
    }

    if state.mode == AppMode::Search {
        handle_search_key(state, view_data, internal_tx, key);
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Tab, _) | (KeyCode::Char('f'), KeyModifiers::NONE) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::NextScreen);
            return false;
        }
        (KeyCode::BackTab, _) | (KeyCode::Char('b'), KeyModifiers::NONE) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::PrevScreen);
            return false;
        }
        (KeyCode::Char('?'), _) => {
            view_data.help_visible = true;
            return false;
        }
        (KeyCode::Char('/'), _) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::EnterSearch);
            return false;
        }
        (KeyCode::Char('r'), KeyModifiers::NONE) => {
            if reload(state, runtime, view_data, internal_tx) {
                emit_status(state, view_data, internal_tx, "records reloaded");
            }
            return false;
        }
        (KeyCode::Char('p'), KeyModifiers::NONE) => {
            open_profile_form(state, view_data, internal_tx);
            return false;
        }
        (KeyCode::Char('X'), _) => {
            return sign_out(state, runtime, view_data, internal_tx);
        }
        _ => {}
    }

    match state.screen {
        ScreenKind::Settings => handle_settings_key(state, runtime, view_data, internal_tx, key),
        screen if screen.is_table() => handle_table_key(state, view_data, internal_tx, key),
        _ => {}
    }
    false
}

fn sign_out<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) -> bool {
    if let Err(error) = runtime.sign_out() {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("sign out failed: {error}"),
        );
        return false;
    }
    state.dispatch(AppCommand::SignOut);
    true
}

fn handle_search_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let input = match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Enter, _) => {
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::ExitToNav);
            return;
        }
        (KeyCode::Backspace, _) => ViewInput::PopSearch,
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            ViewInput::ClearSearch
        }
        (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            ViewInput::AppendSearch(ch)
        }
        _ => return,
    };
    if apply_view_input(view_data, state.screen, input) {
        view_data.table_state.selected_row = 0;
        clamp_table_cursor(state, view_data);
    }
}

fn handle_table_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    if key.code == KeyCode::Char('a') && key.modifiers == KeyModifiers::NONE {
        open_decision_form(state, view_data, internal_tx);
        return;
    }

    let Some(command) = table_command_for_key(key) else {
        return;
    };
    let event = apply_table_command(state, view_data, command);
    if let TableEvent::Status(status) = event {
        emit_status(state, view_data, internal_tx, status.message());
    }
}

fn table_command_for_key(key: KeyEvent) -> Option<TableCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(TableCommand::MoveRow(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(TableCommand::MoveRow(-1)),
        (KeyCode::Char('h'), _) | (KeyCode::Left, _) => Some(TableCommand::MoveColumn(-1)),
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) => Some(TableCommand::MoveColumn(1)),
        (KeyCode::Char('d'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TableCommand::MoveRow(HALF_PAGE_ROWS))
        }
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TableCommand::MoveRow(-HALF_PAGE_ROWS))
        }
        (KeyCode::PageDown, _) => Some(TableCommand::MoveRow(HALF_PAGE_ROWS)),
        (KeyCode::PageUp, _) => Some(TableCommand::MoveRow(-HALF_PAGE_ROWS)),
        (KeyCode::Char('g'), _) => Some(TableCommand::JumpFirstRow),
        (KeyCode::Char('G'), _) => Some(TableCommand::JumpLastRow),
        (KeyCode::Char('s'), KeyModifiers::NONE) => Some(TableCommand::ToggleSort),
        (KeyCode::Char('S'), _) => Some(TableCommand::ResetSort),
        (KeyCode::Char('m'), KeyModifiers::NONE) => Some(TableCommand::OpenFilters),
        (KeyCode::Char('c'), KeyModifiers::NONE) => Some(TableCommand::ClearFilters),
        _ => None,
    }
}

fn apply_table_command(
    state: &AppState,
    view_data: &mut ViewData,
    command: TableCommand,
) -> TableEvent {
    match command {
        TableCommand::MoveRow(delta) => {
            move_row(state, view_data, delta);
            TableEvent::CursorUpdated
        }
        TableCommand::MoveColumn(delta) => {
            move_col(state, view_data, delta);
            TableEvent::CursorUpdated
        }
        TableCommand::JumpFirstRow => {
            view_data.table_state.selected_row = 0;
            TableEvent::CursorUpdated
        }
        TableCommand::JumpLastRow => {
            let rows = active_projection(state, view_data).map_or(0, |p| p.row_count());
            view_data.table_state.selected_row = rows.saturating_sub(1);
            TableEvent::CursorUpdated
        }
        TableCommand::ToggleSort => {
            let column = view_data.table_state.selected_col;
            if !apply_view_input(view_data, state.screen, ViewInput::ToggleSortColumn(column)) {
                return TableEvent::Status(TableStatus::SortUnavailable);
            }
            clamp_table_cursor(state, view_data);
            let Some(projection) = active_projection(state, view_data) else {
                return TableEvent::Status(TableStatus::SortUnavailable);
            };
            let Some(label) = projection.columns.get(column).copied() else {
                return TableEvent::Status(TableStatus::SortUnavailable);
            };
            TableEvent::Status(match projection.sort_direction {
                SortDirection::Asc => TableStatus::SortAsc(label),
                SortDirection::Desc => TableStatus::SortDesc(label),
            })
        }
        TableCommand::ResetSort => {
            apply_view_input(view_data, state.screen, ViewInput::ResetSort);
            clamp_table_cursor(state, view_data);
            TableEvent::Status(TableStatus::SortReset)
        }
        TableCommand::OpenFilters => {
            apply_view_input(view_data, state.screen, ViewInput::OpenFilterModal);
            let entries = active_filter_entries(state, view_data);
            view_data.filter_modal = FilterModalUiState {
                dimension: 0,
                option: entries.first().map_or(0, |entry| entry.selected),
            };
            TableEvent::Status(TableStatus::FiltersOpen)
        }
        TableCommand::ClearFilters => {
            apply_view_input(view_data, state.screen, ViewInput::ClearFilters);
            view_data.table_state.selected_row = 0;
            clamp_table_cursor(state, view_data);
            TableEvent::Status(TableStatus::FiltersCleared)
        }
    }
}

fn move_row(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let Some(projection) = active_projection(state, view_data) else {
        return;
    };
    let row_count = projection.row_count();
    if row_count == 0 {
        view_data.table_state.selected_row = 0;
        return;
    }

    let current = view_data.table_state.selected_row;
    let next = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    };
    view_data.table_state.selected_row = next.min(row_count.saturating_sub(1));
}

fn move_col(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let Some(projection) = active_projection(state, view_data) else {
        return;
    };
    let column_count = projection.column_count();
    if column_count == 0 {
        view_data.table_state.selected_col = 0;
        return;
    }

    let current = view_data.table_state.selected_col;
    let next = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    };
    view_data.table_state.selected_col = next.min(column_count.saturating_sub(1));
}

fn clamp_table_cursor(state: &AppState, view_data: &mut ViewData) {
    if view_data.table_state.screen != Some(state.screen) {
        view_data.table_state = TableUiState {
            screen: Some(state.screen),
            ..TableUiState::default()
        };
    }
    let Some(projection) = active_projection(state, view_data) else {
        return;
    };
    view_data.table_state.selected_row = view_data
        .table_state
        .selected_row
        .min(projection.row_count().saturating_sub(1));
    view_data.table_state.selected_col = view_data
        .table_state
        .selected_col
        .min(projection.column_count().saturating_sub(1));
}

fn handle_filter_modal_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let entries = active_filter_entries(state, view_data);
    let dimension = view_data.filter_modal.dimension;
    let option_count = entries
        .get(dimension)
        .map_or(0, |entry| entry.choices.options.len());

    match key.code {
        KeyCode::Esc => {
            apply_view_input(view_data, state.screen, ViewInput::CloseFilterModal);
            emit_status(state, view_data, internal_tx, "filters closed");
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_data.filter_modal.option = view_data
                .filter_modal
                .option
                .saturating_add(1)
                .min(option_count.saturating_sub(1));
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_data.filter_modal.option = view_data.filter_modal.option.saturating_sub(1);
        }
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
            move_filter_dimension(view_data, &entries, 1);
        }
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
            move_filter_dimension(view_data, &entries, -1);
        }
        KeyCode::Char(' ') => {
            if let Some(status) = select_highlighted_filter(state, view_data, &entries) {
                emit_status(state, view_data, internal_tx, status);
            }
        }
        KeyCode::Enter => {
            select_highlighted_filter(state, view_data, &entries);
            apply_view_input(view_data, state.screen, ViewInput::ApplyFilterModal);
            emit_status(state, view_data, internal_tx, "filters applied");
        }
        KeyCode::Char('c') => {
            apply_view_input(view_data, state.screen, ViewInput::ClearFilters);
            view_data.filter_modal.option = 0;
            emit_status(state, view_data, internal_tx, "filters cleared");
        }
        _ => {}
    }
    clamp_table_cursor(state, view_data);
}

fn move_filter_dimension(view_data: &mut ViewData, entries: &[FilterModalEntry], delta: isize) {
    if entries.is_empty() {
        return;
    }
    let len = entries.len() as isize;
    let next = (view_data.filter_modal.dimension as isize + delta).rem_euclid(len) as usize;
    view_data.filter_modal = FilterModalUiState {
        dimension: next,
        option: entries[next].selected,
    };
}

fn select_highlighted_filter(
    state: &AppState,
    view_data: &mut ViewData,
    entries: &[FilterModalEntry],
) -> Option<String> {
    let entry = entries.get(view_data.filter_modal.dimension)?;
    let option = view_data.filter_modal.option;
    let label = entry.choices.options.get(option)?;
    let input = ViewInput::SelectFilter {
        dimension: entry.choices.name,
        selection: entry.choices.selection_at(option)?,
    };
    if apply_view_input(view_data, state.screen, input) {
        view_data.table_state.selected_row = 0;
    }
    Some(format!("{}: {label}", entry.choices.name))
}

fn handle_settings_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            view_data.settings_cursor = view_data
                .settings_cursor
                .saturating_add(1)
                .min(SettingKey::ALL.len().saturating_sub(1));
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_data.settings_cursor = view_data.settings_cursor.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            toggle_setting(state, runtime, view_data, internal_tx);
        }
        _ => {}
    }
}

fn toggle_setting<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(key) = SettingKey::ALL.get(view_data.settings_cursor).copied() else {
        return;
    };
    let saved = match key {
        SettingKey::UiTheme => {
            let next = view_data.theme().next();
            runtime
                .set_theme(next)
                .map(|()| format!("theme: {}", next.as_str()))
        }
        SettingKey::UiShowDashboard => {
            let next = !view_data.show_dashboard();
            runtime
                .set_show_dashboard_preference(next)
                .map(|()| format!("dashboard startup: {}", if next { "on" } else { "off" }))
        }
    };
    let message = match saved {
        Ok(message) => message,
        Err(error) => {
            emit_status(state, view_data, internal_tx, format!("save failed: {error}"));
            return;
        }
    };
    match runtime.load_settings() {
        Ok(settings) => {
            view_data.settings = settings;
            emit_status(state, view_data, internal_tx, message);
        }
        Err(error) => {
            emit_status(state, view_data, internal_tx, format!("load failed: {error}"));
        }
    }
}

fn open_profile_form(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(input) = view_data.actor.as_ref().map(|actor| ProfileFormInput {
        display_name: actor.display_name.clone(),
        phone: actor.phone.clone(),
    }) else {
        emit_status(state, view_data, internal_tx, "profile unavailable until records load");
        return;
    };
    view_data.form = Some(FormUiState::Profile {
        input,
        field_index: 0,
    });
    dispatch_and_sync(
        state,
        view_data,
        internal_tx,
        AppCommand::OpenForm(FormKind::Profile),
    );
}

fn open_decision_form(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(application) = selected_application(state, view_data) else {
        emit_status(state, view_data, internal_tx, "select an application first");
        return;
    };
    let Some(decision) = Decision::for_role(state.role).first().copied() else {
        return;
    };
    view_data.form = Some(FormUiState::Decision {
        application_no: application
            .application_no
            .clone()
            .unwrap_or_else(|| format!("#{}", application.id.get())),
        input: DecisionFormInput {
            application_id: application.id,
            current_status: application.status.clone().unwrap_or_default(),
            decision,
            remarks: String::new(),
        },
        field_index: 0,
    });
    dispatch_and_sync(
        state,
        view_data,
        internal_tx,
        AppCommand::OpenForm(FormKind::Decision),
    );
}

fn handle_form_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let role = state.role;
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            view_data.form = None;
            dispatch_and_sync(state, view_data, internal_tx, AppCommand::ExitToNav);
            emit_status(state, view_data, internal_tx, "form canceled");
        }
        (KeyCode::Enter, _) | (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
            submit_active_form(state, runtime, view_data, internal_tx);
        }
        (KeyCode::Tab, _) => {
            if let Some(form) = view_data.form.as_mut() {
                form.move_field(1);
            }
        }
        (KeyCode::BackTab, _) => {
            if let Some(form) = view_data.form.as_mut() {
                form.move_field(-1);
            }
        }
        (KeyCode::Left, _) => {
            if let Some(form) = view_data.form.as_mut() {
                form.cycle_decision(role, -1);
            }
        }
        (KeyCode::Right, _) => {
            if let Some(form) = view_data.form.as_mut() {
                form.cycle_decision(role, 1);
            }
        }
        (KeyCode::Backspace, _) => {
            if let Some(text) = view_data.form.as_mut().and_then(FormUiState::text_mut) {
                text.pop();
            }
        }
        (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            let Some(form) = view_data.form.as_mut() else {
                return;
            };
            if let Some(text) = form.text_mut() {
                text.push(ch);
            } else if let Some(digit) = ch.to_digit(10).filter(|digit| *digit > 0) {
                form.select_decision(role, digit as usize - 1);
            }
        }
        _ => {}
    }
}

fn submit_active_form<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(form) = view_data.form.clone() else {
        dispatch_and_sync(state, view_data, internal_tx, AppCommand::ExitToNav);
        return;
    };
    let payload = form.payload();
    let validated = match (&form, &payload) {
        (FormUiState::Decision { application_no, .. }, FormPayload::Decision(input)) => input
            .validate(state.role)
            .map(|next| format!("{application_no} {}", next.as_str())),
        _ => payload
            .validate(state.role)
            .map(|()| "profile saved".to_owned()),
    };
    let message = match validated {
        Ok(message) => message,
        Err(error) => {
            emit_status(state, view_data, internal_tx, format!("form invalid: {error}"));
            return;
        }
    };
    if let Err(error) = runtime.submit_form(&payload) {
        emit_status(state, view_data, internal_tx, format!("save failed: {error}"));
        return;
    }

    view_data.form = None;
    dispatch_and_sync(state, view_data, internal_tx, AppCommand::ExitToNav);
    if reload(state, runtime, view_data, internal_tx) {
        emit_status(state, view_data, internal_tx, message);
    }
}

fn dashboard_spec(role: Role) -> ScreenSpec<ApplicationField> {
    match role {
        Role::Hod => DEPARTMENT_APPLICATIONS,
        Role::FacultyAdmin => FACULTY_APPLICATIONS,
    }
}

fn application_screen(
    screen: ScreenKind,
    view_data: &ViewData,
) -> Option<(ScreenSpec<ApplicationField>, &ViewState<ApplicationField>)> {
    match screen {
        ScreenKind::DepartmentApplications => {
            Some((DEPARTMENT_APPLICATIONS, &view_data.department_view))
        }
        ScreenKind::FacultyApplications => Some((FACULTY_APPLICATIONS, &view_data.faculty_view)),
        _ => None,
    }
}

fn selected_application(state: &AppState, view_data: &ViewData) -> Option<ScholarApplication> {
    application_screen(state.screen, view_data)?;
    let projection = active_projection(state, view_data)?;
    let key = projection.rows.get(view_data.table_state.selected_row)?.key;
    view_data
        .applications
        .as_ready()?
        .iter()
        .find(|application| application.id.get() == key)
        .cloned()
}

fn active_projection(state: &AppState, view_data: &ViewData) -> Option<TableProjection> {
    if let Some((spec, view)) = application_screen(state.screen, view_data) {
        let scope = view_data.scope(spec.scope_level);
        return Some(table_projection(&spec, &view_data.applications, scope, view));
    }
    match state.screen {
        ScreenKind::Examinations => Some(table_projection(
            &EXAMINATIONS,
            &view_data.examinations,
            view_data.scope(EXAMINATIONS.scope_level),
            &view_data.examination_view,
        )),
        _ => None,
    }
}

fn table_projection<R: Record>(
    spec: &ScreenSpec<R::Field>,
    records: &RecordSet<R>,
    scope: &str,
    view: &ViewState<R::Field>,
) -> TableProjection {
    let projection = project(spec, records, scope, view);
    let rows = projection
        .rows()
        .iter()
        .map(|record| TableRow {
            key: record.key(),
            cells: spec
                .columns
                .iter()
                .map(|field| cell_text(record.value(*field)))
                .collect(),
        })
        .collect();
    let filters = spec
        .filters
        .iter()
        .filter_map(|dimension| {
            let selection = view.selection(dimension.name);
            (!selection.is_all())
                .then(|| format!("{}: {}", dimension.name, selection.label(dimension)))
        })
        .collect();

    TableProjection {
        title: spec.title,
        columns: spec.columns.iter().map(|field| field.label()).collect(),
        sort_column: spec
            .columns
            .iter()
            .position(|field| *field == view.sort.field),
        sort_direction: view.sort.direction,
        search_term: view.search_term.clone(),
        filters,
        rows,
        message: projection.message(),
    }
}

fn active_filter_entries(state: &AppState, view_data: &ViewData) -> Vec<FilterModalEntry> {
    if let Some((spec, view)) = application_screen(state.screen, view_data) {
        let scope = view_data.scope(spec.scope_level);
        return filter_modal_entries(&spec, &view_data.applications, scope, view);
    }
    match state.screen {
        ScreenKind::Examinations => filter_modal_entries(
            &EXAMINATIONS,
            &view_data.examinations,
            view_data.scope(EXAMINATIONS.scope_level),
            &view_data.examination_view,
        ),
        _ => Vec::new(),
    }
}

fn filter_modal_entries<R: Record>(
    spec: &ScreenSpec<R::Field>,
    records: &RecordSet<R>,
    scope: &str,
    view: &ViewState<R::Field>,
) -> Vec<FilterModalEntry> {
    filter_options(spec, records, scope)
        .into_iter()
        .map(|choices| {
            let selected = choices.position_of(view.selection(choices.name));
            FilterModalEntry { choices, selected }
        })
        .collect()
}

fn active_modal(state: &AppState, view_data: &ViewData) -> ModalState {
    match state.screen {
        ScreenKind::DepartmentApplications => view_data.department_view.modal,
        ScreenKind::FacultyApplications => view_data.faculty_view.modal,
        ScreenKind::Examinations => view_data.examination_view.modal,
        ScreenKind::Dashboard | ScreenKind::Settings => ModalState::Idle,
    }
}

/// Routes an input to the active screen's reducer. Returns whether the view
/// state changed.
fn apply_view_input(view_data: &mut ViewData, screen: ScreenKind, input: ViewInput) -> bool {
    match screen {
        ScreenKind::DepartmentApplications => {
            dispatch_view(&mut view_data.department_view, &DEPARTMENT_APPLICATIONS, input)
        }
        ScreenKind::FacultyApplications => {
            dispatch_view(&mut view_data.faculty_view, &FACULTY_APPLICATIONS, input)
        }
        ScreenKind::Examinations => {
            dispatch_view(&mut view_data.examination_view, &EXAMINATIONS, input)
        }
        ScreenKind::Dashboard | ScreenKind::Settings => false,
    }
}

fn dispatch_view<F: RecordField>(
    view: &mut ViewState<F>,
    spec: &ScreenSpec<F>,
    input: ViewInput,
) -> bool {
    let action = match input {
        ViewInput::AppendSearch(ch) => ViewAction::AppendSearch(ch),
        ViewInput::PopSearch => ViewAction::PopSearch,
        ViewInput::ClearSearch => ViewAction::SetSearch(String::new()),
        ViewInput::SelectFilter {
            dimension,
            selection,
        } => ViewAction::SelectFilter {
            dimension,
            selection,
        },
        ViewInput::ToggleSortColumn(column) => match spec.columns.get(column) {
            Some(field) => ViewAction::ToggleSort(*field),
            None => return false,
        },
        ViewInput::ResetSort => ViewAction::SetSort(spec.default_sort),
        ViewInput::OpenFilterModal => ViewAction::OpenFilterModal,
        ViewInput::ApplyFilterModal => ViewAction::ApplyFilterModal,
        ViewInput::CloseFilterModal => ViewAction::CloseFilterModal,
        ViewInput::ClearFilters => ViewAction::ClearFilters,
    };
    !view.dispatch(action).is_empty()
}

fn cell_text(value: Option<FieldValue<'_>>) -> String {
    match value {
        None => String::new(),
        Some(FieldValue::Timestamp(at)) => at
            .format(&format_description!("[year]-[month]-[day]"))
            .unwrap_or_else(|_| at.to_string()),
        Some(FieldValue::Decimal(score)) => format!("{score:.1}"),
        Some(other) => other.stringify(),
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let palette = Palette::for_theme(view_data.theme());
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let screens = ScreenKind::for_role(state.role);
    let selected = screens
        .iter()
        .position(|screen| *screen == state.screen)
        .unwrap_or(0);
    let titles = screens
        .iter()
        .map(|screen| screen.label().to_owned())
        .collect::<Vec<String>>();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(header_title(state, view_data))
                .borders(Borders::ALL),
        )
        .style(Style::default().fg(palette.text))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    match state.screen {
        ScreenKind::Dashboard => {
            let body = Paragraph::new(render_dashboard_text(state, view_data))
                .block(Block::default().borders(Borders::ALL).title("dashboard"));
            frame.render_widget(body, layout[1]);
        }
        ScreenKind::Settings => {
            let body = Paragraph::new(render_settings_text(state, view_data))
                .block(Block::default().borders(Borders::ALL).title("settings"));
            frame.render_widget(body, layout[1]);
        }
        _ => render_table(frame, layout[1], state, view_data, palette),
    }

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(palette.status))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if active_modal(state, view_data) == ModalState::FilterModalOpen {
        let area = centered_rect(56, 60, frame.area());
        frame.render_widget(Clear, area);
        let modal = Paragraph::new(render_filter_modal_text(state, view_data)).block(
            Block::default()
                .title("filters")
                .borders(Borders::ALL)
                .style(Style::default().fg(palette.accent)),
        );
        frame.render_widget(modal, area);
    }

    if let Some(form) = &view_data.form {
        let area = centered_rect(64, 40, frame.area());
        frame.render_widget(Clear, area);
        let title = match form.kind() {
            FormKind::Profile => "profile",
            FormKind::Decision => "decision",
        };
        let body = Paragraph::new(render_form_text(state, form))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(body, area);
    }

    if view_data.help_visible {
        let area = centered_rect(80, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn header_title(state: &AppState, view_data: &ViewData) -> String {
    match &view_data.actor {
        Some(actor) => format!(
            "scholardesk | {} ({})",
            actor.display_name,
            state.role.label()
        ),
        None => "scholardesk".to_owned(),
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
    palette: Palette,
) {
    let Some(projection) = active_projection(state, view_data) else {
        return;
    };
    let block = Block::default()
        .title(table_title(&projection))
        .borders(Borders::ALL);

    if let Some(message) = &projection.message {
        let placeholder = Paragraph::new(message.clone()).block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let widths = vec![Constraint::Min(8); projection.column_count().max(1)];
    let header_cells = (0..projection.column_count()).map(|index| {
        Cell::from(header_label(&projection, index)).style(
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells);

    let rows = projection.rows.iter().enumerate().map(|(row_index, row)| {
        let selected_row = row_index == view_data.table_state.selected_row;
        let cells = row
            .cells
            .iter()
            .enumerate()
            .map(|(column_index, text)| {
                let mut style = Style::default();
                if selected_row {
                    style = style.bg(palette.selected_bg);
                }
                if selected_row && column_index == view_data.table_state.selected_col {
                    style = Style::default()
                        .fg(Color::Black)
                        .bg(palette.accent)
                        .add_modifier(Modifier::BOLD);
                }
                Cell::from(text.clone()).style(style)
            })
            .collect::<Vec<_>>();
        Row::new(cells)
    });

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}

fn header_label(projection: &TableProjection, column: usize) -> String {
    let mut label = projection.columns[column].to_owned();
    if projection.sort_column == Some(column) {
        label.push(' ');
        label.push_str(match projection.sort_direction {
            SortDirection::Asc => SORT_MARK_ASC,
            SortDirection::Desc => SORT_MARK_DESC,
        });
    }
    label
}

fn table_title(projection: &TableProjection) -> String {
    let mut title = format!("{} ({})", projection.title, projection.row_count());
    if !projection.search_term.is_empty() {
        title.push_str(&format!(" | search: {}", projection.search_term));
    }
    if !projection.filters.is_empty() {
        title.push_str(&format!(
            " | {FILTER_MARK_ACTIVE} {}",
            projection.filters.join(", ")
        ));
    }
    title
}

fn render_dashboard_text(state: &AppState, view_data: &ViewData) -> String {
    let Some(actor) = &view_data.actor else {
        return LOADING_TEXT.to_owned();
    };
    let spec = dashboard_spec(state.role);
    let scope = actor.scope_value(spec.scope_level);
    let mut lines = vec![format!(
        "signed in: {} <{}> ({})",
        actor.display_name,
        actor.email,
        state.role.label()
    )];
    if scope.trim().is_empty() {
        lines.push(format!(
            "no {} assigned to this account -- ask an administrator to set one",
            spec.scope_level.label()
        ));
        return lines.join("\n");
    }
    lines.push(format!("{}: {scope}", spec.scope_level.label()));
    lines.push(String::new());

    let Some(summary) = summarize(&spec, &view_data.applications, scope) else {
        lines.push(LOADING_TEXT.to_owned());
        return lines.join("\n");
    };
    lines.push(format!("applications: {}", tally_line(&summary.overall)));

    if state.role == Role::FacultyAdmin && !summary.departments.is_empty() {
        lines.push(String::new());
        lines.push("by department:".to_owned());
        for entry in &summary.departments {
            lines.push(format!("  {}: {}", entry.department, tally_line(&entry.tally)));
        }
    }

    lines.push(String::new());
    lines.push("recent:".to_owned());
    if summary.recent.is_empty() {
        lines.push(format!("  no records found for {scope}"));
    }
    for application in &summary.recent {
        let cells = [
            ApplicationField::ApplicationNo,
            ApplicationField::ScholarName,
            ApplicationField::Status,
            ApplicationField::SubmittedAt,
        ]
        .map(|field| cell_text(application.value(field)));
        lines.push(format!("  {}", cells.join("  ")));
    }
    lines.join("\n")
}

fn tally_line(tally: &StatusTally) -> String {
    format!(
        "{} total | {} pending | {} forwarded | {} approved | {} rejected | {} other",
        tally.total, tally.pending, tally.forwarded, tally.approved, tally.rejected, tally.other
    )
}

fn render_settings_text(state: &AppState, view_data: &ViewData) -> String {
    let mut lines = Vec::new();
    match &view_data.actor {
        Some(actor) => {
            let or_unset = |value: Option<&str>| value.unwrap_or("(unassigned)").to_owned();
            lines.push("profile".to_owned());
            lines.push(format!("  name: {}", actor.display_name));
            lines.push(format!("  email: {}", actor.email));
            lines.push(format!(
                "  phone: {}",
                if actor.phone.is_empty() {
                    "-"
                } else {
                    &actor.phone
                }
            ));
            lines.push(format!("  role: {}", state.role.label()));
            lines.push(format!("  faculty: {}", or_unset(actor.faculty.as_deref())));
            lines.push(format!(
                "  department: {}",
                or_unset(actor.department.as_deref())
            ));
        }
        None => lines.push(LOADING_TEXT.to_owned()),
    }

    lines.push(String::new());
    lines.push("settings".to_owned());
    for (index, key) in SettingKey::ALL.iter().enumerate() {
        let marker = if index == view_data.settings_cursor {
            ">"
        } else {
            " "
        };
        let value = view_data
            .setting(*key)
            .map_or_else(|| "-".to_owned(), SettingValue::display);
        lines.push(format!("{marker} {}: {value}", key.label()));
    }
    lines.push(String::new());
    lines.push("j/k move | enter toggle | p edit profile | X sign out".to_owned());
    lines.join("\n")
}

fn render_filter_modal_text(state: &AppState, view_data: &ViewData) -> String {
    let entries = active_filter_entries(state, view_data);
    if entries.is_empty() {
        return LOADING_TEXT.to_owned();
    }
    let mut lines = Vec::new();
    for (dimension_index, entry) in entries.iter().enumerate() {
        let active_dimension = dimension_index == view_data.filter_modal.dimension;
        lines.push(entry.choices.name.to_owned());
        for (option_index, option) in entry.choices.options.iter().enumerate() {
            let cursor = if active_dimension && option_index == view_data.filter_modal.option {
                ">"
            } else {
                " "
            };
            let chosen = if option_index == entry.selected {
                " *"
            } else {
                ""
            };
            lines.push(format!("{cursor} {option}{chosen}"));
        }
    }
    lines.push(String::new());
    lines.push(
        "j/k option | tab dimension | space select | enter apply | c clear | esc close".to_owned(),
    );
    lines.join("\n")
}

fn render_form_text(state: &AppState, form: &FormUiState) -> String {
    let labels = form.field_labels();
    let cursor = |index: usize| if index == form.field_index() { ">" } else { " " };
    let mut lines = Vec::new();
    match form {
        FormUiState::Profile { input, .. } => {
            lines.push("edit profile".to_owned());
            lines.push(format!("{} {}: {}", cursor(0), labels[0], input.display_name));
            lines.push(format!("{} {}: {}", cursor(1), labels[1], input.phone));
        }
        FormUiState::Decision {
            application_no,
            input,
            ..
        } => {
            let status = if input.current_status.is_empty() {
                "no status"
            } else {
                &input.current_status
            };
            lines.push(format!("decide {application_no} (currently {status})"));
            let choices = Decision::for_role(state.role)
                .iter()
                .enumerate()
                .map(|(index, decision)| {
                    let label = format!("{}:{}", index + 1, decision.label());
                    if *decision == input.decision {
                        format!("[{label}]")
                    } else {
                        label
                    }
                })
                .collect::<Vec<_>>();
            lines.push(format!("{} {}: {}", cursor(0), labels[0], choices.join(" ")));
            lines.push(format!("{} {}: {}", cursor(1), labels[1], input.remarks));
        }
    }
    lines.push(String::new());
    lines.push("tab/shift+tab field | enter or ctrl+s save | esc cancel".to_owned());
    lines.join("\n")
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }
    let (mode, hints) = match state.mode {
        AppMode::Nav => ("NAV", nav_hints(state.screen)),
        AppMode::Search => (
            "SEARCH",
            "type to search | backspace delete | ctrl+u clear | enter/esc done",
        ),
        AppMode::Form(_) => ("FORM", "tab field | enter save | esc cancel"),
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn nav_hints(screen: ScreenKind) -> &'static str {
    match screen {
        ScreenKind::Dashboard => "f/b screens | r reload | p profile | ? help | ctrl+q quit",
        ScreenKind::Settings => "f/b screens | j/k move | enter toggle | p profile | X sign out",
        ScreenKind::DepartmentApplications | ScreenKind::FacultyApplications => {
            "j/k/h/l g/G | / search | s/S sort | m filters | c clear | a decide | ? help"
        }
        ScreenKind::Examinations => {
            "j/k/h/l g/G | / search | s/S sort | m filters | c clear | ? help"
        }
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help | r reload | p profile | X sign out\n\
nav: tab/f next screen | shift+tab/b previous screen\n\
table: j/k/h/l move | g/G first/last | ctrl+d/u pgup/pgdn | / search\n\
table: s sort column (again to flip) | S default sort | m filters | c clear search and filters\n\
applications: a decide on selected application\n\
search: type to filter | backspace delete | ctrl+u clear | enter/esc back to nav\n\
filters: j/k option | tab/h/l dimension | space select | enter apply | c clear | esc close\n\
form: tab/shift+tab field | 1-9 or left/right choose | enter or ctrl+s save | esc cancel\n\
settings: j/k move | enter toggle"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
