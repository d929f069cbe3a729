// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{AppMode, FormKind, Role, ScreenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub role: Role,
    pub mode: AppMode,
    pub screen: ScreenKind,
    pub status_line: Option<String>,
    pub signed_out: bool,
}

impl AppState {
    pub fn new(role: Role, start: ScreenKind) -> Self {
        let screens = ScreenKind::for_role(role);
        let screen = if screens.contains(&start) {
            start
        } else {
            screens[0]
        };
        Self {
            role,
            mode: AppMode::Nav,
            screen,
            status_line: None,
            signed_out: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextScreen,
    PrevScreen,
    GoToScreen(ScreenKind),
    EnterSearch,
    ExitToNav,
    OpenForm(FormKind),
    SetStatus(String),
    ClearStatus,
    SignOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    ScreenChanged(ScreenKind),
    StatusUpdated(String),
    StatusCleared,
    SignedOut,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        if self.signed_out {
            return Vec::new();
        }
        match command {
            AppCommand::NextScreen => self.rotate_screen(1),
            AppCommand::PrevScreen => self.rotate_screen(-1),
            AppCommand::GoToScreen(screen) => {
                if !ScreenKind::for_role(self.role).contains(&screen) {
                    let message = format!(
                        "{} is not available to {}",
                        screen.label(),
                        self.role.label()
                    );
                    return vec![self.set_status(&message)];
                }
                self.screen = screen;
                self.mode = AppMode::Nav;
                vec![AppEvent::ScreenChanged(screen)]
            }
            AppCommand::EnterSearch => {
                if !self.screen.is_table() {
                    return vec![self.set_status("search is only available on table screens")];
                }
                self.mode = AppMode::Search;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitToNav => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::OpenForm(kind) => {
                self.mode = AppMode::Form(kind);
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
            AppCommand::SignOut => {
                self.signed_out = true;
                self.mode = AppMode::Nav;
                vec![AppEvent::SignedOut]
            }
        }
    }

    fn rotate_screen(&mut self, delta: isize) -> Vec<AppEvent> {
        let screens = ScreenKind::for_role(self.role);
        let current = screens
            .iter()
            .position(|screen| *screen == self.screen)
            .unwrap_or(0) as isize;
        let len = screens.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.screen = screens[next];
        self.mode = AppMode::Nav;
        vec![AppEvent::ScreenChanged(self.screen)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
