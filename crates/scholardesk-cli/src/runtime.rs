// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use scholardesk_app::{
    Actor, ActorId, AppSetting, ExaminationRecord, FormPayload, ScholarApplication, SessionId,
    Theme,
};
use scholardesk_db::Store;
use tracing::info;

/// Binds the UI to the store for one signed-in session.
pub struct DbRuntime<'a> {
    store: &'a Store,
    actor_id: ActorId,
    session_id: SessionId,
}

impl<'a> DbRuntime<'a> {
    pub fn new(store: &'a Store, actor_id: ActorId, session_id: SessionId) -> Self {
        Self {
            store,
            actor_id,
            session_id,
        }
    }
}

impl scholardesk_tui::AppRuntime for DbRuntime<'_> {
    fn load_actor(&mut self) -> Result<Actor> {
        self.store.get_actor(self.actor_id)
    }

    fn load_applications(&mut self) -> Result<Vec<ScholarApplication>> {
        self.store.list_applications()
    }

    fn load_examinations(&mut self) -> Result<Vec<ExaminationRecord>> {
        self.store.list_examinations()
    }

    fn load_settings(&mut self) -> Result<Vec<AppSetting>> {
        self.store.list_settings()
    }

    fn submit_form(&mut self, payload: &FormPayload) -> Result<()> {
        // role is read from the store on every submit
        let role = self.store.get_actor(self.actor_id)?.role;
        payload.validate(role)?;

        match payload {
            FormPayload::Profile(profile) => {
                self.store.update_actor_profile(self.actor_id, profile)?;
            }
            FormPayload::Decision(decision) => {
                let status = self.store.decide_application(role, decision)?;
                info!(
                    actor = self.actor_id.get(),
                    application = decision.application_id.get(),
                    status = status.as_str(),
                    "decision submitted"
                );
            }
        }
        Ok(())
    }

    fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.store.put_theme(theme)?;
        info!(theme = theme.as_str(), "theme changed");
        Ok(())
    }

    fn set_show_dashboard_preference(&mut self, show: bool) -> Result<()> {
        self.store.put_show_dashboard(show)
    }

    fn sign_out(&mut self) -> Result<()> {
        self.store.sign_out(self.session_id)
    }
}
