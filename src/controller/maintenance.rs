use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::api::AdminApi;
use crate::error::AdminError;
use crate::model::MaintenanceStatus;

pub const TOGGLE_FAILED_NOTICE: &str = "Failed to update maintenance mode.";

/// Where the toggle is in its confirm-then-submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TogglePhase {
    #[default]
    Idle,
    PendingConfirmation {
        staged: bool,
    },
    Submitting {
        staged: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceModel {
    pub enabled: bool,
    pub version: String,
    pub initial_loading: bool,
    pub phase: TogglePhase,
    /// Blocking notice for the user after a failed toggle.
    pub notice: Option<String>,
}

impl Default for MaintenanceModel {
    fn default() -> Self {
        Self {
            enabled: false,
            version: String::new(),
            initial_loading: true,
            phase: TogglePhase::Idle,
            notice: None,
        }
    }
}

impl MaintenanceModel {
    /// The toggle control is unusable while a submit or the first load is outstanding.
    #[must_use]
    pub fn control_disabled(&self) -> bool {
        self.initial_loading || matches!(self.phase, TogglePhase::Submitting { .. })
    }

    #[must_use]
    pub fn staged(&self) -> Option<bool> {
        match self.phase {
            TogglePhase::PendingConfirmation { staged } | TogglePhase::Submitting { staged } => {
                Some(staged)
            }
            TogglePhase::Idle => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    InitialLoad,
    Refresh,
    RequestToggle(bool),
    CancelToggle,
    ConfirmToggle,
    DismissNotice,
    StatusLoaded(MaintenanceStatus),
    StatusFailed(AdminError),
    StatusCancelled,
    ToggleSent,
    ToggleFailed(AdminError),
    /// Answer to the re-read that follows a submit.
    Reconciled(MaintenanceStatus),
    ReconcileFailed(AdminError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Status read that teardown may cancel.
    LoadStatus,
    /// Status read that always runs to completion.
    RefreshStatus,
    /// Re-read after a submit; only its answer ends `Submitting`.
    ReconcileStatus,
    SendToggle(bool),
}

pub fn update(model: &mut MaintenanceModel, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::InitialLoad => {
            model.initial_loading = true;
            vec![Effect::LoadStatus]
        }
        Msg::Refresh => vec![Effect::RefreshStatus],
        Msg::RequestToggle(new_state) => {
            if !model.control_disabled() {
                model.phase = TogglePhase::PendingConfirmation { staged: new_state };
            }
            vec![]
        }
        Msg::CancelToggle => {
            if let TogglePhase::PendingConfirmation { .. } = model.phase {
                model.phase = TogglePhase::Idle;
            }
            vec![]
        }
        Msg::ConfirmToggle => match model.phase {
            TogglePhase::PendingConfirmation { staged } => {
                model.phase = TogglePhase::Submitting { staged };
                model.notice = None;
                vec![Effect::SendToggle(staged)]
            }
            _ => vec![],
        },
        Msg::DismissNotice => {
            model.notice = None;
            vec![]
        }
        Msg::StatusLoaded(status) => {
            apply_status(model, Some(status));
            vec![]
        }
        Msg::StatusFailed(_) => {
            apply_status(model, None);
            vec![]
        }
        Msg::StatusCancelled => vec![],
        Msg::ToggleSent => vec![Effect::ReconcileStatus],
        Msg::ToggleFailed(_) => {
            model.notice = Some(TOGGLE_FAILED_NOTICE.to_string());
            vec![Effect::ReconcileStatus]
        }
        Msg::Reconciled(status) => {
            apply_status(model, Some(status));
            end_submit(model);
            vec![]
        }
        Msg::ReconcileFailed(_) => {
            apply_status(model, None);
            model.notice = Some(TOGGLE_FAILED_NOTICE.to_string());
            end_submit(model);
            vec![]
        }
    }
}

/// A failed read shows "off" and keeps the last known version.
fn apply_status(model: &mut MaintenanceModel, status: Option<MaintenanceStatus>) {
    model.initial_loading = false;
    match status {
        Some(status) => {
            model.enabled = status.enabled;
            model.version = status.version;
        }
        None => model.enabled = false,
    }
}

fn end_submit(model: &mut MaintenanceModel) {
    if let TogglePhase::Submitting { .. } = model.phase {
        model.phase = TogglePhase::Idle;
    }
}

pub async fn run_effect(effect: Effect, api: &dyn AdminApi, teardown: &CancellationToken) -> Msg {
    match effect {
        Effect::LoadStatus => {
            tokio::select! {
                biased;
                () = teardown.cancelled() => Msg::StatusCancelled,
                res = api.fetch_status() => status_msg(res),
            }
        }
        Effect::RefreshStatus => status_msg(api.fetch_status().await),
        Effect::ReconcileStatus => match api.fetch_status().await {
            Ok(status) => Msg::Reconciled(status),
            Err(e) => Msg::ReconcileFailed(e),
        },
        Effect::SendToggle(enabled) => match api.set_maintenance(enabled).await {
            Ok(()) => Msg::ToggleSent,
            Err(e) => Msg::ToggleFailed(e),
        },
    }
}

fn status_msg(res: Result<MaintenanceStatus, AdminError>) -> Msg {
    match res {
        Ok(status) => Msg::StatusLoaded(status),
        Err(e) if e.is_cancelled() => Msg::StatusCancelled,
        Err(e) => Msg::StatusFailed(e),
    }
}

/// Owns the maintenance panel state and drives the update loop against the API.
pub struct MaintenanceController {
    api: Arc<dyn AdminApi>,
    model: RwLock<MaintenanceModel>,
    teardown: CancellationToken,
}

impl MaintenanceController {
    #[must_use]
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            model: RwLock::new(MaintenanceModel::default()),
            teardown: CancellationToken::new(),
        }
    }

    pub async fn snapshot(&self) -> MaintenanceModel {
        self.model.read().await.clone()
    }

    /// Seeds the loop with `msg` and drains effects. The model lock is never held
    /// across an api call. The first failure carried by a message is returned.
    async fn dispatch(&self, msg: Msg) -> Result<(), AdminError> {
        let effects = update(&mut *self.model.write().await, msg);
        self.drain(effects).await
    }

    async fn drain(&self, mut effects: Vec<Effect>) -> Result<(), AdminError> {
        let mut failure = None;
        while let Some(effect) = effects.pop() {
            tracing::debug!("{}", json!({"mvu": "effect_start", "effect": format!("{effect:?}")}));
            let msg = run_effect(effect, self.api.as_ref(), &self.teardown).await;
            tracing::debug!("{}", json!({"mvu": "effect_done", "msg": format!("{msg:?}")}));
            match &msg {
                Msg::StatusFailed(e) | Msg::ReconcileFailed(e) => {
                    tracing::warn!(error = %e, "failed to fetch maintenance status");
                    failure.get_or_insert_with(|| e.clone());
                }
                Msg::ToggleFailed(e) => {
                    tracing::error!(error = %e, "failed to update maintenance mode");
                    failure.get_or_insert_with(|| e.clone());
                }
                _ => {}
            }
            let next = update(&mut *self.model.write().await, msg);
            effects.extend(next);
        }
        failure.map_or(Ok(()), Err)
    }

    /// First status read for the panel. Teardown cancels it without surfacing an error.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the status read fails; the panel then shows "off".
    pub async fn load_initial(&self) -> Result<(), AdminError> {
        self.dispatch(Msg::InitialLoad).await
    }

    /// Re-reads status from the server.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the status read fails; the panel then shows "off".
    pub async fn fetch_status(&self) -> Result<MaintenanceStatus, AdminError> {
        self.dispatch(Msg::Refresh).await?;
        let model = self.model.read().await;
        Ok(MaintenanceStatus {
            enabled: model.enabled,
            version: model.version.clone(),
        })
    }

    /// Stages `new_state` for confirmation. Nothing is sent yet.
    ///
    /// # Errors
    ///
    /// Will return `AdminError::Busy` while the control is disabled.
    pub async fn request_toggle(&self, new_state: bool) -> Result<(), AdminError> {
        let mut model = self.model.write().await;
        if model.control_disabled() {
            return Err(AdminError::Busy);
        }
        update(&mut model, Msg::RequestToggle(new_state));
        Ok(())
    }

    /// Stages the opposite of the displayed state and returns it.
    ///
    /// # Errors
    ///
    /// Will return `AdminError::Busy` while the control is disabled.
    pub async fn request_flip(&self) -> Result<bool, AdminError> {
        let mut model = self.model.write().await;
        if model.control_disabled() {
            return Err(AdminError::Busy);
        }
        let new_state = !model.enabled;
        update(&mut model, Msg::RequestToggle(new_state));
        Ok(new_state)
    }

    pub async fn cancel_toggle(&self) {
        update(&mut *self.model.write().await, Msg::CancelToggle);
    }

    pub async fn dismiss_notice(&self) {
        update(&mut *self.model.write().await, Msg::DismissNotice);
    }

    /// Sends the staged value, then re-reads status whatever the outcome.
    ///
    /// # Errors
    ///
    /// Will return `AdminError::NotPending` if nothing is staged, or the first
    /// failure of the update or the re-read.
    pub async fn confirm_toggle(&self) -> Result<(), AdminError> {
        let effects = update(&mut *self.model.write().await, Msg::ConfirmToggle);
        if !effects.iter().any(|e| matches!(e, Effect::SendToggle(_))) {
            return Err(AdminError::NotPending);
        }
        self.drain(effects).await
    }

    /// Cancels the initial load if it is still in flight.
    pub fn shutdown(&self) {
        self.teardown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> MaintenanceModel {
        MaintenanceModel {
            initial_loading: false,
            ..MaintenanceModel::default()
        }
    }

    #[test]
    fn request_then_cancel_returns_to_idle() {
        let mut m = loaded();
        assert!(update(&mut m, Msg::RequestToggle(true)).is_empty());
        assert_eq!(m.phase, TogglePhase::PendingConfirmation { staged: true });
        update(&mut m, Msg::CancelToggle);
        assert_eq!(m.phase, TogglePhase::Idle);
    }

    #[test]
    fn request_is_ignored_while_loading() {
        let mut m = MaintenanceModel::default();
        update(&mut m, Msg::RequestToggle(true));
        assert_eq!(m.phase, TogglePhase::Idle);
    }

    #[test]
    fn confirm_submits_then_reconciles() {
        let mut m = loaded();
        update(&mut m, Msg::RequestToggle(true));
        assert_eq!(update(&mut m, Msg::ConfirmToggle), vec![Effect::SendToggle(true)]);
        assert!(m.control_disabled());
        assert_eq!(update(&mut m, Msg::ToggleSent), vec![Effect::ReconcileStatus]);
        assert_eq!(m.phase, TogglePhase::Submitting { staged: true });
        update(
            &mut m,
            Msg::Reconciled(MaintenanceStatus {
                enabled: true,
                version: "1.2.0".into(),
            }),
        );
        assert_eq!(m.phase, TogglePhase::Idle);
        assert!(m.enabled);
        assert_eq!(m.version, "1.2.0");
        assert!(m.notice.is_none());
    }

    #[test]
    fn failed_toggle_keeps_server_truth() {
        let mut m = loaded();
        update(&mut m, Msg::RequestToggle(true));
        update(&mut m, Msg::ConfirmToggle);
        let next = update(&mut m, Msg::ToggleFailed(AdminError::Network("down".into())));
        assert_eq!(next, vec![Effect::ReconcileStatus]);
        assert_eq!(m.notice.as_deref(), Some(TOGGLE_FAILED_NOTICE));
        update(&mut m, Msg::ReconcileFailed(AdminError::Network("down".into())));
        assert!(!m.enabled);
        assert_eq!(m.phase, TogglePhase::Idle);
    }

    #[test]
    fn plain_status_answers_leave_a_submit_running() {
        let mut m = loaded();
        update(&mut m, Msg::RequestToggle(true));
        update(&mut m, Msg::ConfirmToggle);
        update(
            &mut m,
            Msg::StatusLoaded(MaintenanceStatus {
                enabled: false,
                version: "1".into(),
            }),
        );
        assert_eq!(m.phase, TogglePhase::Submitting { staged: true });
        assert!(m.control_disabled());
        update(&mut m, Msg::StatusFailed(AdminError::Network("down".into())));
        assert_eq!(m.phase, TogglePhase::Submitting { staged: true });
        assert!(m.notice.is_none());
    }

    #[test]
    fn cancelled_status_changes_nothing() {
        let mut m = MaintenanceModel::default();
        let before = m.clone();
        update(&mut m, Msg::StatusCancelled);
        assert_eq!(m, before);
    }
}
