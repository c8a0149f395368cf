use maud::{Markup, html};

use crate::controller::maintenance::{MaintenanceModel, TogglePhase};

pub const PANEL_ID: &str = "maintenance-panel";

fn description(model: &MaintenanceModel) -> &'static str {
    if model.initial_loading {
        "Loading status..."
    } else if model.enabled {
        "Maintenance mode is on. The service is temporarily unavailable."
    } else {
        "Maintenance mode is off. The service is running normally."
    }
}

#[must_use]
pub fn render_dashboard(model: &MaintenanceModel) -> Markup {
    html! {
        p class="subtitle" { "Overview of the admin console." }
        @if !model.version.is_empty() {
            p class="api-version" { "API version: " (model.version) }
        }
        (render_maintenance_panel(model))
    }
}

/// The maintenance card. Every toggle route swaps this fragment in place.
#[must_use]
pub fn render_maintenance_panel(model: &MaintenanceModel) -> Markup {
    let disabled = model.control_disabled();
    let target = format!("#{PANEL_ID}");
    html! {
        section id=(PANEL_ID) class="card" {
            div class="card-row" {
                div {
                    h3 { "Maintenance mode" }
                    p class="muted" { (description(model)) }
                }
                div class="toggle-box" {
                    button class=(if model.enabled { "toggle on" } else { "toggle off" })
                        hx-post="maintenance/toggle" hx-target=(target) hx-swap="outerHTML"
                        disabled[disabled] {
                        span class="knob" {}
                    }
                    span class="toggle-label" { (if model.enabled { "ON" } else { "OFF" }) }
                }
            }
            @if let Some(staged) = model.staged() {
                (render_confirm_dialog(staged, &model.phase, &target))
            }
            @if let Some(notice) = &model.notice {
                div class="notice" role="alertdialog" aria-modal="true" {
                    p { (notice) }
                    button hx-post="maintenance/notice/dismiss" hx-target=(target) hx-swap="outerHTML" { "OK" }
                }
            }
        }
    }
}

fn render_confirm_dialog(staged: bool, phase: &TogglePhase, target: &str) -> Markup {
    let submitting = matches!(phase, TogglePhase::Submitting { .. });
    let (title, body) = if staged {
        (
            "Enable maintenance mode?",
            "While maintenance mode is on the service is unavailable to players. Continue?",
        )
    } else {
        (
            "Disable maintenance mode?",
            "The service becomes available to players again. Continue?",
        )
    };
    html! {
        div class="modal" role="dialog" aria-modal="true" {
            h3 { (title) }
            p { (body) }
            div class="modal-actions" {
                button class="cancel" hx-post="maintenance/cancel" hx-target=(target) hx-swap="outerHTML"
                    disabled[submitting] { "Cancel" }
                button class=(if staged { "confirm danger" } else { "confirm" })
                    hx-post="maintenance/confirm" hx-target=(target) hx-swap="outerHTML"
                    disabled[submitting] {
                    (if submitting { "Working..." } else { "Run" })
                }
            }
        }
    }
}
