use actix_web::cookie::{Cookie, SameSite};
use actix_web::web::{self, Data};
use actix_web::{HttpRequest, HttpResponse, Responder};
use chrono::FixedOffset;
use maud::Markup;
use std::collections::HashMap;

use crate::controller::session::{ResolvedView, VIEW_COOKIE, ViewSessions};
use crate::error::AdminError;
use crate::model::{EntityId, mock_users};
use crate::view::dashboard::{render_dashboard, render_maintenance_panel};
use crate::view::layout::{NavItem, render_page};
use crate::view::ranking::{render_ranking_table, render_rankings_page};
use crate::view::users::render_users;

/// Render settings resolved from configuration at startup.
#[derive(Debug, Clone, Copy)]
pub struct DisplaySettings {
    pub offset: FixedOffset,
}

/// Mounts every dashboard route relative to wherever the caller scopes it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(dashboard))
        .route("/health", web::get().to(HttpResponse::Ok))
        .route("/users", web::get().to(users))
        .route("/rankings", web::get().to(rankings))
        .route("/rankings/table", web::get().to(rankings_table))
        .route("/maintenance/status", web::get().to(maintenance_status))
        .route("/maintenance/toggle", web::post().to(maintenance_toggle))
        .route("/maintenance/confirm", web::post().to(maintenance_confirm))
        .route("/maintenance/cancel", web::post().to(maintenance_cancel))
        .route("/maintenance/notice/dismiss", web::post().to(maintenance_dismiss));
}

fn resolve(req: &HttpRequest, sessions: &ViewSessions) -> ResolvedView {
    let cookie = req.cookie(VIEW_COOKIE);
    sessions.resolve(cookie.as_ref().map(Cookie::value))
}

/// Html response that hands a newly opened view its cookie.
fn html(markup: Markup, view: &ResolvedView) -> HttpResponse {
    let mut resp = HttpResponse::Ok();
    resp.content_type("text/html");
    if view.opened {
        resp.cookie(
            Cookie::build(VIEW_COOKIE, view.id.to_string())
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .finish(),
        );
    }
    resp.body(markup.into_string())
}

fn course_param(query: &HashMap<String, String>) -> Option<EntityId> {
    query
        .get("course")
        .map(|s| EntityId::new(s.as_str()))
        .filter(|id| !id.is_empty())
}

/// Every visit re-reads the status for this view before rendering.
pub async fn dashboard(req: HttpRequest, sessions: Data<ViewSessions>) -> impl Responder {
    let view = resolve(&req, &sessions);
    let maintenance = &view.view.maintenance;
    if let Err(e) = maintenance.load_initial().await {
        tracing::warn!(error = %e, "maintenance status unavailable");
    }
    let model = maintenance.snapshot().await;
    html(
        render_page(NavItem::Dashboard, "Dashboard", &render_dashboard(&model)),
        &view,
    )
}

pub async fn users(req: HttpRequest, sessions: Data<ViewSessions>) -> impl Responder {
    let view = resolve(&req, &sessions);
    html(
        render_page(NavItem::Users, "Users", &render_users(&mock_users())),
        &view,
    )
}

pub async fn rankings(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    sessions: Data<ViewSessions>,
    settings: Data<DisplaySettings>,
) -> impl Responder {
    let view = resolve(&req, &sessions);
    let rankings = &view.view.rankings;
    rankings.load_master().await;
    if let Err(e) = rankings.select_course(course_param(&query)).await {
        tracing::warn!(error = %e, "rankings page rendered without data");
    }
    let model = rankings.snapshot().await;
    html(
        render_page(
            NavItem::Rankings,
            "Rankings",
            &render_rankings_page(&model, &settings.offset),
        ),
        &view,
    )
}

pub async fn rankings_table(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    sessions: Data<ViewSessions>,
    settings: Data<DisplaySettings>,
) -> impl Responder {
    let view = resolve(&req, &sessions);
    let rankings = &view.view.rankings;
    if view.opened {
        rankings.load_master().await;
    }
    if let Err(e) = rankings.select_course(course_param(&query)).await {
        tracing::warn!(error = %e, "ranking table rendered without data");
    }
    let model = rankings.snapshot().await;
    html(render_ranking_table(&model, &settings.offset), &view)
}

/// View for a maintenance fragment. A view opened here has never loaded its
/// status, so it loads before the action runs.
async fn maintenance_view(req: &HttpRequest, sessions: &ViewSessions) -> ResolvedView {
    let view = resolve(req, sessions);
    if view.opened {
        if let Err(e) = view.view.maintenance.load_initial().await {
            tracing::warn!(error = %e, "maintenance status unavailable");
        }
    }
    view
}

async fn panel(view: &ResolvedView) -> HttpResponse {
    html(
        render_maintenance_panel(&view.view.maintenance.snapshot().await),
        view,
    )
}

pub async fn maintenance_status(req: HttpRequest, sessions: Data<ViewSessions>) -> impl Responder {
    let view = maintenance_view(&req, &sessions).await;
    if !view.opened {
        if let Err(e) = view.view.maintenance.fetch_status().await {
            tracing::warn!(error = %e, "showing maintenance as off");
        }
    }
    panel(&view).await
}

pub async fn maintenance_toggle(req: HttpRequest, sessions: Data<ViewSessions>) -> impl Responder {
    let view = maintenance_view(&req, &sessions).await;
    match view.view.maintenance.request_flip().await {
        Ok(staged) => tracing::info!(staged, "maintenance change awaiting confirmation"),
        Err(AdminError::Busy) => tracing::debug!("toggle ignored while busy"),
        Err(e) => tracing::warn!(error = %e, "toggle request rejected"),
    }
    panel(&view).await
}

pub async fn maintenance_confirm(req: HttpRequest, sessions: Data<ViewSessions>) -> impl Responder {
    let view = maintenance_view(&req, &sessions).await;
    match view.view.maintenance.confirm_toggle().await {
        Ok(()) => tracing::info!("maintenance mode updated"),
        Err(AdminError::NotPending) => tracing::debug!("confirm without a staged change"),
        // the controller already logged and recorded a notice
        Err(_) => {}
    }
    panel(&view).await
}

pub async fn maintenance_cancel(req: HttpRequest, sessions: Data<ViewSessions>) -> impl Responder {
    let view = maintenance_view(&req, &sessions).await;
    view.view.maintenance.cancel_toggle().await;
    panel(&view).await
}

pub async fn maintenance_dismiss(req: HttpRequest, sessions: Data<ViewSessions>) -> impl Responder {
    let view = maintenance_view(&req, &sessions).await;
    view.view.maintenance.dismiss_notice().await;
    panel(&view).await
}
