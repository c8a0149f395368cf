use ahash::RandomState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::api::AdminApi;
use crate::controller::maintenance::MaintenanceController;
use crate::controller::ranking::RankingController;

pub const VIEW_COOKIE: &str = "marty_admin_view";

/// State owned by one browser view: its maintenance panel and ranking table.
pub struct ViewState {
    pub maintenance: MaintenanceController,
    pub rankings: RankingController,
}

impl ViewState {
    #[must_use]
    pub fn new(api: &Arc<dyn AdminApi>) -> Self {
        Self {
            maintenance: MaintenanceController::new(Arc::clone(api)),
            rankings: RankingController::new(Arc::clone(api)),
        }
    }

    pub fn shutdown(&self) {
        self.maintenance.shutdown();
        self.rankings.shutdown();
    }
}

struct Slot {
    view: Arc<ViewState>,
    last_seen: Instant,
}

/// A view resolved for one request.
pub struct ResolvedView {
    pub id: Uuid,
    pub view: Arc<ViewState>,
    /// True when no live view matched and this one was just opened.
    pub opened: bool,
}

/// Views keyed by the id carried in [`VIEW_COOKIE`]. Idle views are torn down.
pub struct ViewSessions {
    api: Arc<dyn AdminApi>,
    idle_ttl: Duration,
    views: Mutex<HashMap<Uuid, Slot, RandomState>>,
}

impl ViewSessions {
    #[must_use]
    pub fn new(api: Arc<dyn AdminApi>, idle_ttl: Duration) -> Self {
        Self {
            api,
            idle_ttl,
            views: Mutex::new(HashMap::default()),
        }
    }

    fn views(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Slot, RandomState>> {
        match self.views.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Looks up the view for a cookie value, opening a fresh one when the value
    /// is missing, malformed or expired.
    pub fn resolve(&self, cookie: Option<&str>) -> ResolvedView {
        let now = Instant::now();
        let mut views = self.views();
        self.prune(&mut views, now);

        if let Some(id) = cookie.and_then(|c| Uuid::parse_str(c.trim()).ok()) {
            if let Some(slot) = views.get_mut(&id) {
                slot.last_seen = now;
                return ResolvedView {
                    id,
                    view: Arc::clone(&slot.view),
                    opened: false,
                };
            }
        }

        let id = Uuid::new_v4();
        let view = Arc::new(ViewState::new(&self.api));
        views.insert(
            id,
            Slot {
                view: Arc::clone(&view),
                last_seen: now,
            },
        );
        tracing::debug!(view = %id, open_views = views.len(), "opened view");
        ResolvedView {
            id,
            view,
            opened: true,
        }
    }

    fn prune(&self, views: &mut HashMap<Uuid, Slot, RandomState>, now: Instant) {
        views.retain(|id, slot| {
            let live = now.duration_since(slot.last_seen) < self.idle_ttl;
            if !live {
                tracing::debug!(view = %id, "closing idle view");
                slot.view.shutdown();
            }
            live
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.views().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views().is_empty()
    }

    /// Cancels outstanding requests of every view and forgets them.
    pub fn shutdown(&self) {
        let mut views = self.views();
        for slot in views.values() {
            slot.view.shutdown();
        }
        views.clear();
    }
}
