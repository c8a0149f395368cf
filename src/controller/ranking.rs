use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::api::AdminApi;
use crate::error::AdminError;
use crate::model::{CaddieTable, Course, CourseId, RankingEntry, normalize_rankings};

#[derive(Debug, Clone, Default)]
pub struct RankingModel {
    pub courses: Vec<Course>,
    pub caddies: CaddieTable,
    pub loading_courses: bool,
    pub selected: Option<CourseId>,
    pub rankings: Vec<RankingEntry>,
    pub loading: bool,
    generation: u64,
}

impl RankingModel {
    /// Courses offered in the selector.
    pub fn selectable_courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter().filter(|c| c.is_selectable())
    }
}

/// Cancellation scope of the newest ranking request.
struct RequestScope {
    generation: u64,
    token: CancellationToken,
}

pub struct RankingController {
    api: Arc<dyn AdminApi>,
    model: RwLock<RankingModel>,
    scope: std::sync::Mutex<RequestScope>,
    teardown: CancellationToken,
}

impl RankingController {
    #[must_use]
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        let teardown = CancellationToken::new();
        Self {
            api,
            model: RwLock::new(RankingModel::default()),
            scope: std::sync::Mutex::new(RequestScope {
                generation: 0,
                token: teardown.child_token(),
            }),
            teardown,
        }
    }

    pub async fn snapshot(&self) -> RankingModel {
        self.model.read().await.clone()
    }

    /// Loads courses and caddies for a page visit.
    ///
    /// A failed read leaves the course list empty; teardown leaves the model untouched.
    pub async fn load_master(&self) {
        self.model.write().await.loading_courses = true;
        let res = tokio::select! {
            biased;
            () = self.teardown.cancelled() => Err(AdminError::Cancelled),
            res = self.api.fetch_master() => res,
        };

        let mut model = self.model.write().await;
        match res {
            Ok(master) => {
                tracing::debug!(
                    courses = master.courses.len(),
                    caddies = master.caddies.len(),
                    "master data loaded"
                );
                model.courses = master.courses;
                model.caddies = master.caddies.into_iter().collect();
            }
            Err(AdminError::Cancelled) => return,
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch master data");
                model.courses.clear();
            }
        }
        model.loading_courses = false;
    }

    /// Opens a new request scope and cancels the previous one.
    fn next_scope(&self) -> (u64, CancellationToken) {
        let mut scope = match self.scope.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        scope.token.cancel();
        scope.generation += 1;
        scope.token = self.teardown.child_token();
        (scope.generation, scope.token.clone())
    }

    /// Switches the ranking table to `course`.
    ///
    /// `None` clears the table without a request. Otherwise the rankings are
    /// fetched and applied only if no later selection has happened meanwhile.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the fetch for the still-current selection fails; the
    /// table is cleared in that case. Superseded requests return `Ok`.
    pub async fn select_course(&self, course: Option<CourseId>) -> Result<(), AdminError> {
        let (generation, token) = self.next_scope();

        let course_id = {
            let mut model = self.model.write().await;
            if model.generation > generation {
                return Ok(());
            }
            model.generation = generation;
            model.selected = course.filter(|c| !c.is_empty());
            let Some(id) = model.selected.clone() else {
                model.rankings.clear();
                model.loading = false;
                return Ok(());
            };
            model.loading = true;
            id
        };

        let res = tokio::select! {
            biased;
            () = token.cancelled() => Err(AdminError::Cancelled),
            res = self.api.fetch_rankings(&course_id) => res,
        };

        let mut model = self.model.write().await;
        if model.generation != generation {
            tracing::debug!(course = %course_id, "dropping superseded rankings");
            return Ok(());
        }
        model.loading = false;
        match res {
            Ok(entries) => {
                model.rankings = normalize_rankings(entries);
                Ok(())
            }
            Err(AdminError::Cancelled) => Ok(()),
            Err(e) => {
                tracing::warn!(course = %course_id, error = %e, "failed to fetch rankings");
                model.rankings.clear();
                Err(e)
            }
        }
    }

    /// Cancels every outstanding request of this controller.
    pub fn shutdown(&self) {
        self.teardown.cancel();
    }
}
