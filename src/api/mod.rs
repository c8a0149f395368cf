pub mod client;

use async_trait::async_trait;

use crate::error::AdminError;
use crate::model::{CourseId, MaintenanceStatus, MasterData, RankingEntry};

pub use client::{ApiConfig, HttpAdminApi};

/// The slice of the remote admin API the dashboard talks to.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn fetch_status(&self) -> Result<MaintenanceStatus, AdminError>;

    async fn set_maintenance(&self, enabled: bool) -> Result<(), AdminError>;

    async fn fetch_master(&self) -> Result<MasterData, AdminError>;

    /// Entries come back in server order with server ranks; callers normalize.
    async fn fetch_rankings(&self, course_id: &CourseId) -> Result<Vec<RankingEntry>, AdminError>;
}
