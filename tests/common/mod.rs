#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use marty_admin::api::AdminApi;
use marty_admin::error::AdminError;
use marty_admin::model::{
    CaddieRef, Course, CourseId, EntityId, MaintenanceStatus, MasterData, RankingEntry,
};

/// In-memory admin API. `set_maintenance` flips the stored status on success
/// the way the real server does.
pub struct FakeAdminApi {
    pub status: Mutex<Result<MaintenanceStatus, AdminError>>,
    pub status_delay: Mutex<Duration>,
    pub set_result: Mutex<Result<(), AdminError>>,
    pub set_delay: Mutex<Duration>,
    pub master: Mutex<Result<MasterData, AdminError>>,
    pub rankings: Mutex<HashMap<String, (Duration, Result<Vec<RankingEntry>, AdminError>)>>,
    pub status_calls: AtomicUsize,
    pub master_calls: AtomicUsize,
    pub ranking_calls: Mutex<Vec<String>>,
    pub sent: Mutex<Vec<bool>>,
}

impl FakeAdminApi {
    pub fn new() -> Self {
        Self {
            status: Mutex::new(Ok(status(false, "1.0.0"))),
            status_delay: Mutex::new(Duration::ZERO),
            set_result: Mutex::new(Ok(())),
            set_delay: Mutex::new(Duration::ZERO),
            master: Mutex::new(Ok(MasterData::default())),
            rankings: Mutex::new(HashMap::new()),
            status_calls: AtomicUsize::new(0),
            master_calls: AtomicUsize::new(0),
            ranking_calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn with_status(self, res: Result<MaintenanceStatus, AdminError>) -> Self {
        *self.status.lock().unwrap() = res;
        self
    }

    pub fn with_status_delay(self, delay: Duration) -> Self {
        *self.status_delay.lock().unwrap() = delay;
        self
    }

    pub fn with_set_result(self, res: Result<(), AdminError>) -> Self {
        *self.set_result.lock().unwrap() = res;
        self
    }

    pub fn with_set_delay(self, delay: Duration) -> Self {
        *self.set_delay.lock().unwrap() = delay;
        self
    }

    pub fn with_master(self, res: Result<MasterData, AdminError>) -> Self {
        *self.master.lock().unwrap() = res;
        self
    }

    pub fn with_rankings(
        self,
        course: &str,
        delay: Duration,
        res: Result<Vec<RankingEntry>, AdminError>,
    ) -> Self {
        self.rankings
            .lock()
            .unwrap()
            .insert(course.to_string(), (delay, res));
        self
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn ranking_calls(&self) -> Vec<String> {
        self.ranking_calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<bool> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl AdminApi for FakeAdminApi {
    async fn fetch_status(&self) -> Result<MaintenanceStatus, AdminError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.status_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.status.lock().unwrap().clone()
    }

    async fn set_maintenance(&self, enabled: bool) -> Result<(), AdminError> {
        self.sent.lock().unwrap().push(enabled);
        let delay = *self.set_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let res = self.set_result.lock().unwrap().clone();
        if res.is_ok() {
            if let Ok(current) = &mut *self.status.lock().unwrap() {
                current.enabled = enabled;
            }
        }
        res
    }

    async fn fetch_master(&self) -> Result<MasterData, AdminError> {
        self.master_calls.fetch_add(1, Ordering::SeqCst);
        self.master.lock().unwrap().clone()
    }

    async fn fetch_rankings(&self, course_id: &CourseId) -> Result<Vec<RankingEntry>, AdminError> {
        self.ranking_calls
            .lock()
            .unwrap()
            .push(course_id.to_string());
        let (delay, res) = self
            .rankings
            .lock()
            .unwrap()
            .get(course_id.as_str())
            .cloned()
            .unwrap_or((Duration::ZERO, Ok(Vec::new())));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        res
    }
}

pub fn status(enabled: bool, version: &str) -> MaintenanceStatus {
    MaintenanceStatus {
        enabled,
        version: version.to_string(),
    }
}

pub fn entry(score: Option<f64>, stale_rank: u32, nickname: &str) -> RankingEntry {
    RankingEntry {
        rank: stale_rank,
        score,
        stroke_count: score,
        nickname: Some(nickname.to_string()),
        wallet_address: None,
        caddie_id: None,
        last_play_at: None,
        app_user_id: None,
    }
}

pub fn course(id: i64, name: &str, facility: &str, course_type: Option<i64>) -> Course {
    Course {
        id: EntityId::from(id),
        name: name.to_string(),
        facility_name: facility.to_string(),
        course_type,
    }
}

pub fn sample_master() -> MasterData {
    MasterData {
        courses: vec![
            course(1, "East", "Pine Hills", Some(1)),
            course(2, "Practice", "Pine Hills", Some(0)),
            course(3, "West", "", None),
        ],
        caddies: vec![CaddieRef {
            id: EntityId::from(7),
            name: "Aoi".to_string(),
        }],
    }
}
