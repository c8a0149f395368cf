mod common;

use common::{FakeAdminApi, status};
use marty_admin::controller::maintenance::{
    MaintenanceController, TOGGLE_FAILED_NOTICE, TogglePhase,
};
use marty_admin::error::AdminError;
use marty_admin::model::{MaintenanceStatus, StatusPayload};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn derive(body: serde_json::Value) -> MaintenanceStatus {
    let payload: StatusPayload = serde_json::from_value(body).unwrap();
    MaintenanceStatus::from(payload)
}

#[test]
fn test2_mode_code_two_means_enabled() {
    let on = derive(json!({"common": {"maintenance_mode": 2, "version": "2.4.1"}}));
    assert!(on.enabled);
    assert_eq!(on.version, "2.4.1");

    for code in [json!(0), json!(1), json!(3), json!("2"), json!(null)] {
        let off = derive(json!({"common": {"maintenance_mode": code}}));
        assert!(!off.enabled);
        assert_eq!(off.version, "");
    }
    assert!(!derive(json!({})).enabled);
}

#[tokio::test]
async fn test2_initial_load_reflects_server() -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(FakeAdminApi::new().with_status(Ok(status(true, "3.1.0"))));
    let ctrl = MaintenanceController::new(api.clone());
    assert!(ctrl.snapshot().await.control_disabled());

    ctrl.load_initial().await?;
    let model = ctrl.snapshot().await;
    assert!(model.enabled);
    assert_eq!(model.version, "3.1.0");
    assert!(!model.initial_loading);
    assert!(!model.control_disabled());
    Ok(())
}

#[tokio::test]
async fn test2_failed_load_shows_off_and_propagates() {
    let api = Arc::new(FakeAdminApi::new().with_status(Err(AdminError::Network("refused".into()))));
    let ctrl = MaintenanceController::new(api);
    let res = ctrl.load_initial().await;
    assert_eq!(res, Err(AdminError::Network("refused".into())));
    let model = ctrl.snapshot().await;
    assert!(!model.enabled);
    assert!(!model.initial_loading);
    assert!(model.notice.is_none());
}

#[tokio::test]
async fn test2_teardown_drops_initial_load_silently() {
    let api = Arc::new(
        FakeAdminApi::new()
            .with_status(Ok(status(true, "9")))
            .with_status_delay(Duration::from_millis(500)),
    );
    let ctrl = Arc::new(MaintenanceController::new(api.clone()));
    let loader = {
        let ctrl = Arc::clone(&ctrl);
        tokio::spawn(async move { ctrl.load_initial().await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    ctrl.shutdown();

    assert_eq!(loader.await.unwrap(), Ok(()));
    let model = ctrl.snapshot().await;
    assert!(!model.enabled);
    assert_eq!(model.version, "");
    assert!(model.notice.is_none());
    assert_eq!(api.status_calls(), 1);
}

#[tokio::test]
async fn test2_toggle_is_rejected_until_loaded() {
    let api = Arc::new(FakeAdminApi::new());
    let ctrl = MaintenanceController::new(api.clone());
    assert_eq!(ctrl.request_toggle(true).await, Err(AdminError::Busy));
    assert_eq!(ctrl.snapshot().await.phase, TogglePhase::Idle);
    assert!(api.sent().is_empty());
}

#[tokio::test]
async fn test2_request_and_cancel_never_touch_the_network() -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(FakeAdminApi::new());
    let ctrl = MaintenanceController::new(api.clone());
    ctrl.load_initial().await?;
    let calls_after_load = api.status_calls();

    assert!(ctrl.request_flip().await?);
    assert_eq!(
        ctrl.snapshot().await.phase,
        TogglePhase::PendingConfirmation { staged: true }
    );
    ctrl.cancel_toggle().await;
    assert_eq!(ctrl.snapshot().await.phase, TogglePhase::Idle);
    assert!(api.sent().is_empty());
    assert_eq!(api.status_calls(), calls_after_load);

    assert_eq!(ctrl.confirm_toggle().await, Err(AdminError::NotPending));
    assert!(api.sent().is_empty());
    Ok(())
}

#[tokio::test]
async fn test2_confirmed_toggle_reconciles_with_server() -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(FakeAdminApi::new().with_status(Ok(status(false, "1.0.0"))));
    let ctrl = MaintenanceController::new(api.clone());
    ctrl.load_initial().await?;

    ctrl.request_toggle(true).await?;
    ctrl.confirm_toggle().await?;

    assert_eq!(api.sent(), vec![true]);
    assert_eq!(api.status_calls(), 2);
    let model = ctrl.snapshot().await;
    assert!(model.enabled);
    assert_eq!(model.phase, TogglePhase::Idle);
    assert!(model.notice.is_none());
    Ok(())
}

#[tokio::test]
async fn test2_failed_toggle_shows_fresh_fetch_not_staged_value() -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(
        FakeAdminApi::new()
            .with_status(Ok(status(false, "1.0.0")))
            .with_set_result(Err(AdminError::Status {
                status: 503,
                url: "http://fake/api/v1/admin/maintenance".into(),
            })),
    );
    let ctrl = MaintenanceController::new(api.clone());
    ctrl.load_initial().await?;

    ctrl.request_toggle(true).await?;
    let res = ctrl.confirm_toggle().await;
    assert!(matches!(res, Err(AdminError::Status { status: 503, .. })));

    let fresh = api.status.lock().unwrap().clone()?;
    let model = ctrl.snapshot().await;
    assert_eq!(model.enabled, fresh.enabled);
    assert!(!model.enabled);
    assert_eq!(model.phase, TogglePhase::Idle);
    assert_eq!(model.notice.as_deref(), Some(TOGGLE_FAILED_NOTICE));
    assert_eq!(api.status_calls(), 2);

    ctrl.dismiss_notice().await;
    assert!(ctrl.snapshot().await.notice.is_none());
    Ok(())
}

#[tokio::test]
async fn test2_failed_toggle_and_failed_refetch_show_off() -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(FakeAdminApi::new().with_status(Ok(status(true, "1.0.0"))));
    let ctrl = MaintenanceController::new(api.clone());
    ctrl.load_initial().await?;
    assert!(ctrl.snapshot().await.enabled);

    *api.set_result.lock().unwrap() = Err(AdminError::Network("reset".into()));
    *api.status.lock().unwrap() = Err(AdminError::Network("reset".into()));

    ctrl.request_toggle(false).await?;
    assert_eq!(
        ctrl.confirm_toggle().await,
        Err(AdminError::Network("reset".into()))
    );
    let model = ctrl.snapshot().await;
    assert!(!model.enabled);
    assert_eq!(model.phase, TogglePhase::Idle);
    assert!(model.notice.is_some());
    Ok(())
}

#[tokio::test]
async fn test2_control_is_disabled_while_submitting() -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(FakeAdminApi::new());
    let ctrl = Arc::new(MaintenanceController::new(api.clone()));
    ctrl.load_initial().await?;
    *api.status_delay.lock().unwrap() = Duration::from_millis(200);

    ctrl.request_toggle(true).await?;
    let confirm = {
        let ctrl = Arc::clone(&ctrl);
        tokio::spawn(async move { ctrl.confirm_toggle().await })
    };
    tokio::time::sleep(Duration::from_millis(30)).await;

    let model = ctrl.snapshot().await;
    assert_eq!(model.phase, TogglePhase::Submitting { staged: true });
    assert!(model.control_disabled());
    assert_eq!(ctrl.request_toggle(false).await, Err(AdminError::Busy));

    confirm.await??;
    assert_eq!(api.sent(), vec![true]);
    assert!(ctrl.snapshot().await.enabled);
    Ok(())
}

#[tokio::test]
async fn test2_refresh_during_submit_keeps_control_locked() -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(FakeAdminApi::new().with_set_delay(Duration::from_millis(300)));
    let ctrl = Arc::new(MaintenanceController::new(api.clone()));
    ctrl.load_initial().await?;

    ctrl.request_toggle(true).await?;
    let confirm = {
        let ctrl = Arc::clone(&ctrl);
        tokio::spawn(async move { ctrl.confirm_toggle().await })
    };
    tokio::time::sleep(Duration::from_millis(30)).await;

    let refreshed = ctrl.fetch_status().await?;
    assert!(!refreshed.enabled);
    let model = ctrl.snapshot().await;
    assert_eq!(model.phase, TogglePhase::Submitting { staged: true });
    assert!(model.control_disabled());
    assert!(model.notice.is_none());
    assert_eq!(ctrl.request_toggle(false).await, Err(AdminError::Busy));

    confirm.await??;
    let model = ctrl.snapshot().await;
    assert_eq!(model.phase, TogglePhase::Idle);
    assert!(model.enabled);
    assert_eq!(api.sent(), vec![true]);
    Ok(())
}

#[tokio::test]
async fn test2_failed_refresh_during_submit_records_no_notice() -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(FakeAdminApi::new().with_set_delay(Duration::from_millis(300)));
    let ctrl = Arc::new(MaintenanceController::new(api.clone()));
    ctrl.load_initial().await?;

    ctrl.request_toggle(true).await?;
    let confirm = {
        let ctrl = Arc::clone(&ctrl);
        tokio::spawn(async move { ctrl.confirm_toggle().await })
    };
    tokio::time::sleep(Duration::from_millis(30)).await;

    *api.status.lock().unwrap() = Err(AdminError::Network("blip".into()));
    assert!(ctrl.fetch_status().await.is_err());
    let model = ctrl.snapshot().await;
    assert!(model.notice.is_none());
    assert_eq!(model.phase, TogglePhase::Submitting { staged: true });

    *api.status.lock().unwrap() = Ok(status(false, "1.0.0"));
    confirm.await??;
    assert!(ctrl.snapshot().await.notice.is_none());
    Ok(())
}

#[tokio::test]
async fn test2_concurrent_confirms_send_once() -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(FakeAdminApi::new().with_set_delay(Duration::from_millis(100)));
    let ctrl = Arc::new(MaintenanceController::new(api.clone()));
    ctrl.load_initial().await?;
    ctrl.request_toggle(true).await?;

    let (a, b) = tokio::join!(ctrl.confirm_toggle(), ctrl.confirm_toggle());
    let mut outcomes = [a, b];
    outcomes.sort_by_key(Result::is_err);
    assert_eq!(outcomes[0], Ok(()));
    assert_eq!(outcomes[1], Err(AdminError::NotPending));
    assert_eq!(api.sent(), vec![true]);
    Ok(())
}
