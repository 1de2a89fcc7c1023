mod common;

use chrono::Duration;
use common::{inbound, owner_pickup, start_locker};
use parcel_locker::model::{AuditAction, PageRequest, ParcelStatus};

#[tokio::test]
async fn test_sweep_twice_flags_each_parcel_once() {
    let (system, clock) = start_locker(&[("A1", 10)]).await;
    for n in 0..3 {
        system
            .parcels
            .inbound(inbound(&format!("SF{n}"), "13800000001"))
            .await
            .unwrap();
    }
    let collected = system
        .parcels
        .inbound(inbound("SF9", "13800000002"))
        .await
        .unwrap();
    system.parcels.pickup(owner_pickup(&collected)).await.unwrap();

    clock.advance(Duration::days(4));
    system
        .parcels
        .inbound(inbound("SF-fresh", "13800000003"))
        .await
        .unwrap();

    assert_eq!(system.audit.sweep_expired(0).await.unwrap(), 3);
    assert_eq!(system.audit.sweep_expired(0).await.unwrap(), 0);

    let entries = system.audit.entries(None).await.unwrap();
    assert_eq!(entries.len(), 3);
    for entry in &entries {
        assert_eq!(entry.action, AuditAction::Expired);
        assert_eq!(entry.operator, "SYSTEM");
        assert_eq!(entry.old_status, ParcelStatus::Stored);
        assert_eq!(entry.new_status, ParcelStatus::Stored);
    }

    // Flagging does not change the parcel.
    let still_stored = system.parcels.get_parcel("SF0").await.unwrap();
    assert_eq!(still_stored.status, ParcelStatus::Stored);
    let for_one = system.audit.entries(Some(still_stored.id)).await.unwrap();
    assert_eq!(for_one.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sweeps_are_idempotent() {
    let (system, clock) = start_locker(&[("A1", 10)]).await;
    for n in 0..5 {
        system
            .parcels
            .inbound(inbound(&format!("SF{n}"), "13800000001"))
            .await
            .unwrap();
    }
    clock.advance(Duration::days(10));

    let mut sweeps = Vec::new();
    for _ in 0..4 {
        let audit = system.audit.clone();
        sweeps.push(tokio::spawn(async move { audit.sweep_expired(3).await }));
    }
    let mut total = 0;
    for sweep in sweeps {
        total += sweep.await.unwrap().unwrap();
    }

    assert_eq!(total, 5);
    assert_eq!(system.audit.entries(None).await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_retention_list_uses_seven_day_default() {
    let (system, clock) = start_locker(&[("A1", 10)]).await;
    system.parcels.inbound(inbound("OLD1", "13800000001")).await.unwrap();
    clock.advance(Duration::days(1));
    system.parcels.inbound(inbound("OLD2", "13800000001")).await.unwrap();
    clock.advance(Duration::days(5));
    system.parcels.inbound(inbound("NEW", "13800000001")).await.unwrap();
    clock.advance(Duration::days(2));

    // Ages are now 8, 7 and 2 days.
    let page = system
        .audit
        .retention_parcels(0, PageRequest::default())
        .await
        .unwrap();

    let tracking: Vec<_> = page.items.iter().map(|p| p.tracking_number.as_str()).collect();
    assert_eq!(tracking, vec!["OLD1"]);

    let wider = system
        .audit
        .retention_parcels(1, PageRequest::new(1, 1))
        .await
        .unwrap();
    assert_eq!(wider.total, 3);
    assert_eq!(wider.items[0].tracking_number, "OLD1");
}

#[tokio::test]
async fn test_huge_threshold_leaves_store_serving() {
    let (system, clock) = start_locker(&[("A1", 10)]).await;
    system.parcels.inbound(inbound("SF1", "13800000001")).await.unwrap();
    clock.advance(Duration::days(30));

    assert_eq!(system.audit.sweep_expired(u32::MAX).await.unwrap(), 0);
    let page = system
        .audit
        .retention_parcels(u32::MAX, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);

    let parcel = system.parcels.get_parcel("SF1").await.unwrap();
    assert_eq!(parcel.status, ParcelStatus::Stored);
    assert_eq!(system.audit.sweep_expired(0).await.unwrap(), 1);
}
