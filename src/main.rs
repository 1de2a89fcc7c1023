//! # Parcel Locker Demo
//!
//! Walks one parcel through its life: a shelf and a courier are set up, the
//! parcel is booked in, its recipient logs in and collects it, and the
//! dashboard and retention sweep are read back.

use parcel_locker::config::{log_filter_from_env, LockerConfig};
use parcel_locker::lifecycle::{setup_tracing, LockerSystem};
use parcel_locker::locker_actor::LockerError;
use parcel_locker::model::{CourierCreate, InboundRequest, PickupRequest, ShelfCreate};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing(&log_filter_from_env());
    let config = LockerConfig::from_env();

    info!("Starting parcel locker");
    let system = LockerSystem::new(config);

    let setup = async {
        let shelf = system
            .shelves
            .create_shelf(ShelfCreate {
                zone: "North Gate".to_string(),
                code: "n-01".to_string(),
                capacity: 40,
            })
            .await?;
        info!(code = %shelf.code, "Shelf ready");

        let courier = system
            .couriers
            .register(CourierCreate {
                name: "SF Express".to_string(),
                code: "SF".to_string(),
                contact_phone: Some("95338".to_string()),
            })
            .await?;
        Ok::<_, LockerError>(courier)
    }
    .instrument(tracing::info_span!("setup"))
    .await
    .map_err(|e| e.to_string())?;
    info!(courier = %setup.code, "Courier registered");

    let parcel = system
        .parcels
        .inbound(InboundRequest {
            tracking_number: "SF1234567890".to_string(),
            recipient_phone: "13800000001".to_string(),
            courier_code: "SF".to_string(),
            operator: "front-desk".to_string(),
        })
        .instrument(tracing::info_span!("inbound"))
        .await
        .map_err(|e| e.to_string())?;

    let student = system
        .users
        .resolve_student("13800000001", Some("Li Wei"))
        .await
        .map_err(|e| e.to_string())?;

    let pickup = system
        .parcels
        .pickup(PickupRequest {
            tracking_number: parcel.tracking_number.clone(),
            pickup_code: parcel.pickup_code.clone().unwrap_or_default(),
            user_id: student.id,
        })
        .instrument(tracing::info_span!("pickup"))
        .await;
    match pickup {
        Ok(picked) => info!(tracking_number = %picked.tracking_number, "Parcel collected"),
        Err(e) => error!(error = %e, "Pickup failed"),
    }

    let stats = system.parcels.dashboard().await.map_err(|e| e.to_string())?;
    info!(
        waiting = stats.waiting_pickup,
        full_shelves = stats.full_shelves,
        today_ops = stats.today_ops,
        "Dashboard"
    );

    let flagged = system.audit.sweep_expired(0).await.map_err(|e| e.to_string())?;
    info!(flagged, "Retention sweep done");

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
