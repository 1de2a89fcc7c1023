//! Retention auditing.
//!
//! The sweep flags overdue parcels in the audit log and nothing else: parcel
//! status and shelf load are left alone. An entry's key is
//! `(parcel_id, EXPIRED)`, so repeated sweeps never flag a parcel twice.

use super::db::LockerDb;
use super::error::LockerError;
use crate::model::{
    audit_key, AuditAction, AuditEntry, Page, PageRequest, Parcel, ParcelId, SYSTEM_OPERATOR,
};
use chrono::{DateTime, Duration, Utc};
use tracing::info;

impl LockerDb {
    /// Writes one `EXPIRED` entry per active parcel created before
    /// `now - threshold_days` that has none yet. Returns the number written.
    pub(super) fn sweep_expired(&mut self, threshold_days: u32) -> Result<u64, LockerError> {
        let days = if threshold_days == 0 {
            self.config.expiry_days
        } else {
            threshold_days
        };
        let now = self.now();
        let Some(cutoff) = cutoff(now, days) else {
            info!(threshold_days = days, "Threshold predates representable time, nothing to flag");
            return Ok(0);
        };

        let overdue: Vec<_> = self
            .parcels
            .iter()
            .filter(|p| p.is_active() && p.created_at < cutoff)
            .filter(|p| !self.audit.contains_key(&audit_key(p.id, AuditAction::Expired)))
            .map(|p| (p.id, p.status))
            .collect();

        for (parcel_id, status) in &overdue {
            self.audit.insert_with(|id| AuditEntry {
                id,
                parcel_id: *parcel_id,
                action: AuditAction::Expired,
                old_status: *status,
                new_status: *status,
                operator: SYSTEM_OPERATOR.to_string(),
                created_at: now,
            });
        }

        let flagged = overdue.len() as u64;
        info!(threshold_days = days, flagged, "Expiry sweep complete");
        Ok(flagged)
    }

    /// Active parcels older than the threshold, oldest first.
    pub(super) fn retention_parcels(&self, threshold_days: u32, page: PageRequest) -> Page<Parcel> {
        let days = if threshold_days == 0 {
            self.config.retention_days
        } else {
            threshold_days
        };
        let Some(cutoff) = cutoff(self.now(), days) else {
            return page.slice(std::iter::empty());
        };

        let mut overdue: Vec<&Parcel> = self
            .parcels
            .iter()
            .filter(|p| p.is_active() && p.created_at < cutoff)
            .collect();
        overdue.sort_by_key(|p| (p.created_at, p.id));
        page.slice(overdue.into_iter().cloned())
    }

    /// The audit log in insertion order, optionally for one parcel.
    pub(super) fn audit_entries(&self, parcel_id: Option<ParcelId>) -> Vec<AuditEntry> {
        self.audit
            .iter()
            .filter(|e| parcel_id.map_or(true, |id| e.parcel_id == id))
            .cloned()
            .collect()
    }
}

/// `now - days`, or `None` when that instant is outside chrono's range and so
/// no parcel can be older.
fn cutoff(now: DateTime<Utc>, days: u32) -> Option<DateTime<Utc>> {
    Duration::try_days(i64::from(days)).and_then(|age| now.checked_sub_signed(age))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{inbound, test_db};
    use super::*;
    use crate::model::ParcelStatus;

    #[test]
    fn test_sweep_is_idempotent() {
        let (mut db, clock) = test_db(&[("A1", 10)]);
        db.inbound(inbound("SF1", "13800000001")).unwrap();
        db.inbound(inbound("SF2", "13800000002")).unwrap();
        clock.advance(Duration::days(4));
        db.inbound(inbound("SF3", "13800000003")).unwrap();

        assert_eq!(db.sweep_expired(0).unwrap(), 2);
        assert_eq!(db.sweep_expired(0).unwrap(), 0);

        let entries = db.audit_entries(None);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.operator == "SYSTEM"
            && e.action == AuditAction::Expired
            && e.old_status == e.new_status));
    }

    #[test]
    fn test_sweep_leaves_parcels_untouched() {
        let (mut db, clock) = test_db(&[("A1", 10)]);
        let parcel = db.inbound(inbound("SF1", "13800000001")).unwrap();
        clock.advance(Duration::days(10));

        db.sweep_expired(3).unwrap();

        let after = db.parcels().get(parcel.id).unwrap();
        assert_eq!(after, &parcel);
    }

    #[test]
    fn test_sweep_skips_inactive_and_respects_threshold() {
        let (mut db, clock) = test_db(&[("A1", 10)]);
        db.inbound(inbound("SF1", "13800000001")).unwrap();
        db.inbound(inbound("SF2", "13800000002")).unwrap();
        db.set_status("SF2", ParcelStatus::Returned).unwrap();
        clock.advance(Duration::days(5));

        assert_eq!(db.sweep_expired(6).unwrap(), 0);
        assert_eq!(db.sweep_expired(4).unwrap(), 1);
    }

    #[test]
    fn test_created_exactly_at_cutoff_is_not_overdue() {
        let (mut db, clock) = test_db(&[("A1", 10)]);
        db.inbound(inbound("SF1", "13800000001")).unwrap();
        clock.advance(Duration::days(3));

        assert_eq!(db.sweep_expired(3).unwrap(), 0);
    }

    #[test]
    fn test_threshold_beyond_calendar_range_matches_nothing() {
        let (mut db, clock) = test_db(&[("A1", 10)]);
        db.inbound(inbound("SF1", "13800000001")).unwrap();
        clock.advance(Duration::days(30));

        assert!(cutoff(db.now(), u32::MAX).is_none());
        assert_eq!(db.sweep_expired(u32::MAX).unwrap(), 0);
        let page = db.retention_parcels(u32::MAX, PageRequest::default());
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);

        // A sane threshold still works afterwards.
        assert_eq!(db.sweep_expired(3).unwrap(), 1);
    }

    #[test]
    fn test_retention_list_oldest_first() {
        let (mut db, clock) = test_db(&[("A1", 10)]);
        db.inbound(inbound("SF1", "13800000001")).unwrap();
        clock.advance(Duration::hours(1));
        db.inbound(inbound("SF2", "13800000002")).unwrap();
        clock.advance(Duration::days(8));
        db.inbound(inbound("SF3", "13800000003")).unwrap();

        let page = db.retention_parcels(0, PageRequest::default());

        let tracking: Vec<_> = page.items.iter().map(|p| p.tracking_number.as_str()).collect();
        assert_eq!(tracking, vec!["SF1", "SF2"]);
        assert_eq!(page.total, 2);
    }
}
