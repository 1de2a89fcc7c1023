//! Users and couriers.

use super::db::LockerDb;
use super::error::LockerError;
use crate::model::{Courier, CourierCreate, User, UserId, DEFAULT_STUDENT_NAME};
use tracing::info;

impl LockerDb {
    /// Finds the user with this phone or creates one. A blank `name` falls
    /// back to the default student name. An existing user keeps its name.
    pub(super) fn resolve_user(&mut self, phone: &str, name: Option<&str>) -> UserId {
        if let Some(existing) = self.users.latest_by_key(phone) {
            return existing.id;
        }
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_STUDENT_NAME)
            .to_string();
        let now = self.now();
        let user = self.users.insert_with(|id| User {
            id,
            phone: phone.to_string(),
            name,
            created_at: now,
        });
        info!(user_id = %user.id, "User created");
        user.id
    }

    pub(super) fn resolve_student(
        &mut self,
        phone: &str,
        name: Option<&str>,
    ) -> Result<User, LockerError> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(LockerError::InvalidInput("phone is blank".into()));
        }
        let user_id = self.resolve_user(phone, name);
        self.find_user(user_id)
    }

    pub(super) fn register_courier(&mut self, params: CourierCreate) -> Result<Courier, LockerError> {
        let code = params.code.trim().to_string();
        let name = params.name.trim().to_string();
        if code.is_empty() || name.is_empty() {
            return Err(LockerError::InvalidInput("courier name and code are required".into()));
        }
        if self.couriers.contains_key(&code) {
            return Err(LockerError::DuplicateCode(code));
        }
        let contact_phone = params
            .contact_phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let now = self.now();
        let courier = self
            .couriers
            .insert_with(|id| Courier {
                id,
                name,
                code,
                contact_phone,
                created_at: now,
            })
            .clone();
        info!(courier_id = %courier.id, code = %courier.code, "Courier registered");
        Ok(courier)
    }

    /// Removes a courier no parcel refers to.
    pub(super) fn remove_courier(&mut self, code: &str) -> Result<Courier, LockerError> {
        let code = code.trim();
        let courier_id = self
            .couriers
            .latest_by_key(code)
            .map(|c| c.id)
            .ok_or_else(|| LockerError::NotFound(format!("courier {code}")))?;
        if self.parcels.iter().any(|p| p.courier_id == courier_id) {
            return Err(LockerError::CourierInUse(code.to_string()));
        }
        let removed = self
            .couriers
            .remove(courier_id)
            .ok_or_else(|| LockerError::NotFound(format!("courier {code}")))?;
        info!(courier_id = %removed.id, "Courier removed");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{inbound, test_db};
    use super::*;

    #[test]
    fn test_resolve_student_creates_once() {
        let (mut db, _clock) = test_db(&[]);

        let first = db.resolve_student("13800000001", Some("Li Wei")).unwrap();
        let again = db.resolve_student(" 13800000001 ", Some("Someone Else")).unwrap();

        assert_eq!(first.id, again.id);
        assert_eq!(again.name, "Li Wei");
        assert_eq!(db.users().len(), 1);
    }

    #[test]
    fn test_resolve_student_default_name() {
        let (mut db, _clock) = test_db(&[]);
        let user = db.resolve_student("13800000001", Some("  ")).unwrap();
        assert_eq!(user.name, DEFAULT_STUDENT_NAME);
        assert!(matches!(
            db.resolve_student("", None),
            Err(LockerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_register_courier_rejects_duplicate_code() {
        let (mut db, _clock) = test_db(&[]);
        let params = CourierCreate {
            name: "Yunda".into(),
            code: "YD".into(),
            contact_phone: Some(" ".into()),
        };

        let courier = db.register_courier(params.clone()).unwrap();

        assert_eq!(courier.contact_phone, None);
        assert_eq!(
            db.register_courier(params).unwrap_err(),
            LockerError::DuplicateCode("YD".into())
        );
    }

    #[test]
    fn test_remove_courier_in_use() {
        let (mut db, _clock) = test_db(&[("A1", 2)]);
        db.inbound(inbound("SF1", "13800000001")).unwrap();

        assert_eq!(
            db.remove_courier("SFX").unwrap_err(),
            LockerError::CourierInUse("SFX".into())
        );
        assert!(matches!(db.remove_courier("ZZ"), Err(LockerError::NotFound(_))));
    }
}
