//! # User Client
use crate::locker_actor::{
    LockerAction, LockerActionResult, LockerDb, LockerError, LockerQuery, LockerQueryResult,
};
use crate::model::{User, UserId};
use async_trait::async_trait;
use store_actor::{ActorClient, StoreClient, StoreError};
use tracing::instrument;

/// Client for student accounts.
#[derive(Clone)]
pub struct UserClient {
    inner: StoreClient<LockerDb>,
}

impl UserClient {
    pub fn new(inner: StoreClient<LockerDb>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<LockerDb> for UserClient {
    type Error = LockerError;

    fn inner(&self) -> &StoreClient<LockerDb> {
        &self.inner
    }

    fn map_error(e: StoreError<LockerError>) -> Self::Error {
        LockerError::from(e)
    }
}

impl UserClient {
    /// Finds the student with this phone, registering them on first login.
    #[instrument(skip(self))]
    pub async fn resolve_student(&self, phone: &str, name: Option<&str>) -> Result<User, LockerError> {
        let action = LockerAction::ResolveStudent {
            phone: phone.to_string(),
            name: name.map(str::to_string),
        };
        match self.apply(action).await? {
            LockerActionResult::ResolveStudent(user) => Ok(user),
            _ => unreachable!("ResolveStudent action must return ResolveStudent result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: UserId) -> Result<User, LockerError> {
        match self.query(LockerQuery::User { user_id }).await? {
            LockerQueryResult::User(user) => Ok(user),
            _ => unreachable!("User query must return User result"),
        }
    }
}
