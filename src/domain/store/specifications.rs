// src/domain/store/specifications.rs
use crate::domain::store::entity::Store;
use crate::domain::user::UserId;

pub trait StoreSpecification {
    fn is_satisfied(&self) -> bool;
}

/// Only the author of a store may edit it.
pub struct CanEditStoreSpec<'a> {
    store: &'a Store,
    user_id: UserId,
}

impl<'a> CanEditStoreSpec<'a> {
    pub fn new(store: &'a Store, user_id: UserId) -> Self {
        Self { store, user_id }
    }
}

impl StoreSpecification for CanEditStoreSpec<'_> {
    fn is_satisfied(&self) -> bool {
        self.store.is_owned_by(self.user_id)
    }
}
