//! Stateless authorization rules.
//!
//! Admins see and delete everything. Plain users are confined to the meals
//! they created. Every rule takes the caller explicitly; nothing here touches
//! storage.

use crate::{
    auth::Caller,
    meals::{Meal, MealDetails},
};

/// Which meals a bulk delete may remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    Global,
    OwnOnly,
}

/// Anything with a single owning user.
pub trait Owned {
    fn owner_id(&self) -> uuid::Uuid;
}

impl Owned for Meal {
    fn owner_id(&self) -> uuid::Uuid {
        self.user_id
    }
}

impl Owned for MealDetails {
    fn owner_id(&self) -> uuid::Uuid {
        self.user_id
    }
}

pub fn can_list_all(caller: &Caller) -> bool {
    caller.is_admin()
}

pub fn can_view_meal<M: Owned + ?Sized>(caller: &Caller, meal: &M) -> bool {
    caller.is_admin() || caller.user_id == meal.owner_id()
}

/// Same rule as viewing: owner or admin.
pub fn can_delete_meal<M: Owned + ?Sized>(caller: &Caller, meal: &M) -> bool {
    can_view_meal(caller, meal)
}

pub fn delete_all_scope(caller: &Caller) -> DeleteScope {
    if caller.is_admin() {
        DeleteScope::Global
    } else {
        DeleteScope::OwnOnly
    }
}

pub fn can_delete_all_foods(caller: &Caller) -> bool {
    caller.is_admin()
}
