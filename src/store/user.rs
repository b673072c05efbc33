use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::auth::password::{hash_password, verify_password};
use crate::model::leave_request::LeaveType;
use crate::model::role::Role;
use crate::model::user::{LeaveBalance, User};
use crate::store::error::StoreError;

/// Directory of accounts and their leave allowances. The account list is
/// fixed after seeding; only allowance totals change, through the admin
/// balance edit.
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

fn balances(sick: (u32, u32), vacation: (u32, u32), personal: (u32, u32)) -> BTreeMap<LeaveType, LeaveBalance> {
    BTreeMap::from([
        (LeaveType::Sick, LeaveBalance { used: sick.0, total: sick.1 }),
        (LeaveType::Vacation, LeaveBalance { used: vacation.0, total: vacation.1 }),
        (LeaveType::Personal, LeaveBalance { used: personal.0, total: personal.1 }),
    ])
}

impl UserStore {
    /// Demo directory. Passwords are hashed at seed time; login still
    /// behaves as an exact email+password match against this list.
    pub fn seeded() -> Self {
        let seed = |id, email: &str, password: &str, role, name: &str, balances| User {
            id,
            email: email.to_owned(),
            password_hash: hash_password(password),
            role,
            name: name.to_owned(),
            leave_balances: balances,
        };

        let users = vec![
            seed(1, "admin@company.com", "admin123", Role::Admin, "Admin User", BTreeMap::new()),
            seed(
                2,
                "john@company.com",
                "user123",
                Role::Employee,
                "John Doe",
                balances((3, 10), (6, 20), (2, 5)),
            ),
            seed(
                3,
                "jane@company.com",
                "user123",
                Role::Employee,
                "Jane Smith",
                balances((1, 10), (8, 20), (0, 5)),
            ),
            seed(
                4,
                "mike@company.com",
                "user123",
                Role::Employee,
                "Mike Johnson",
                balances((5, 10), (12, 20), (3, 5)),
            ),
            seed(
                5,
                "finance@company.com",
                "finance123",
                Role::Finance,
                "Sarah Finch",
                balances((2, 10), (5, 20), (1, 5)),
            ),
        ];

        Self {
            users: RwLock::new(users),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<User>> {
        self.users.read().expect("user store lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<User>> {
        self.users.write().expect("user store lock poisoned")
    }

    pub fn list(&self) -> Vec<User> {
        self.read().clone()
    }

    pub fn find(&self, id: u64) -> Option<User> {
        self.read().iter().find(|u| u.id == id).cloned()
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.read().iter().find(|u| u.email == email).cloned()
    }

    /// Assignable staff accounts (role `user`).
    pub fn employees(&self) -> Vec<User> {
        self.read().iter().filter(|u| u.is_employee()).cloned().collect()
    }

    /// Linear credential match; `None` for unknown email and wrong
    /// password alike.
    pub fn verify_credentials(&self, email: &str, password: &str) -> Option<User> {
        self.read()
            .iter()
            .find(|u| u.email == email && verify_password(password, &u.password_hash))
            .cloned()
    }

    /// Replace allowance totals per leave type, preserving `used`
    /// counters. Types absent from `totals` keep their current values.
    pub fn set_allowances(
        &self,
        id: u64,
        totals: &BTreeMap<LeaveType, u32>,
    ) -> Result<User, StoreError> {
        let mut users = self.write();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound("User"))?;

        for (leave_type, total) in totals {
            let balance = user
                .leave_balances
                .entry(*leave_type)
                .or_insert(LeaveBalance { used: 0, total: 0 });
            balance.total = *total;
        }
        Ok(user.clone())
    }
}
