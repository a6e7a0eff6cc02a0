//! Persistence of [User]s.

use crate::model::User;
use ioc_beans::{bean_alias, injectable, Bean};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

#[injectable]
pub trait UserDao {
    fn save(&self, user: &User);
}

/// Stand-in storage, which only reports saved users.
#[derive(Bean, Debug)]
pub struct UserDaoImpl {
    #[bean(ignore)]
    saved: AtomicUsize,
}

impl UserDaoImpl {
    pub fn saved_count(&self) -> usize {
        self.saved.load(Ordering::SeqCst)
    }
}

#[bean_alias]
impl UserDao for UserDaoImpl {
    fn save(&self, user: &User) {
        self.saved.fetch_add(1, Ordering::SeqCst);
        info!(username = user.username.as_str(), "user saved!");
    }
}
