use crate::dao::UserDao;
use crate::model::User;
use ioc_beans::instance_provider::BeanPtr;
use ioc_beans::Bean;
use thiserror::Error;

pub type UserDaoPtr = BeanPtr<dyn UserDao + Send + Sync>;

#[derive(Error, Clone, Copy, Eq, PartialEq, Debug)]
pub enum UserServiceError {
    #[error("No user DAO has been injected")]
    MissingUserDao,
}

#[derive(Bean)]
pub struct UserService {
    #[bean(property = "userDAO")]
    user_dao: Option<BeanPtr<dyn UserDao + Send + Sync>>,
}

impl UserService {
    pub fn new(user_dao: UserDaoPtr) -> Self {
        Self {
            user_dao: Some(user_dao),
        }
    }

    pub fn user_dao(&self) -> Option<&UserDaoPtr> {
        self.user_dao.as_ref()
    }

    pub fn set_user_dao(&mut self, user_dao: UserDaoPtr) {
        self.user_dao = Some(user_dao);
    }

    /// Saves given user with the injected DAO.
    pub fn add(&self, user: &User) -> Result<(), UserServiceError> {
        let user_dao = self
            .user_dao
            .as_ref()
            .ok_or(UserServiceError::MissingUserDao)?;

        user_dao.save(user);
        Ok(())
    }
}
