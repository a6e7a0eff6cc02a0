//! A user service depending on a user DAO, wired by the container either in code or with a
//! descriptor.

pub mod dao;
pub mod model;
pub mod service;
pub mod wiring;
