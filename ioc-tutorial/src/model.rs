use derive_more::Constructor;

#[derive(Constructor, Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct User {
    pub username: String,
    pub password: String,
}
