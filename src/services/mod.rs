mod db_service;
mod password;
mod token;

pub use db_service::DbService;
pub use password::PasswordHasher;
pub use token::TokenService;

#[cfg(test)]
pub(crate) use db_service::tests::test_db;
#[cfg(test)]
pub(crate) use token::tests::test_auth_config;
