pub mod access_jwt;
pub mod factory;
pub mod scope;

#[cfg(test)]
pub mod testing;

pub use access_jwt::AuthService;
pub use factory::build_auth_service;
