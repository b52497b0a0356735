pub mod application;
pub mod auth;
pub mod error;
pub mod health;
pub mod job;
pub mod profile;
pub mod state;
pub mod upload;
pub mod validation;

#[cfg(test)]
mod tests;
