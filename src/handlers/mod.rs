pub mod auth;
pub mod emissions;
pub mod factors;
