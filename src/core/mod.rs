pub mod chart;
pub mod errors;
pub mod models;
pub mod money;
pub mod service;
pub mod settlement;
pub mod validator;
