pub mod expense;
pub mod group;
pub mod member;
pub mod settlement;
