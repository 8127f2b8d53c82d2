pub mod health;
pub mod pulls;
pub mod reviews;
pub mod teams;
pub mod users;
