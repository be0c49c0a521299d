pub mod assessment;
pub mod health;
pub mod report;
pub mod server;
