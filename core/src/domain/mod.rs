pub mod assessment;
pub mod common;
pub mod report;
