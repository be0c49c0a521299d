pub mod entities;
pub mod metrics;
pub mod paginator;
pub mod ports;
pub mod services;

pub use entities::*;
pub use ports::*;
