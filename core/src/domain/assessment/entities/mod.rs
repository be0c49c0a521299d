pub mod assessment;
pub mod parsed_result;

pub use assessment::*;
pub use parsed_result::*;
