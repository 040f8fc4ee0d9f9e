pub mod analyzers;
pub mod error;
pub mod generator;
pub mod output;
pub mod record;
pub mod report;

pub use error::CommuteError;
pub use record::{CommuteRecord, CommuteRecordSet};
