pub mod report;
pub mod timestamp;
