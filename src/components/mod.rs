pub mod optimizer;
pub mod schedule;
pub mod storage;
