pub mod observability;
pub mod reports;
pub mod storage;
pub mod transcribers;
