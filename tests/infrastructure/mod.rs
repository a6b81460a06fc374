mod reports;
mod storage;
