pub mod feed;
pub mod report;
pub mod verdict;
