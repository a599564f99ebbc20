pub mod insights;
pub mod jobs;
pub mod tracker;
