pub mod confusion;
pub mod report;
pub mod uplift;
