pub mod dashboard;
pub mod dispatch;
pub mod project;
pub mod review;
pub mod shared;
