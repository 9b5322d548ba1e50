pub mod churn;
pub mod cli;
pub mod error;
pub mod git;
pub mod html;
pub mod model;
pub mod report;
pub mod server;
