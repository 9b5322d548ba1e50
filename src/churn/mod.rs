pub mod aggregate;
pub mod exec;
pub mod parse;
pub mod rank;

pub use aggregate::aggregate;
pub use exec::exec;
pub use parse::{parse, EXCLUDED_FILES};
pub use rank::rank;
