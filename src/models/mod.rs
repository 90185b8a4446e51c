pub mod auth;
pub mod recipe;
pub mod report;

pub use auth::*;
pub use recipe::*;
pub use report::*;
