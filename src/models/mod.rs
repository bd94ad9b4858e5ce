pub mod search;
pub mod user;

pub use search::*;
pub use user::*;
