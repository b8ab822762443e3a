pub mod insight;
pub mod token;
pub mod tracking;
pub mod user;

pub use insight::*;
pub use token::*;
pub use tracking::*;
pub use user::*;
