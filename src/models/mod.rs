mod stack;
mod stack_history;
mod technology;
pub mod user;

pub use stack::*;
pub use stack_history::*;
pub use technology::*;
pub use user::*;
