pub mod page;
pub mod stack;
pub mod stack_history;
pub mod technology;

pub use page::Page;
