pub mod stack;
pub mod stack_history;
pub mod stack_technology;
pub mod technology;
