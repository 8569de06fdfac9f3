pub mod stack;
pub mod technology;
pub mod user;

pub use user::UserForm;
