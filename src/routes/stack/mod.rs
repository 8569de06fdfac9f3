pub mod add;
pub mod delete;
pub mod get;
pub mod history;
pub mod update;

pub use add::*;
pub use delete::*;
pub use get::*;
pub use history::*;
pub use update::*;
