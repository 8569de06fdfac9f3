pub mod add;
pub mod list;
pub mod suggest;

pub use add::*;
pub use list::*;
pub use suggest::*;
