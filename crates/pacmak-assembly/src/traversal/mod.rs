pub mod cursor;
pub mod visitor;
pub mod walker;

pub use cursor::Cursor;
pub use visitor::Visitor;
pub use walker::*;
