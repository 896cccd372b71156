pub mod history;
pub mod pagination;
pub mod template;

pub use history::*;
pub use pagination::*;
pub use template::*;
