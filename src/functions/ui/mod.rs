pub mod component;
pub mod pagination;
pub mod prompt;
