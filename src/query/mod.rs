pub mod ast;
pub mod field;
pub mod matcher;
pub mod builder;
