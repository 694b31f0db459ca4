pub mod error;
pub mod exec;
pub mod parse;
pub mod schema;
pub mod validate;
