pub mod generate;
pub mod search;
pub mod validate;
