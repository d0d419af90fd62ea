pub mod config;
pub mod consts;
pub mod core_types;
pub mod corpus;
pub mod error;
pub mod geometry;
pub mod history;
pub mod keycodes;
pub mod layout;
pub mod optimizer;
pub mod scorer;
pub mod wordlist;
// cmd and reports are binary modules, declared in main.rs.
