//! rusty-blog/crates/services/src/lib.rs
//!
//! Use-case logic over the domain ports. Services own every guard and
//! ownership rule; adapters stay free of business decisions.

pub mod accounts;
pub mod blogs;

pub use accounts::AccountService;
pub use blogs::BlogService;
