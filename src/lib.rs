//! restassured: reStructuredText-aware editing commands.
//!
//! Every command takes a text snapshot and a cursor and returns either a query answer or an
//! [`edit_plan::EditPlan`] for the host editor to apply. Nothing here touches a live buffer.

pub mod buffer;
pub mod command;
pub mod config;
pub mod edit_plan;
pub mod error;
pub mod footnote;
pub mod header;
pub mod header_tree;
pub mod indent_list;
pub mod inline;
pub mod roman;
pub mod smart_list;
pub mod table;
pub mod width;

pub use error::{Error, Result};
