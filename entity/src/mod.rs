//! Database entities
//!
//! Tables are created from these definitions at startup, see `db::create_schema` in the server crate.

pub mod prelude;

pub mod city;
pub mod picnic;
pub mod picnic_registration;
pub mod user;
