//! Room browsing and saved-stay bookings.
//!
//! The presentation layer owns a [`filter::Filter`] and passes it to
//! [`filter::apply`] against a [`catalog::Catalog`]; it uses [`pricing`] for
//! live totals and to gate confirmation, and hands confirmed stays to a
//! [`store::BookingStore`], which mirrors its collection to a
//! [`kv::KeyValueStore`].

pub mod catalog;
pub mod config;
pub mod filter;
pub mod kv;
pub mod labels;
pub mod model;
pub mod observability;
pub mod pricing;
pub mod store;
