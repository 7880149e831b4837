//! Service implementations.
//!
//! One service per concern: catalog reads and writes, cart and
//! favorites, checkout. All of them share one [`Store`](cellar_store::Store)
//! handle and can be cloned freely across tasks.

pub mod cart_service;
pub mod catalog_service;
pub mod checkout_service;
