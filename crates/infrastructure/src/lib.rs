//! doh-bridge infrastructure: DNS wire handling, bootstrap and the DoH JSON client.
pub mod dns;
pub mod doh;
