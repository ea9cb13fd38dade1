pub mod connection_sync;
pub mod mockdriver_sync;
pub mod reqwest_sync;
