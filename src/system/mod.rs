pub(crate) mod bluetooth;
pub(crate) mod config;
pub(crate) mod events;
pub(crate) mod time;
