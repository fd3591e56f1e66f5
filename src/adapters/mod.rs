pub mod cipher;
pub mod logging;
pub mod permissions;
pub mod plugins;
