pub mod decryptor;
pub mod logger;
pub mod permissions;
pub mod plugin;
