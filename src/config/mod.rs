pub mod install_config;
