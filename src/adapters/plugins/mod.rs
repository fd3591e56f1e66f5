pub mod age_plugin;
