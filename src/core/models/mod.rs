pub mod decrypt_command;
pub mod decrypt_entry;
pub mod entry_record;
