pub mod console;
#[cfg(test)]
pub mod memory;
