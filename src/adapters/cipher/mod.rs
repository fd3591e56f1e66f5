pub mod age_cli;
#[cfg(test)]
pub mod fake_age;
