pub mod decrypt_service;
pub mod dispatcher;
pub mod normalizer;
pub mod preconditions;
