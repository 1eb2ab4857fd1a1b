pub mod password_hash_string;
pub mod timestamp;
