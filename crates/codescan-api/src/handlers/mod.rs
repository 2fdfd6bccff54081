pub mod decode;
pub mod health;
