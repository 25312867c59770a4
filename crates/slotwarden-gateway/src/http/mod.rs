pub mod health;
pub mod proxy;
pub mod slots;
