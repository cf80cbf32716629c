pub mod account;
pub mod alert;
pub mod fx;
pub mod payment;
pub mod ports;
pub mod transaction;
