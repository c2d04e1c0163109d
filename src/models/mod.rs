//! Domain models

pub mod blacklist;
pub mod checkout;
pub mod enums;
pub mod equipment;
pub mod team;
