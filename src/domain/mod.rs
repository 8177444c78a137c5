pub mod checkout;
pub mod errors;
pub mod ports;
pub mod product;
pub mod promotion;
