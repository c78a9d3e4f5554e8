pub mod account;
pub use account::*;

pub mod lamports;
pub use lamports::*;
