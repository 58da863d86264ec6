pub mod initialize;
pub mod mint;
pub mod transfer;
pub mod withdraw;

pub use initialize::*;
pub use mint::*;
pub use transfer::*;
pub use withdraw::*;
