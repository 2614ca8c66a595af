pub mod tick_range;
pub mod wallet;

pub use tick_range::TickRange;
pub use wallet::WalletAddress;
