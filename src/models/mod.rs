pub mod purchase;
pub mod transaction;

pub use purchase::Purchase;
pub use transaction::Transaction;
