pub mod error;
pub mod protocol;
pub mod score;
pub mod transaction;

pub use error::*;
pub use protocol::*;
pub use score::*;
pub use transaction::*;
