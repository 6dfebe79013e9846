mod global;
mod rpc;
mod transaction;

pub use global::*;
pub use rpc::*;
pub use transaction::*;
