mod errors;
mod interface;

pub use errors::{DatabaseError, Result};
pub use interface::DbService;
#[cfg(any(test, feature = "testkit"))]
pub use interface::MockDbService;
