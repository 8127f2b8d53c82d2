pub(crate) mod check_health;

pub use check_health::CheckHealthInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::check_health::MockCheckHealthInterface;
