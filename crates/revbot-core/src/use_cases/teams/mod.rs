pub(crate) mod create_team;
pub(crate) mod get_team;

pub use create_team::CreateTeamInterface;
pub use get_team::GetTeamInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{create_team::MockCreateTeamInterface, get_team::MockGetTeamInterface};
