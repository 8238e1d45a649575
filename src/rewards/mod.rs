//! Rewards and crafting.
//!
//! After a won match the run is offered a few things it does not have
//! yet: artifacts it does not own and recipes it has not learned.
//! Learned recipes can later be crafted by consuming the artifacts they
//! require.

pub mod draw;
pub mod craft;

pub use draw::{draw_rewards, reward_pool, RewardCandidate};
pub use craft::{check_craft, commit_craft, CraftCheck, RequirementStatus};
