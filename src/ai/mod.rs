//! Computer opponent
//!
//! - `planner`: pure geometric search for a pocketing shot
//! - `think`: the delayed, cancellable controller that turns a plan into a shot

pub mod planner;
pub mod think;

pub use planner::{PlannedShot, default_shot, is_path_clear, perturb, plan_shot, targets};
pub use think::{AiController, ThinkTask};
