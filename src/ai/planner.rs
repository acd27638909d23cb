//! Geometric shot planner
//!
//! For each target coin and each pocket, find the ghost-ball contact point that
//! sends the coin into the pocket, put the striker on the baseline as close
//! to straight behind it as the baseline allows, and check both legs of the
//! shot for blocking pieces. The first shot that passes is taken; there is no
//! ranking between valid shots.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::rotate;
use crate::sim::entity::Entity;
use crate::sim::geometry::{ghost_ball, segment_distance_interior};
use crate::sim::state::{GameState, QueenState, Turn};

/// A shot found by the planner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedShot {
    /// Striker center on the baseline
    pub striker_pos: Vec2,
    /// Ideal (unperturbed) striker velocity
    pub velocity: Vec2,
    pub target_id: u32,
    /// Index into the board's pocket list
    pub pocket: usize,
}

/// Pieces `side` may aim at, in entity order: its own coins, plus the queen
/// while nobody has claimed it.
pub fn targets(state: &GameState, side: Turn) -> Vec<&Entity> {
    let color = state.color_of(side);
    let queen_open = !matches!(state.queen, QueenState::Claimed(_));
    state
        .entities
        .iter()
        .filter(|e| e.is_active() && !e.is_striker())
        .filter(|e| e.is_coin_of(color) || (e.is_queen() && queen_open))
        .collect()
}

/// True when no active piece (other than the striker and `ignore`) sits
/// within twice its radius of the segment's interior
pub fn is_path_clear(state: &GameState, start: Vec2, end: Vec2, ignore: u32) -> bool {
    state
        .entities
        .iter()
        .filter(|e| e.is_active() && !e.is_striker() && e.id != ignore)
        .all(|e| {
            segment_distance_interior(start, end, e.pos)
                .is_none_or(|d| d >= e.radius * CLEARANCE_FACTOR)
        })
}

/// Search targets, then pockets, for the first clear shot
pub fn plan_shot(state: &GameState, side: Turn) -> Option<PlannedShot> {
    let striker_radius = state.striker().radius;
    let baseline_y = state.board.baseline_y(side);

    for target in targets(state, side) {
        for (pocket_idx, &pocket) in state.board.pockets().iter().enumerate() {
            let impact = ghost_ball(target.pos, pocket, target.radius + striker_radius);
            let striker_pos = Vec2::new(state.board.clamp_baseline_x(impact.x), baseline_y);

            let approach = impact - striker_pos;
            if approach.length() == 0.0 {
                continue;
            }
            if !is_path_clear(state, striker_pos, impact, target.id) {
                continue;
            }
            if !is_path_clear(state, target.pos, pocket, target.id) {
                continue;
            }

            let travel = approach.length() + target.pos.distance(pocket);
            let power = (SHOT_POWER_BASE + travel / SHOT_POWER_DIVISOR).min(SHOT_POWER_CAP);
            let velocity = approach.normalize_or_zero() * power;

            log::debug!(
                "{} plans coin {} into pocket {} (power {:.1})",
                side.as_str(),
                target.id,
                pocket_idx,
                power
            );
            return Some(PlannedShot {
                striker_pos,
                velocity,
                target_id: target.id,
                pocket: pocket_idx,
            });
        }
    }

    None
}

/// Fallback when nothing is open: straight up the board from the baseline spot
pub fn default_shot(state: &GameState, side: Turn) -> Vec2 {
    state.board.forward(side) * DEFAULT_SHOT_SPEED
}

/// Rotate `velocity` by a uniformly random angle within ±`max_degrees`
pub fn perturb<R: Rng>(velocity: Vec2, max_degrees: f32, rng: &mut R) -> Vec2 {
    if max_degrees <= 0.0 {
        return velocity;
    }
    let error = rng.random_range(-max_degrees..=max_degrees);
    rotate(velocity, error.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Side;
    use crate::sim::state::GameConfig;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn layout(coins: Vec<Entity>) -> GameState {
        let mut entities = vec![
            Entity::striker(0, Vec2::ZERO),
            // Queen parked out of every line used below
            Entity::queen(0, Vec2::new(700.0, 700.0)),
        ];
        entities.extend(coins);
        GameState::with_layout(GameConfig::default(), entities).unwrap()
    }

    #[test]
    fn test_targets_include_open_queen() {
        let mut state = layout(vec![
            Entity::coin(0, Vec2::new(300.0, 300.0), Side::Black),
            Entity::coin(0, Vec2::new(500.0, 300.0), Side::White),
        ]);
        let ids: Vec<u32> = targets(&state, Turn::Ai).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);

        state.queen = QueenState::Claimed(Turn::Player);
        let ids: Vec<u32> = targets(&state, Turn::Ai).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_single_reachable_target() {
        // Black coin below the AI baseline, straight line to the top-left pocket
        let mut state = layout(vec![Entity::coin(0, Vec2::new(250.0, 250.0), Side::Black)]);
        state.queen = QueenState::Claimed(Turn::Player);
        state.entities[1].capture();

        let shot = plan_shot(&state, Turn::Ai).expect("shot should be found");
        let (lo, hi) = state.board.baseline_x_range();
        assert!(shot.striker_pos.x >= lo && shot.striker_pos.x <= hi);
        assert_eq!(shot.striker_pos.y, state.board.baseline_y(Turn::Ai));
        assert!(shot.velocity.is_finite());
        assert!(shot.velocity.length() > 0.0);
        assert!(shot.velocity.length() <= SHOT_POWER_CAP);
        assert_eq!(shot.target_id, 2);
        assert_eq!(shot.pocket, 0);
    }

    #[test]
    fn test_blocked_pocket_is_skipped() {
        let mut state = layout(vec![
            Entity::coin(0, Vec2::new(250.0, 250.0), Side::Black),
            // White coin on the line to the top-left pocket
            Entity::coin(0, Vec2::new(150.0, 150.0), Side::White),
        ]);
        state.queen = QueenState::Claimed(Turn::Player);
        state.entities[1].capture();

        let shot = plan_shot(&state, Turn::Ai).expect("another pocket is open");
        assert_ne!(shot.pocket, 0);
    }

    #[test]
    fn test_blocked_striker_approach_is_skipped() {
        let mut state = layout(vec![
            Entity::coin(0, Vec2::new(250.0, 250.0), Side::Black),
            // White coin between the baseline and the top-left contact point
            Entity::coin(0, Vec2::new(274.0, 210.0), Side::White),
        ]);
        state.queen = QueenState::Claimed(Turn::Player);
        state.entities[1].capture();

        let target = state.entities[2].pos;
        let pocket = state.board.pockets()[0];
        let impact = ghost_ball(target, pocket, COIN_RADIUS + STRIKER_RADIUS);
        let striker_pos = Vec2::new(impact.x, state.board.baseline_y(Turn::Ai));
        assert!(is_path_clear(&state, target, pocket, 2));
        assert!(!is_path_clear(&state, striker_pos, impact, 2));

        let shot = plan_shot(&state, Turn::Ai).expect("a later pocket is open");
        assert_eq!(shot.target_id, 2);
        assert_eq!(shot.pocket, 2);
    }

    #[test]
    fn test_no_targets_means_no_shot() {
        let mut state = layout(vec![Entity::coin(0, Vec2::new(250.0, 250.0), Side::White)]);
        state.queen = QueenState::Claimed(Turn::Player);
        state.entities[1].capture();
        assert!(plan_shot(&state, Turn::Ai).is_none());
    }

    #[test]
    fn test_path_clear() {
        let state = layout(vec![Entity::coin(0, Vec2::new(400.0, 400.0), Side::White)]);
        let a = Vec2::new(400.0, 200.0);
        let b = Vec2::new(400.0, 600.0);
        assert!(!is_path_clear(&state, a, b, u32::MAX));
        // The coin itself can be ignored
        assert!(is_path_clear(&state, a, b, 2));
        // Passing 28+ units away is clear
        assert!(is_path_clear(&state, Vec2::new(430.0, 200.0), Vec2::new(430.0, 600.0), u32::MAX));
    }

    #[test]
    fn test_default_shot_points_at_center() {
        let state = layout(vec![]);
        assert_eq!(default_shot(&state, Turn::Ai), Vec2::new(0.0, 20.0));
        assert_eq!(default_shot(&state, Turn::Player), Vec2::new(0.0, -20.0));
    }

    #[test]
    fn test_zero_error_is_exact() {
        let mut rng = Pcg32::seed_from_u64(7);
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(perturb(v, 0.0, &mut rng), v);
    }

    proptest! {
        #[test]
        fn prop_perturbation_stays_within_bound(
            seed in any::<u64>(),
            angle in 0.0f32..std::f32::consts::TAU,
            speed in 1.0f32..60.0,
            level in 0usize..3,
        ) {
            let max = [5.0f32, 2.0, 0.5][level];
            let mut rng = Pcg32::seed_from_u64(seed);
            let ideal = rotate(Vec2::X, angle) * speed;
            let executed = perturb(ideal, max, &mut rng);

            let deviation = crate::signed_angle(ideal, executed).to_degrees().abs();
            prop_assert!(deviation <= max + 1e-3);
            prop_assert!((executed.length() - speed).abs() < 1e-3 * speed);
        }
    }
}
