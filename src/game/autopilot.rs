// Scripted input for headless runs
//
// Flees the nearest close enemy (running, dashing when very close or when an
// enemy is mid-attack), otherwise walks to the nearest pickup. Presses the same actions a keyboard would.

use glam::Vec3;

use crate::engine::input::{Action, InputFrame, PlayerInput};
use crate::engine::prefs::PrefsStore;
use crate::engine::world::Environment;
use crate::game::enemies::CombatState;
use crate::game::session::GameSession;

/// Enemies closer than this are fled from
const FLEE_RADIUS: f32 = 6.0;
/// Enemies closer than this trigger a dash
const DASH_RADIUS: f32 = 3.0;
/// Axis dead zone when turning a direction into key presses
const AXIS_THRESHOLD: f32 = 0.25;

#[derive(Debug, Default)]
pub struct Autopilot {
    input: PlayerInput,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide this tick's keys from the session state
    pub fn steer<E: Environment, S: PrefsStore>(&mut self, session: &GameSession<E, S>) -> InputFrame {
        self.input.end_tick();

        let me = session.player().position();
        let nearest = |points: &mut dyn Iterator<Item = Vec3>| {
            points.min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)))
        };

        let threat = nearest(&mut session.enemies().iter().map(|e| e.position()))
            .filter(|p| p.distance(me) < FLEE_RADIUS);
        let goal = nearest(&mut session.collectables().iter().map(|c| c.position()));
        let under_attack = session
            .enemies()
            .iter()
            .any(|e| e.combat_state(me) == CombatState::Attacking);

        let direction = match (threat, goal) {
            (Some(threat), _) => me - threat,
            (None, Some(goal)) => goal - me,
            (None, None) => Vec3::ZERO,
        };

        self.hold(Action::MoveRight, direction.x > AXIS_THRESHOLD);
        self.hold(Action::MoveLeft, direction.x < -AXIS_THRESHOLD);
        self.hold(Action::MoveForward, direction.z > AXIS_THRESHOLD);
        self.hold(Action::MoveBack, direction.z < -AXIS_THRESHOLD);
        self.hold(Action::Run, threat.is_some());
        self.hold(
            Action::Dash,
            under_attack || threat.is_some_and(|t| t.distance(me) < DASH_RADIUS),
        );

        self.input.frame()
    }

    fn hold(&mut self, action: Action, held: bool) {
        if held {
            self.input.press(action);
        } else {
            self.input.release(action);
        }
    }
}
