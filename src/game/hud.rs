// HUD model: stamina bar, stat icons, text lines and panels
//
// Pure state for a host to draw. Nothing here renders.

use log::debug;

use crate::core::math::{approx_equal, lerp};
use crate::game::characters::{Player, PlayerState, StatField, UiTiers};
use crate::game::config::HudTuning;

/// Fill changes smaller than this do not restart the bar animation
const FILL_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
struct FillTransition {
    from: f32,
    to: f32,
    elapsed: f32,
}

/// Stamina bar that slides to its new fill over a short transition
#[derive(Debug, Clone, PartialEq)]
pub struct StaminaBar {
    fill: f32,
    target: f32,
    duration: f32,
    transition: Option<FillTransition>,
}

impl StaminaBar {
    pub fn new(initial: f32, duration: f32) -> Self {
        Self {
            fill: initial,
            target: initial,
            duration,
            transition: None,
        }
    }

    /// Fill currently drawn, in [0, 1]
    pub fn fill(&self) -> f32 {
        self.fill
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Point the bar at `target`. A different target cancels the running
    /// transition and starts a new one from the current fill.
    pub fn set_target(&mut self, target: f32) {
        let target = target.clamp(0.0, 1.0);
        if approx_equal(target, self.target, FILL_EPSILON) {
            return;
        }
        if self.transition.is_some() {
            debug!("Stamina bar transition restarted");
        }
        self.target = target;
        self.transition = Some(FillTransition {
            from: self.fill,
            to: target,
            elapsed: 0.0,
        });
    }

    pub fn update(&mut self, dt: f32) {
        let Some(transition) = &mut self.transition else {
            return;
        };
        transition.elapsed += dt;
        let t = if self.duration > 0.0 {
            (transition.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
        self.fill = lerp(transition.from, transition.to, t);
        if t >= 1.0 {
            self.transition = None;
        }
    }
}

/// Everything the HUD shows
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    stamina_bar: StaminaBar,
    icons: UiTiers,
    collected_text: String,
    timer_text: String,
    death_panel: bool,
    game_over_text: Option<String>,
}

impl Hud {
    pub fn new(tuning: &HudTuning, player: &Player) -> Self {
        let mut hud = Self {
            stamina_bar: StaminaBar::new(stamina_fill(player), tuning.stamina_transition),
            icons: UiTiers::default(),
            collected_text: String::new(),
            timer_text: String::new(),
            death_panel: false,
            game_over_text: None,
        };
        hud.refresh(player);
        hud
    }

    pub fn stamina_bar(&self) -> &StaminaBar {
        &self.stamina_bar
    }

    pub fn icons(&self) -> UiTiers {
        self.icons
    }

    pub fn collected_text(&self) -> &str {
        &self.collected_text
    }

    pub fn timer_text(&self) -> &str {
        &self.timer_text
    }

    pub fn death_panel_visible(&self) -> bool {
        self.death_panel
    }

    pub fn game_over_text(&self) -> Option<&str> {
        self.game_over_text.as_deref()
    }

    /// Per-tick update from the player's current state
    pub fn update(&mut self, player: &Player, dt: f32) {
        self.refresh(player);
        self.stamina_bar.update(dt);
    }

    fn refresh(&mut self, player: &Player) {
        let stats = player.stats();
        self.stamina_bar.set_target(stamina_fill(player));

        self.icons = stats.tiers();
        self.collected_text = format!("Collected: {}", stats.collected());
        self.timer_text = format!("Time: {}", self.icons.time_seconds);

        self.death_panel = player.state() == PlayerState::Dead;
        self.game_over_text = (player.state() == PlayerState::GameOver)
            .then(|| format!("Game Over!\nCollected Items: {}", stats.collected()));
    }
}

fn stamina_fill(player: &Player) -> f32 {
    let max = player.stats().max(StatField::Stamina);
    if max > 0.0 {
        player.stats().stamina() / max
    } else {
        0.0
    }
}
