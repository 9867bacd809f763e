// Scene requests and menu glue
//
// The host owns scene loading. Game code only queues requests here and the
// host drains them between frames.

use std::collections::VecDeque;
use std::fmt;

/// Logical scene identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    MainMenu,
    Game,
}

impl SceneId {
    /// Name the host uses to look the scene up
    pub fn name(&self) -> &'static str {
        match self {
            Self::MainMenu => "MainMenu",
            Self::Game => "Game",
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Something the host must do on our behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRequest {
    Load(SceneId),
    Quit,
}

/// Tracks the active scene and queued requests
#[derive(Debug)]
pub struct SceneDirector {
    current: SceneId,
    pending: VecDeque<SceneRequest>,
}

impl SceneDirector {
    pub fn new(initial: SceneId) -> Self {
        Self {
            current: initial,
            pending: VecDeque::new(),
        }
    }

    pub fn current(&self) -> SceneId {
        self.current
    }

    pub fn request(&mut self, request: SceneRequest) {
        log::info!("Scene request: {:?}", request);
        self.pending.push_back(request);
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Hand the next request to the host. Load requests update `current`.
    pub fn next_request(&mut self) -> Option<SceneRequest> {
        let request = self.pending.pop_front()?;
        if let SceneRequest::Load(scene) = request {
            self.current = scene;
        }
        Some(request)
    }
}

impl Default for SceneDirector {
    fn default() -> Self {
        Self::new(SceneId::MainMenu)
    }
}

/// Main menu buttons
#[derive(Debug, Default)]
pub struct MenuManager;

impl MenuManager {
    pub fn play(&self, director: &mut SceneDirector) {
        director.request(SceneRequest::Load(SceneId::Game));
    }

    pub fn exit(&self, director: &mut SceneDirector) {
        director.request(SceneRequest::Quit);
    }
}

/// In-game menu buttons and the settings panel
#[derive(Debug, Default)]
pub struct GameMenu {
    settings_open: bool,
}

impl GameMenu {
    /// Settings panel starts hidden
    pub fn new() -> Self {
        Self::default()
    }

    pub fn back(&self, director: &mut SceneDirector) {
        director.request(SceneRequest::Load(SceneId::MainMenu));
    }

    pub fn exit(&self, director: &mut SceneDirector) {
        director.request(SceneRequest::Quit);
    }

    pub fn toggle_settings(&mut self) {
        self.settings_open = !self.settings_open;
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open
    }
}
