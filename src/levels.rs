use bevy::prelude::*;
use bevy::utils::HashMap;
use serde::{Deserialize, Serialize};

use crate::assets::{LevelAsset, LevelAssetLoader};
use crate::lander::{Lander, LanderConfig};

const MAX_LEVELS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub lander: LanderConfig,
}

impl LevelConfig {
    pub fn from_ron(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::de::from_str(content)
    }
}

#[derive(Default, Resource)]
pub struct LevelManager {
    pub levels: HashMap<usize, LevelConfig>,
    pub available_levels: Vec<(usize, String)>, // (level number, name), sorted by number
    loading: bool,
    #[allow(dead_code)]
    handles: Vec<Handle<LevelAsset>>, // Keep handles alive
}

impl LevelManager {
    pub fn new() -> Self {
        Self {
            levels: HashMap::default(),
            available_levels: Vec::new(),
            loading: true,
            handles: Vec::new(),
        }
    }

    pub fn insert_level(&mut self, level_num: usize, config: LevelConfig) {
        // A hot-reloaded file replaces the earlier entry
        self.available_levels.retain(|(num, _)| *num != level_num);
        self.available_levels.push((level_num, config.name.clone()));
        self.available_levels.sort_by_key(|(num, _)| *num);
        self.levels.insert(level_num, config);
    }

    pub fn get_level(&self, number: usize) -> Option<LevelConfig> {
        self.levels.get(&number).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn mark_loaded(&mut self) {
        self.loading = false;
    }
}

#[derive(Resource)]
pub struct CurrentLevel {
    pub number: usize,
    pub config: LevelConfig,
}

impl CurrentLevel {
    pub fn spawn_lander(&self) -> Lander {
        Lander::new(self.config.lander.clone())
    }

    /// Picks up a reloaded copy of this level; the next reset uses it.
    pub fn refresh(&mut self, level_num: usize, config: &LevelConfig) -> bool {
        if level_num != self.number || *config == self.config {
            return false;
        }
        self.config = config.clone();
        true
    }
}

/// Pulls the `N` out of a `levelN.ron` file name.
pub fn level_number(file_name: &str) -> Option<usize> {
    file_name
        .strip_prefix("level")?
        .strip_suffix(".ron")?
        .parse()
        .ok()
}

// Level files that fail to parse never get here; the asset server logs them
pub fn load_levels(
    mut level_manager: ResMut<LevelManager>,
    asset_server: Res<AssetServer>,
    level_assets: Res<Assets<LevelAsset>>,
    mut ev_asset: EventReader<AssetEvent<LevelAsset>>,
    mut current_level: Option<ResMut<CurrentLevel>>,
) {
    for ev in ev_asset.read() {
        let AssetEvent::LoadedWithDependencies { id } = ev else {
            continue;
        };
        let (Some(asset), Some(path)) = (level_assets.get(*id), asset_server.get_path(*id)) else {
            continue;
        };
        let Some(num) = path
            .path()
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(level_number)
        else {
            warn!("ignoring {path}: not named levelN.ron");
            continue;
        };

        info!("loaded level {num} ({}) from {path}", asset.0.name);
        if let Some(current) = current_level.as_deref_mut() {
            if current.refresh(num, &asset.0) {
                info!("level {num} changed on disk; reset to fly the new version");
            }
        }
        level_manager.insert_level(num, asset.0.clone());
    }

    if level_manager.is_loading() && !level_manager.available_levels.is_empty() {
        level_manager.mark_loaded();
    }
}

#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameLoadState {
    #[default]
    Loading,
    Ready,
}

// Plugin to set up the level system
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameLoadState>()
            .init_asset::<LevelAsset>()
            .init_asset_loader::<LevelAssetLoader>()
            .add_systems(Startup, setup_levels)
            .add_systems(Update, load_levels)
            .add_systems(
                Update,
                check_loading_complete.run_if(in_state(GameLoadState::Loading)),
            );
    }
}

// Level 0 is the entry point; nothing starts until it has arrived
fn check_loading_complete(
    level_manager: Res<LevelManager>,
    mut next_state: ResMut<NextState<GameLoadState>>,
    mut commands: Commands,
) {
    if !level_manager.is_loading() {
        if let Some(config) = level_manager.get_level(0) {
            let current = CurrentLevel { number: 0, config };
            commands.insert_resource(current.spawn_lander());
            commands.insert_resource(current);
            next_state.set(GameLoadState::Ready);
        }
    }
}

fn setup_levels(mut commands: Commands, asset_server: Res<AssetServer>) {
    let mut level_manager = LevelManager::new();

    // Missing files just log an asset error and never show up
    for i in 0..=MAX_LEVELS {
        let path = format!("levels/level{}.ron", i);
        let handle = asset_server.load::<LevelAsset>(path);
        level_manager.handles.push(handle);
    }

    commands.insert_resource(level_manager);
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = r#"(
        name: "First Descent",
        description: "Drop straight down onto the pad.",
        lander: (
            x: 64.0,
            y: 60.0,
            fuel: 40.0,
        ),
    )"#;

    #[test]
    fn parses_partial_lander_config() {
        let level = LevelConfig::from_ron(LEVEL).unwrap();
        assert_eq!(level.name, "First Descent");
        assert_eq!(level.lander.x, 64.0);
        assert_eq!(level.lander.y, 60.0);
        assert_eq!(level.lander.fuel, 40.0);
        // untouched fields keep their defaults
        assert_eq!(level.lander.gravity_acceleration, -1.0);
        assert_eq!(level.lander.thruster_acceleration, 10.0);
        assert_eq!(level.lander.rotation_motor_acceleration, 0.7);
        assert_eq!(level.lander.dtheta, 0.0);
    }

    #[test]
    fn name_is_required() {
        assert!(LevelConfig::from_ron("(description: \"nameless\")").is_err());
    }

    #[test]
    fn manager_lists_levels_in_order() {
        let mut manager = LevelManager::new();
        manager.insert_level(2, LevelConfig::from_ron("(name: \"Two\")").unwrap());
        manager.insert_level(0, LevelConfig::from_ron(LEVEL).unwrap());
        manager.insert_level(1, LevelConfig::from_ron("(name: \"One\")").unwrap());

        let numbers: Vec<usize> = manager.available_levels.iter().map(|(n, _)| *n).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
        assert_eq!(manager.get_level(1).map(|l| l.name), Some("One".to_string()));
    }

    #[test]
    fn reloading_a_level_replaces_it() {
        let mut manager = LevelManager::new();
        manager.insert_level(0, LevelConfig::from_ron("(name: \"Old\")").unwrap());
        manager.insert_level(0, LevelConfig::from_ron("(name: \"New\")").unwrap());
        assert_eq!(manager.available_levels, vec![(0, "New".to_string())]);
    }

    #[test]
    fn malformed_level_is_rejected() {
        assert!(LevelConfig::from_ron("(name: ").is_err());
        assert!(LevelManager::new().get_level(3).is_none());
    }

    #[test]
    fn level_numbers_from_file_names() {
        assert_eq!(level_number("level0.ron"), Some(0));
        assert_eq!(level_number("level12.ron"), Some(12));
        assert_eq!(level_number("level.ron"), None);
        assert_eq!(level_number("levelx.ron"), None);
        assert_eq!(level_number("stage1.ron"), None);
        assert_eq!(level_number("level1.txt"), None);
    }

    #[test]
    fn current_level_spawns_configured_lander() {
        let current = CurrentLevel {
            number: 0,
            config: LevelConfig::from_ron(LEVEL).unwrap(),
        };
        let lander = current.spawn_lander();
        assert_eq!(lander.position().y, 60.0);
        assert_eq!(lander.fuel_remaining(), 40.0);
    }

    #[test]
    fn reloaded_current_level_is_used_on_next_spawn() {
        let mut current = CurrentLevel {
            number: 0,
            config: LevelConfig::from_ron(LEVEL).unwrap(),
        };
        let mut edited = current.config.clone();
        edited.lander.y = 80.0;

        assert!(!current.refresh(1, &edited));
        assert_eq!(current.spawn_lander().position().y, 60.0);

        assert!(current.refresh(0, &edited));
        assert_eq!(current.spawn_lander().position().y, 80.0);
        assert!(!current.refresh(0, &edited));
    }
}
