//! Settings loading for the binary.
//!
//! Layers, later ones win:
//!
//! 1. [`RaceConfig::default`]
//! 2. a JSON file named by `RACER_CONFIG` (unknown fields are rejected)
//! 3. `RACER_*` environment variables
//!
//! Widths left at 0 are filled in from the terminal size later, see
//! [`RaceConfig::resolved`].

use std::env;
use std::fmt::Display;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::types::{Controls, Key, RaceConfig, SplitAxis, TrackMode, MAX_PLAYERS};

pub const CONFIG_VAR: &str = "RACER_CONFIG";
pub const LOG_PATH_VAR: &str = "RACER_LOG_PATH";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub race: RaceConfig,
    /// Log file; logging is off without one
    pub log_path: Option<PathBuf>,
}

/// Key names of one player's bindings, e.g. `"up"` or `"w"`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlsFile {
    pub accelerate: Option<String>,
    pub brake: Option<String>,
    pub left: Option<String>,
    pub right: Option<String>,
}

/// Contents of the JSON settings file. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub frame_delay_ms: Option<u64>,
    pub split: Option<String>,
    pub track: Option<String>,
    pub race_length: Option<u16>,
    pub race_width: Option<u16>,
    pub minimal_width: Option<u16>,
    pub players: Option<u8>,
    pub car_glyph: Option<char>,
    pub car_size: Option<u16>,
    pub speed_base: Option<u16>,
    pub rock_chance: Option<f64>,
    pub turn_chance: Option<f64>,
    #[serde(default)]
    pub controls: Vec<ControlsFile>,
    pub seed: Option<u64>,
}

impl ConfigFile {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Overwrite every field present in the file.
    pub fn apply(&self, race: &mut RaceConfig) -> Result<()> {
        if let Some(v) = self.frame_delay_ms {
            race.frame_delay_ms = v;
        }
        if let Some(v) = &self.split {
            race.split = parse_split(v)?;
        }
        if let Some(v) = &self.track {
            race.track = parse_track(v)?;
        }
        if let Some(v) = self.race_length {
            race.race_length = v;
        }
        if let Some(v) = self.race_width {
            race.race_width = v;
        }
        if let Some(v) = self.minimal_width {
            race.minimal_width = v;
        }
        if let Some(v) = self.players {
            race.players = v;
        }
        if let Some(v) = self.car_glyph {
            race.car_glyph = v;
        }
        if let Some(v) = self.car_size {
            race.car_size = v;
        }
        if let Some(v) = self.speed_base {
            race.speed_base = v;
        }
        if let Some(v) = self.rock_chance {
            race.rock_chance = v;
        }
        if let Some(v) = self.turn_chance {
            race.turn_chance = v;
        }
        if self.controls.len() > MAX_PLAYERS {
            return Err(anyhow!(
                "controls given for {} players, at most {} supported",
                self.controls.len(),
                MAX_PLAYERS
            ));
        }
        for (controls, file) in race.controls.iter_mut().zip(&self.controls) {
            apply_controls(controls, file)?;
        }
        if self.seed.is_some() {
            race.seed = self.seed;
        }
        Ok(())
    }
}

fn apply_controls(controls: &mut Controls, file: &ControlsFile) -> Result<()> {
    let slots = [
        (&mut controls.accelerate, &file.accelerate),
        (&mut controls.brake, &file.brake),
        (&mut controls.left, &file.left),
        (&mut controls.right, &file.right),
    ];
    for (slot, name) in slots {
        if let Some(name) = name {
            *slot = Key::from_str(name).ok_or_else(|| anyhow!("unknown key name: {}", name))?;
        }
    }
    Ok(())
}

fn parse_split(s: &str) -> Result<SplitAxis> {
    SplitAxis::from_str(s)
        .ok_or_else(|| anyhow!("invalid split {:?}, expected vertical or horizontal", s))
}

fn parse_track(s: &str) -> Result<TrackMode> {
    TrackMode::from_str(s)
        .ok_or_else(|| anyhow!("invalid track {:?}, expected shared, similar or different", s))
}

/// Load settings from the process environment.
pub fn load() -> Result<Settings> {
    load_with(|name| env::var(name).ok())
}

/// Load settings reading variables through `var`.
pub fn load_with<F>(var: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| {
        var(name)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let mut race = RaceConfig::default();

    if let Some(path) = var(CONFIG_VAR) {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading settings file {}", path))?;
        ConfigFile::parse(&text)
            .and_then(|file| file.apply(&mut race))
            .with_context(|| format!("loading settings file {}", path))?;
    }

    if let Some(v) = parsed(&var, "RACER_PLAYERS")? {
        race.players = v;
    }
    if let Some(v) = parsed(&var, "RACER_LENGTH")? {
        race.race_length = v;
    }
    if let Some(v) = parsed(&var, "RACER_WIDTH")? {
        race.race_width = v;
    }
    if let Some(v) = parsed(&var, "RACER_MINIMAL_WIDTH")? {
        race.minimal_width = v;
    }
    if let Some(v) = parsed(&var, "RACER_CAR_SIZE")? {
        race.car_size = v;
    }
    if let Some(v) = parsed(&var, "RACER_SPEED_BASE")? {
        race.speed_base = v;
    }
    if let Some(v) = parsed(&var, "RACER_ROCKS")? {
        race.rock_chance = v;
    }
    if let Some(v) = parsed(&var, "RACER_TURNS")? {
        race.turn_chance = v;
    }
    if let Some(v) = parsed(&var, "RACER_DELAY_MS")? {
        race.frame_delay_ms = v;
    }
    if let Some(v) = var("RACER_TRACK") {
        race.track = parse_track(&v)?;
    }
    if let Some(v) = var("RACER_SPLIT") {
        race.split = parse_split(&v)?;
    }
    if let Some(v) = parsed(&var, "RACER_SEED")? {
        race.seed = Some(v);
    }

    Ok(Settings {
        race,
        log_path: var(LOG_PATH_VAR).map(PathBuf::from),
    })
}

fn parsed<T, F>(var: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    var(name)
        .map(|s| {
            s.parse::<T>()
                .map_err(|e| anyhow!("invalid {} value {:?}: {}", name, s, e))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let settings = load_with(env_of(&[])).unwrap();
        assert_eq!(settings.race, RaceConfig::default());
        assert_eq!(settings.log_path, None);
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = load_with(env_of(&[
            ("RACER_PLAYERS", "2"),
            ("RACER_TRACK", "different"),
            ("RACER_SPLIT", "Horizontal"),
            ("RACER_ROCKS", "0.1"),
            ("RACER_SEED", "42"),
            ("RACER_LOG_PATH", " /tmp/racer.log "),
            ("RACER_WIDTH", ""),
        ]))
        .unwrap();
        assert_eq!(settings.race.players, 2);
        assert_eq!(settings.race.track, TrackMode::Different);
        assert_eq!(settings.race.split, SplitAxis::Horizontal);
        assert_eq!(settings.race.rock_chance, 0.1);
        assert_eq!(settings.race.seed, Some(42));
        assert_eq!(settings.race.race_width, 0);
        assert_eq!(settings.log_path, Some(PathBuf::from("/tmp/racer.log")));
    }

    #[test]
    fn invalid_values_are_errors() {
        let err = load_with(env_of(&[("RACER_CAR_SIZE", "big")])).unwrap_err();
        assert!(err.to_string().contains("RACER_CAR_SIZE"));

        let err = load_with(env_of(&[("RACER_TRACK", "oval")])).unwrap_err();
        assert!(err.to_string().contains("oval"));
    }

    #[test]
    fn config_file_fields_apply() {
        let file = ConfigFile::parse(
            r#"{
                "race_length": 300,
                "car_glyph": "A",
                "track": "similar",
                "controls": [{}, {"left": "j", "right": "l"}]
            }"#,
        )
        .unwrap();
        let mut race = RaceConfig::default();
        file.apply(&mut race).unwrap();
        assert_eq!(race.race_length, 300);
        assert_eq!(race.car_glyph, 'A');
        assert_eq!(race.track, TrackMode::Similar);
        assert_eq!(race.controls[0], Controls::for_player(0));
        assert_eq!(race.controls[1].left, Key::Char('j'));
        assert_eq!(race.controls[1].accelerate, Key::Char('w'));
    }

    #[test]
    fn config_file_rejects_unknown_fields() {
        assert!(ConfigFile::parse(r#"{"lives": 3}"#).is_err());
        let file = ConfigFile::parse(r#"{"controls": [{"left": "ctrl"}]}"#).unwrap();
        assert!(file.apply(&mut RaceConfig::default()).is_err());
    }

    #[test]
    fn environment_wins_over_file() {
        let path = env::temp_dir().join(format!("tui-racer-settings-{}.json", std::process::id()));
        fs::write(&path, r#"{"players": 2, "car_size": 6}"#).unwrap();
        let settings = load_with(env_of(&[
            ("RACER_CONFIG", path.to_str().unwrap()),
            ("RACER_CAR_SIZE", "4"),
        ]))
        .unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(settings.race.players, 2);
        assert_eq!(settings.race.car_size, 4);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_with(env_of(&[("RACER_CONFIG", "/nonexistent/racer.json")])).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/racer.json"));
    }
}
