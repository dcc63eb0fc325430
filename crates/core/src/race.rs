//! Race orchestration.
//!
//! A [`Race`] owns the players and their racecourses and advances them one
//! turn per [`Race::tick`]. On a shared track every live car leaves its
//! footprint on the course while the others move, so cars can crash into
//! each other; the footprints are wiped again before the tick returns.

use std::fmt;

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::course::Racecourse;
use crate::error::ConfigurationError;
use crate::player::{CarState, PlayerAgent};
use crate::surface::{InputSource, Surface};
use crate::types::{RaceConfig, TrackMode, MAX_CAR_SIZE, MAX_PLAYERS};

/// How a race ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceSummary {
    /// Turns elapsed, including the last one
    pub turns: u64,
    /// Final state of every player, by index
    pub outcomes: ArrayVec<CarState, MAX_PLAYERS>,
}

impl fmt::Display for RaceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Game finished after {} turns.", self.turns)
    }
}

#[derive(Debug)]
pub struct Race<S> {
    config: RaceConfig,
    time: u64,
    courses: Vec<Racecourse>,
    players: ArrayVec<PlayerAgent<S>, MAX_PLAYERS>,
    alive: ArrayVec<bool, MAX_PLAYERS>,
    rng: StdRng,
    summary: Option<RaceSummary>,
}

impl<S: Surface> Race<S> {
    /// Set up a race with one surface per player.
    ///
    /// The RNG is seeded from `config.seed` when given, so a seeded race
    /// replays identically for the same input.
    pub fn new(config: RaceConfig, surfaces: Vec<S>) -> Result<Self, ConfigurationError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, surfaces, rng)
    }

    pub fn with_rng(
        config: RaceConfig,
        surfaces: Vec<S>,
        mut rng: StdRng,
    ) -> Result<Self, ConfigurationError> {
        validate(&config, &surfaces)?;

        let courses = match config.track {
            TrackMode::Shared => vec![Racecourse::generate(&config, &mut rng)?],
            TrackMode::Similar => {
                let course = Racecourse::generate(&config, &mut rng)?;
                vec![course; config.player_count()]
            }
            TrackMode::Different => (0..config.player_count())
                .map(|_| Racecourse::generate(&config, &mut rng))
                .collect::<Result<_, _>>()?,
        };

        let mut players = ArrayVec::new();
        let mut alive = ArrayVec::new();
        for (index, surface) in surfaces.into_iter().enumerate() {
            let course = match config.track {
                TrackMode::Shared => 0,
                _ => index,
            };
            players.push(PlayerAgent::new(index, &config, course, surface));
            alive.push(true);
        }

        log::info!(
            "race started: {} player(s) on a {} track of {}x{}, car size {}",
            config.players,
            config.track.as_str(),
            config.race_length,
            config.race_width,
            config.car_size
        );

        Ok(Self {
            config,
            time: 0,
            courses,
            players,
            alive,
            rng,
            summary: None,
        })
    }

    /// Play one turn. Returns whether the race goes on.
    pub fn tick<I: InputSource + ?Sized>(&mut self, input: &mut I) -> bool {
        if self.summary.is_some() {
            return false;
        }
        self.time += 1;

        while let Some(key) = input.poll_key() {
            if key.is_quit() {
                log::info!("race aborted on turn {}", self.time);
                self.alive.iter_mut().for_each(|alive| *alive = false);
                continue;
            }
            for (player, &alive) in self.players.iter_mut().zip(self.alive.iter()) {
                if alive {
                    player.parse_input(key);
                }
            }
        }

        let shared = self.config.track == TrackMode::Shared;
        if shared {
            for (player, &alive) in self.players.iter().zip(self.alive.iter()) {
                if alive {
                    player.mark_position(&mut self.courses[0]);
                }
            }
        }

        for (player, alive) in self.players.iter_mut().zip(self.alive.iter_mut()) {
            if !*alive {
                continue;
            }
            let course = &mut self.courses[player.course_index()];
            if shared {
                player.unmark_position(course);
            }
            *alive = player.tick(self.time, course, &mut self.rng);
            if shared {
                player.mark_position(course);
            }
        }

        if shared {
            for player in &self.players {
                player.unmark_position(&mut self.courses[0]);
            }
        }

        if self.alive.iter().any(|&alive| alive) {
            return true;
        }

        let summary = RaceSummary {
            turns: self.time,
            outcomes: self.players.iter().map(|p| p.state()).collect(),
        };
        for (i, outcome) in summary.outcomes.iter().enumerate() {
            log::info!("player {}: {}", i + 1, outcome.as_str());
        }
        log::info!("{}", summary);
        self.summary = Some(summary);
        false
    }
}

impl<S> Race<S> {
    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    /// Turns played so far.
    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn players(&self) -> &[PlayerAgent<S>] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Option<&PlayerAgent<S>> {
        self.players.get(index)
    }

    pub fn player_mut(&mut self, index: usize) -> Option<&mut PlayerAgent<S>> {
        self.players.get_mut(index)
    }

    pub fn is_alive(&self, index: usize) -> bool {
        self.alive.get(index).copied().unwrap_or(false)
    }

    pub fn courses(&self) -> &[Racecourse] {
        &self.courses
    }

    /// The course player `index` drives on.
    pub fn course_for(&self, index: usize) -> Option<&Racecourse> {
        let player = self.players.get(index)?;
        self.courses.get(player.course_index())
    }

    pub fn course_for_mut(&mut self, index: usize) -> Option<&mut Racecourse> {
        let course = self.players.get(index)?.course_index();
        self.courses.get_mut(course)
    }

    /// Set once no player is left racing.
    pub fn summary(&self) -> Option<&RaceSummary> {
        self.summary.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.summary.is_some()
    }
}

fn validate<S: Surface>(config: &RaceConfig, surfaces: &[S]) -> Result<(), ConfigurationError> {
    if config.players == 0 || usize::from(config.players) > MAX_PLAYERS {
        return Err(ConfigurationError::PlayerCount(config.players));
    }
    if surfaces.len() != config.player_count() {
        return Err(ConfigurationError::SurfaceCount {
            expected: config.player_count(),
            got: surfaces.len(),
        });
    }
    if config.car_size == 0 || config.car_size > MAX_CAR_SIZE {
        return Err(ConfigurationError::CarSize(config.car_size));
    }
    if config.speed_base == 0 {
        return Err(ConfigurationError::SpeedBase);
    }
    for (name, value) in [("rock", config.rock_chance), ("turn", config.turn_chance)] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigurationError::Chance { name, value });
        }
    }
    if config.race_length <= config.car_size {
        return Err(ConfigurationError::CourseTooShort {
            length: config.race_length,
            car: config.car_size,
        });
    }
    for surface in surfaces {
        let (width, height) = surface.size();
        if config.race_width > width {
            return Err(ConfigurationError::TrackTooWide {
                track: config.race_width,
                pane: width,
            });
        }
        if height < config.car_size {
            return Err(ConfigurationError::PaneTooShort {
                pane: height,
                car: config.car_size,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::GridSurface;
    use crate::surface::KeyQueue;
    use crate::types::{Key, Terrain};

    fn config(players: u8, track: TrackMode) -> RaceConfig {
        RaceConfig {
            players,
            track,
            race_length: 100,
            race_width: 40,
            minimal_width: 10,
            car_size: 10,
            rock_chance: 0.0,
            turn_chance: 0.0,
            seed: Some(11),
            ..RaceConfig::default()
        }
    }

    fn panes(n: usize) -> Vec<GridSurface> {
        (0..n).map(|_| GridSurface::new(40, 24)).collect()
    }

    #[test]
    fn rejects_bad_setups() {
        let err = Race::new(config(3, TrackMode::Shared), panes(3)).unwrap_err();
        assert_eq!(err, ConfigurationError::PlayerCount(3));

        let err = Race::new(config(2, TrackMode::Shared), panes(1)).unwrap_err();
        assert_eq!(err, ConfigurationError::SurfaceCount { expected: 2, got: 1 });

        let narrow = vec![GridSurface::new(30, 24)];
        let err = Race::new(config(1, TrackMode::Shared), narrow).unwrap_err();
        assert_eq!(err, ConfigurationError::TrackTooWide { track: 40, pane: 30 });

        let short = vec![GridSurface::new(40, 8)];
        let err = Race::new(config(1, TrackMode::Shared), short).unwrap_err();
        assert_eq!(err, ConfigurationError::PaneTooShort { pane: 8, car: 10 });

        let cfg = RaceConfig {
            minimal_width: 41,
            ..config(1, TrackMode::Shared)
        };
        assert!(matches!(
            Race::new(cfg, panes(1)),
            Err(ConfigurationError::MinimalWidthTooLarge { .. })
        ));
    }

    #[test]
    fn course_per_track_mode() {
        let shared = Race::new(config(2, TrackMode::Shared), panes(2)).unwrap();
        assert_eq!(shared.courses().len(), 1);
        assert_eq!(shared.player(1).unwrap().course_index(), 0);

        let similar = Race::new(config(2, TrackMode::Similar), panes(2)).unwrap();
        assert_eq!(similar.courses().len(), 2);
        assert_eq!(similar.courses()[0], similar.courses()[1]);

        let cfg = RaceConfig {
            rock_chance: 0.5,
            turn_chance: 0.5,
            ..config(2, TrackMode::Different)
        };
        let different = Race::new(cfg, panes(2)).unwrap();
        assert_eq!(different.courses().len(), 2);
        assert_ne!(different.courses()[0], different.courses()[1]);
    }

    #[test]
    fn shared_start_positions_sit_side_by_side() {
        let race = Race::new(config(2, TrackMode::Shared), panes(2)).unwrap();
        assert_eq!(race.player(0).unwrap().position(), (90, 9));
        assert_eq!(race.player(1).unwrap().position(), (90, 20));
    }

    #[test]
    fn quit_ends_the_race_for_everyone() {
        let mut race = Race::new(config(2, TrackMode::Shared), panes(2)).unwrap();
        let mut keys = KeyQueue::new();
        assert!(race.tick(&mut keys));

        keys.extend([Key::Up, Key::Esc, Key::Left]);
        assert!(!race.tick(&mut keys));
        assert!(keys.is_empty(), "input is drained even after quitting");
        assert!(!race.is_alive(0) && !race.is_alive(1));

        let summary = race.summary().unwrap();
        assert_eq!(summary.turns, 2);
        assert_eq!(summary.to_string(), "Game finished after 2 turns.");
        assert!(summary.outcomes.iter().all(|&s| s == CarState::Cruising));

        let cells = race.courses()[0].cells();
        assert!(!cells.contains(&Terrain::Marker));
        assert!(!race.tick(&mut keys));
        assert_eq!(race.time(), 2);
    }

    #[test]
    fn shared_track_leaves_no_markers_behind() {
        let mut race = Race::new(config(2, TrackMode::Shared), panes(2)).unwrap();
        let mut keys = KeyQueue::new();
        for turn in 0..30 {
            if turn % 3 == 0 {
                keys.extend([Key::Up, Key::Char('w')]);
            }
            race.tick(&mut keys);
            assert!(!race.courses()[0].cells().contains(&Terrain::Marker));
        }
        assert!(race.is_alive(0) && race.is_alive(1));
    }

    #[test]
    fn crashed_player_freezes_while_the_other_drives_on() {
        let mut race = Race::new(config(2, TrackMode::Similar), panes(2)).unwrap();
        // Under the upper left corner of player 1's car after its first move.
        race.course_for_mut(1).unwrap().set(89, 20, Terrain::Rock);

        let mut keys = KeyQueue::new();
        assert!(race.tick(&mut keys));
        assert!(race.is_alive(0));
        assert!(!race.is_alive(1));
        assert_eq!(race.player(1).unwrap().state(), CarState::Crashed);

        let frozen = race.player(1).unwrap().position();
        for _ in 0..10 {
            keys.push(Key::Char('a'));
            assert!(race.tick(&mut keys));
        }
        assert_eq!(race.player(1).unwrap().position(), frozen);
        assert!(race.player(0).unwrap().position().0 < frozen.0);
    }

    #[test]
    fn cars_collide_on_a_shared_track() {
        let mut race = Race::new(config(2, TrackMode::Shared), panes(2)).unwrap();
        let mut keys = KeyQueue::new();
        let mut turns = 0;
        // Steer player 2 left into player 1.
        while race.tick(&mut keys) && turns < 100 {
            keys.push(Key::Char('a'));
            turns += 1;
        }
        assert!(
            race.players()
                .iter()
                .any(|p| p.state() == CarState::Crashed)
        );
        assert!(!race.courses()[0].cells().contains(&Terrain::Marker));
    }
}
