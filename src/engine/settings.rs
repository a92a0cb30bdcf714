use super::grid::Grid;
use crate::consts;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Gameplay parameters fixed for the lifetime of a [`GameLoop`][super::GameLoop]
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawGameSettings")]
pub(crate) struct GameSettings {
    pub(crate) grid: Grid,

    /// Number of pieces of food on the board at once
    pub(crate) food: usize,

    /// Points awarded per piece of food eaten
    pub(crate) reward: u32,

    /// Time between ticks at the start of a game
    pub(crate) initial_speed: Duration,

    /// How much the time between ticks shrinks per piece of food eaten
    pub(crate) speed_step: Duration,

    /// The shortest allowed time between ticks
    pub(crate) min_speed: Duration,
}

impl GameSettings {
    /// Check that a game can be started with these settings
    pub(crate) fn validate(self) -> Result<GameSettings, SettingsError> {
        if self.grid.columns == 0 || self.grid.rows == 0 {
            return Err(SettingsError::EmptyGrid);
        }
        // One cell for the snake, the rest for the food:
        if self.food >= self.grid.capacity() {
            return Err(SettingsError::TooMuchFood {
                food: self.food,
                capacity: self.grid.capacity(),
            });
        }
        if self.min_speed > self.initial_speed {
            return Err(SettingsError::SpeedRange);
        }
        Ok(self)
    }

    /// The tick interval after eating one piece of food at `speed`.  Never
    /// longer than `speed` and never shorter than `min_speed` unless `speed`
    /// already is.
    pub(crate) fn speed_up(&self, speed: Duration) -> Duration {
        if speed <= self.min_speed {
            speed
        } else {
            speed.saturating_sub(self.speed_step).max(self.min_speed)
        }
    }
}

impl Default for GameSettings {
    fn default() -> GameSettings {
        GameSettings {
            grid: consts::GRID,
            food: consts::FOOD_COUNT,
            reward: consts::FOOD_REWARD,
            initial_speed: consts::INITIAL_SPEED,
            speed_step: consts::SPEED_STEP,
            min_speed: consts::MIN_SPEED,
        }
    }
}

/// The `[game]` table of the configuration file
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawGameSettings {
    columns: u16,
    rows: u16,
    food: usize,
    reward: u32,
    initial_speed_ms: u64,
    speed_step_ms: u64,
    min_speed_ms: u64,
}

impl Default for RawGameSettings {
    fn default() -> RawGameSettings {
        let settings = GameSettings::default();
        let millis = |d: Duration| u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        RawGameSettings {
            columns: settings.grid.columns,
            rows: settings.grid.rows,
            food: settings.food,
            reward: settings.reward,
            initial_speed_ms: millis(settings.initial_speed),
            speed_step_ms: millis(settings.speed_step),
            min_speed_ms: millis(settings.min_speed),
        }
    }
}

impl TryFrom<RawGameSettings> for GameSettings {
    type Error = SettingsError;

    fn try_from(value: RawGameSettings) -> Result<GameSettings, SettingsError> {
        GameSettings {
            grid: Grid {
                columns: value.columns,
                rows: value.rows,
            },
            food: value.food,
            reward: value.reward,
            initial_speed: Duration::from_millis(value.initial_speed_ms),
            speed_step: Duration::from_millis(value.speed_step_ms),
            min_speed: Duration::from_millis(value.min_speed_ms),
        }
        .validate()
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum SettingsError {
    #[error("grid must have at least one column and one row")]
    EmptyGrid,
    #[error("{food} pieces of food do not fit on a grid of {capacity} cells alongside the snake")]
    TooMuchFood { food: usize, capacity: usize },
    #[error("minimum speed must not be greater than initial speed")]
    SpeedRange,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_are_valid() {
        let settings = GameSettings::default();
        assert_eq!(settings.validate(), Ok(settings));
    }

    #[rstest]
    #[case(Duration::from_millis(200), Duration::from_millis(195))]
    #[case(Duration::from_millis(53), Duration::from_millis(50))]
    #[case(Duration::from_millis(50), Duration::from_millis(50))]
    #[case(Duration::from_millis(40), Duration::from_millis(40))]
    fn test_speed_up(#[case] before: Duration, #[case] after: Duration) {
        assert_eq!(GameSettings::default().speed_up(before), after);
    }

    #[test]
    fn too_much_food() {
        let settings = GameSettings {
            grid: Grid {
                columns: 2,
                rows: 2,
            },
            food: 4,
            ..GameSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::TooMuchFood {
                food: 4,
                capacity: 4
            })
        );
    }

    #[test]
    fn empty_grid() {
        let settings = GameSettings {
            grid: Grid {
                columns: 0,
                rows: 2,
            },
            ..GameSettings::default()
        };
        assert_eq!(settings.validate(), Err(SettingsError::EmptyGrid));
    }

    #[test]
    fn raw_defaults_round_trip() {
        assert_eq!(
            GameSettings::try_from(RawGameSettings::default()),
            Ok(GameSettings::default())
        );
    }

    #[test]
    fn inverted_speed_range() {
        let settings = GameSettings {
            min_speed: Duration::from_millis(300),
            ..GameSettings::default()
        };
        assert_eq!(settings.validate(), Err(SettingsError::SpeedRange));
    }
}
