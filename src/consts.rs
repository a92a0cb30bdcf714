//! Assorted constants & hard-coded configuration
use crate::engine::Grid;
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// Size of the playing field in cells
pub(crate) const GRID: Grid = Grid {
    columns: 29,
    rows: 25,
};

/// The number of pieces of food on the board at once
pub(crate) const FOOD_COUNT: usize = 5;

/// Points awarded for each piece of food eaten
pub(crate) const FOOD_REWARD: u32 = 100;

/// Time between movements of the snake at the start of a game
pub(crate) const INITIAL_SPEED: Duration = Duration::from_millis(200);

/// How much faster the snake moves after each piece of food
pub(crate) const SPEED_STEP: Duration = Duration::from_millis(5);

/// The snake never moves more often than this
pub(crate) const MIN_SPEED: Duration = Duration::from_millis(50);

/// Time between frames while a game is running.  The snake itself moves
/// less often; see [`INITIAL_SPEED`].
pub(crate) const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// How long to wait for input when no game is running before checking for
/// leaderboard updates
pub(crate) const IDLE_POLL_PERIOD: Duration = Duration::from_millis(100);

/// How long the game waits on a score server request before giving up on it
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Number of entries on the leaderboard
pub(crate) const LEADERBOARD_SIZE: u32 = 10;

/// Maximum length of a player name, in grapheme clusters
pub(crate) const MAX_NAME_LENGTH: usize = 16;

/// Default address for the score server to listen on
pub(crate) const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Default URL of the score server
pub(crate) const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Default database for the score server
pub(crate) const DEFAULT_DATABASE: &str = "snakeboard.db";

/// Environment variable for configuring log filtering
pub(crate) const LOG_ENV_VAR: &str = "SNAKEBOARD_LOG";

/// Log filter to use when [`LOG_ENV_VAR`] is not set
pub(crate) const DEFAULT_LOG_FILTER: &str = "snakeboard=info,tower_http=info";

/// Terminal columns used to draw one cell of the grid
pub(crate) const CELL_WIDTH: u16 = 2;

/// Width of the panel beside the board showing the leaderboard
pub(crate) const SIDEBAR_WIDTH: u16 = 26;

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the player name being typed
pub(crate) const NAME_FIELD_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for notices about something having gone wrong
pub(crate) const PROBLEM_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for informational notices
pub(crate) const NOTICE_STYLE: Style = Style::new().fg(Color::LightCyan);
