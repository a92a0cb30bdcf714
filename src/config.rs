use crate::consts;
use crate::engine::GameSettings;
use crate::server::Database;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Gameplay parameters
    #[serde(default)]
    pub(crate) game: GameSettings,

    /// Settings for the terminal game's connection to the score server
    #[serde(default)]
    pub(crate) client: ClientConfig,

    /// Settings for `snakeboard serve`
    #[serde(default)]
    pub(crate) server: ServerConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("snakeboard").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized or described an unplayable game.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawClientConfig")]
pub(crate) struct ClientConfig {
    /// Base URL of the score server
    pub(crate) server_url: String,

    /// Name to pre-fill in the name entry field
    pub(crate) player: Option<String>,

    /// Give up on score server requests that take longer than this
    pub(crate) request_timeout: Duration,

    log_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Return the file to write logs to while the game is running: the file
    /// given in the configuration or, if that is not set, the default log
    /// file path.  Return `None` if no path is configured and the default
    /// path could not be computed.
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::data_local_dir().map(|p| p.join("snakeboard").join("snakeboard.log"))
        })
    }
}

impl Default for ClientConfig {
    fn default() -> ClientConfig {
        ClientConfig {
            server_url: String::from(consts::DEFAULT_SERVER_URL),
            player: None,
            request_timeout: consts::REQUEST_TIMEOUT,
            log_file: None,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawClientConfig {
    server_url: String,
    player: Option<String>,
    request_timeout_ms: Option<u64>,
    log_file: Option<String>,
}

impl Default for RawClientConfig {
    fn default() -> RawClientConfig {
        RawClientConfig {
            server_url: String::from(consts::DEFAULT_SERVER_URL),
            player: None,
            request_timeout_ms: None,
            log_file: None,
        }
    }
}

impl TryFrom<RawClientConfig> for ClientConfig {
    type Error = std::io::Error;

    fn try_from(value: RawClientConfig) -> Result<ClientConfig, std::io::Error> {
        Ok(ClientConfig {
            server_url: value.server_url,
            player: value.player.filter(|s| !s.trim().is_empty()),
            request_timeout: value
                .request_timeout_ms
                .map_or(consts::REQUEST_TIMEOUT, Duration::from_millis),
            log_file: value.log_file.map(expanduser::expanduser).transpose()?,
        })
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawServerConfig")]
pub(crate) struct ServerConfig {
    /// Address & port to listen on
    pub(crate) bind: String,

    pub(crate) database: Database,
}

impl Default for ServerConfig {
    fn default() -> ServerConfig {
        ServerConfig {
            bind: String::from(consts::DEFAULT_BIND),
            database: Database::from(String::from(consts::DEFAULT_DATABASE)),
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawServerConfig {
    bind: String,
    database: String,
}

impl Default for RawServerConfig {
    fn default() -> RawServerConfig {
        RawServerConfig {
            bind: String::from(consts::DEFAULT_BIND),
            database: String::from(consts::DEFAULT_DATABASE),
        }
    }
}

impl TryFrom<RawServerConfig> for ServerConfig {
    type Error = std::io::Error;

    fn try_from(value: RawServerConfig) -> Result<ServerConfig, std::io::Error> {
        let database = if value.database == Database::MEMORY_NAME {
            Database::Memory
        } else {
            Database::File(expanduser::expanduser(value.database)?)
        };
        Ok(ServerConfig {
            bind: value.bind,
            database,
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Grid;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn load_str(s: &str) -> Result<Config, ConfigError> {
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        tmpfile.write_all(s.as_bytes()).unwrap();
        tmpfile.flush().unwrap();
        Config::load(tmpfile.path(), false)
    }

    #[test]
    fn missing_file_allowed() {
        let tmpdir = tempfile::tempdir().unwrap();
        let cfg = Config::load(&tmpdir.path().join("config.toml"), true).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn missing_file_not_allowed() {
        let tmpdir = tempfile::tempdir().unwrap();
        let r = Config::load(&tmpdir.path().join("config.toml"), false);
        assert!(matches!(r, Err(ConfigError::Read(_))));
    }

    #[test]
    fn empty_file() {
        assert_eq!(load_str("").unwrap(), Config::default());
    }

    #[test]
    fn full_file() {
        let cfg = load_str(concat!(
            "[game]\n",
            "columns = 40\n",
            "rows = 20\n",
            "food = 3\n",
            "reward = 10\n",
            "initial-speed-ms = 150\n",
            "speed-step-ms = 10\n",
            "min-speed-ms = 30\n",
            "\n",
            "[client]\n",
            "server-url = \"http://scores.local:8080\"\n",
            "player = \"alice\"\n",
            "request-timeout-ms = 2500\n",
            "log-file = \"/tmp/snakeboard.log\"\n",
            "\n",
            "[server]\n",
            "bind = \"0.0.0.0:8080\"\n",
            "database = \":memory:\"\n",
        ))
        .unwrap();
        assert_eq!(
            cfg,
            Config {
                game: GameSettings {
                    grid: Grid {
                        columns: 40,
                        rows: 20
                    },
                    food: 3,
                    reward: 10,
                    initial_speed: Duration::from_millis(150),
                    speed_step: Duration::from_millis(10),
                    min_speed: Duration::from_millis(30),
                },
                client: ClientConfig {
                    server_url: String::from("http://scores.local:8080"),
                    player: Some(String::from("alice")),
                    request_timeout: Duration::from_millis(2500),
                    log_file: Some(PathBuf::from("/tmp/snakeboard.log")),
                },
                server: ServerConfig {
                    bind: String::from("0.0.0.0:8080"),
                    database: Database::Memory,
                },
            }
        );
        assert_eq!(
            cfg.client.log_file(),
            Some(PathBuf::from("/tmp/snakeboard.log"))
        );
    }

    #[test]
    fn partial_game_table() {
        let cfg = load_str("[game]\nfood = 1\n").unwrap();
        assert_eq!(
            cfg.game,
            GameSettings {
                food: 1,
                ..GameSettings::default()
            }
        );
        assert_eq!(cfg.client, ClientConfig::default());
    }

    #[test]
    fn requests_time_out_by_default() {
        let cfg = load_str("[client]\nplayer = \"alice\"\n").unwrap();
        assert_eq!(cfg.client.request_timeout, consts::REQUEST_TIMEOUT);
    }

    #[test]
    fn blank_player_is_ignored() {
        let cfg = load_str("[client]\nplayer = \"  \"\n").unwrap();
        assert_eq!(cfg.client.player, None);
    }

    #[test]
    fn database_path() {
        let cfg = load_str("[server]\ndatabase = \"/srv/scores.db\"\n").unwrap();
        assert_eq!(
            cfg.server,
            ServerConfig {
                bind: String::from(consts::DEFAULT_BIND),
                database: Database::File(PathBuf::from("/srv/scores.db")),
            }
        );
    }

    #[test]
    fn unplayable_game() {
        let r = load_str("[game]\ncolumns = 2\nrows = 2\nfood = 10\n");
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn wrong_type() {
        let r = load_str("[client]\nrequest-timeout-ms = \"soon\"\n");
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }
}
