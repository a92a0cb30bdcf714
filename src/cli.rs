use lexopt::{Arg, Parser, ValueExt};
use std::path::PathBuf;

pub(crate) const USAGE: &str = "\
Usage:
    snakeboard [--config FILE] [play] [--server URL] [--name NAME]
    snakeboard [--config FILE] serve [--bind ADDR] [--database PATH]

Play snake in the terminal and compete on a shared leaderboard.

Commands:
    play        Play the game (default)
    serve       Run the score server

Options:
    -c, --config FILE     Read configuration from FILE
        --server URL      [play] Score server to report to
        --name NAME       [play] Pre-fill the player name
        --bind ADDR       [serve] Address to listen on
        --database PATH   [serve] SQLite database file, or :memory:
    -h, --help            Show this help and exit
    -V, --version         Show the program version and exit
";

/// Parsed command line
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Cli {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Arguments {
    /// Configuration file given on the command line, if any
    pub(crate) config: Option<PathBuf>,
    pub(crate) mode: Mode,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Mode {
    Play {
        server: Option<String>,
        name: Option<String>,
    },
    Serve {
        bind: Option<String>,
        database: Option<String>,
    },
}

impl Default for Mode {
    fn default() -> Mode {
        Mode::Play {
            server: None,
            name: None,
        }
    }
}

impl Cli {
    pub(crate) fn from_env() -> Result<Cli, lexopt::Error> {
        Cli::from_parser(Parser::from_env())
    }

    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut args = Arguments::default();
        let mut chose_mode = false;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if !chose_mode => {
                    args.mode = match value.string()?.as_str() {
                        "play" => Mode::default(),
                        "serve" => Mode::Serve {
                            bind: None,
                            database: None,
                        },
                        other => {
                            return Err(lexopt::Error::Custom(
                                format!("unknown command {other:?}").into(),
                            ))
                        }
                    };
                    chose_mode = true;
                }
                Arg::Long("server") => match args.mode {
                    Mode::Play { ref mut server, .. } => *server = Some(parser.value()?.string()?),
                    Mode::Serve { .. } => return Err(arg.unexpected()),
                },
                Arg::Long("name") => match args.mode {
                    Mode::Play { ref mut name, .. } => *name = Some(parser.value()?.string()?),
                    Mode::Serve { .. } => return Err(arg.unexpected()),
                },
                Arg::Long("bind") => match args.mode {
                    Mode::Serve { ref mut bind, .. } => *bind = Some(parser.value()?.string()?),
                    Mode::Play { .. } => return Err(arg.unexpected()),
                },
                Arg::Long("database") => match args.mode {
                    Mode::Serve {
                        ref mut database, ..
                    } => *database = Some(parser.value()?.string()?),
                    Mode::Play { .. } => return Err(arg.unexpected()),
                },
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }
}
