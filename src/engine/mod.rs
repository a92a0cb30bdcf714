//! The game itself: grid, snake, food, collisions, and the loop that ties
//! them together.  Nothing in here knows about terminals or HTTP.
mod collision;
mod controller;
mod direction;
mod food;
mod grid;
mod presenter;
mod session;
mod settings;
mod snake;
pub(crate) use self::collision::Collision;
pub(crate) use self::controller::GameLoop;
pub(crate) use self::direction::Direction;
pub(crate) use self::grid::{Cell, Grid};
pub(crate) use self::presenter::{LoopState, Notice, Presenter, View};
pub(crate) use self::session::Session;
pub(crate) use self::settings::GameSettings;
