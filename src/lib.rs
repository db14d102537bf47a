pub mod config;
pub mod draw;
pub mod error;
pub mod load;
pub mod proc;

pub use error::{Error, LoadError, Result};
pub use proc::{next_state, Cell, Change, ChangeKind, Coord, Field};
