//! Systems - logic that operates on components

mod animation;
mod death;
mod enemy;
mod player;
mod probes;

pub use animation::*;
pub use death::*;
pub use enemy::*;
pub use player::*;
pub use probes::*;
