pub mod lookup;
pub mod player;
pub mod stats;

pub use lookup::{ComparedPlayer, Comparison, PlayerPage};
pub use player::{PlayerProfile, PlayerRecord};
pub use stats::{GameLine, SeasonLine};
