mod identity;
mod search;
mod settings;
mod summary;
mod tweet;

pub use identity::*;
pub use search::*;
pub use settings::*;
pub use summary::*;
pub use tweet::*;
