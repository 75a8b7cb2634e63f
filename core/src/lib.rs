pub use board::*;
pub use cell::*;
pub use countdown::*;
pub use error::*;
pub use events::*;
pub use generator::*;
pub use playback::*;
pub use policy::*;
pub use round::*;
pub use rules::*;
pub use scheduler::*;
pub use sequence::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod countdown;
mod error;
mod events;
mod generator;
mod playback;
mod policy;
mod round;
mod rules;
mod scheduler;
mod sequence;
mod session;
mod types;
