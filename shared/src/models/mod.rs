//! Domain models and scoring for Pollen Watch

mod checklist;
mod forecast;
mod map;
mod pollen;
mod risk;
mod symptom;
mod weather;

pub use checklist::*;
pub use forecast::*;
pub use map::*;
pub use pollen::*;
pub use risk::*;
pub use symptom::*;
pub use weather::*;
