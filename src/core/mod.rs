mod channels;
pub mod errors;
mod gates;
mod measurements;
mod state;
pub mod utils;

pub use channels::BitFlipChannel;
pub use gates::Gate;
pub use measurements::{Basis, Measurement, MeasurementResult};
pub use state::{SymbolState, state_label};
