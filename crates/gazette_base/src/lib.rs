pub mod error;
pub mod pal;
pub mod tracing;

pub use error::{ErrorKind, GazetteError, GazetteResult, ResultExt};
pub use pal::{MockPal, Pal, PalHandle, RealPal};
