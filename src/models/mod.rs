mod diagnosis;
pub mod lenient;
mod result;
mod symptom;

pub use diagnosis::*;
pub use result::*;
pub use symptom::*;
