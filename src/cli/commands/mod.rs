pub mod list;
pub mod measure;
pub mod run;

pub use list::*;
pub use measure::*;
pub use run::*;
