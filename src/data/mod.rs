mod load;
mod records;

pub use load::load_dataset;
pub use records::{AcStatus, Dataset, Record};
