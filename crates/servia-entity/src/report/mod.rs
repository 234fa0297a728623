pub mod model;

pub use model::TechnicalReport;
