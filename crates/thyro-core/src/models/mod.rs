pub mod appointment;
pub mod patient;
pub mod prediction;
pub mod record;
pub mod value;
