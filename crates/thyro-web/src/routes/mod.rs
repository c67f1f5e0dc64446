pub mod form;
pub mod page;
pub mod patients;
pub mod session;
