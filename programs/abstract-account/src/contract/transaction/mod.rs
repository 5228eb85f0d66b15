pub mod execute;
pub mod validation;
