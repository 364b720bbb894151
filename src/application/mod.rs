pub mod builders;
pub mod formatter;
pub mod services;
