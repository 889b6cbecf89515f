mod logs;
mod validation;

pub use self::logs::init_logger;
pub use self::validation::format_validation_errors;
