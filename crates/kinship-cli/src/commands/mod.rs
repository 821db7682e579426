//! Command implementations.

pub mod relations;
pub mod run;
pub mod seed;

pub use self::relations::execute_relations;
pub use self::run::execute_run;
pub use self::seed::execute_seed;
