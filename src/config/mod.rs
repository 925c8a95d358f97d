// Variable bindings loaded from files and command-line assignments

pub mod variables_file;

pub use variables_file::{parse_assignment, VariablesFile};
