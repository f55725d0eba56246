pub mod prompt;
pub mod providers;
pub mod recommendations;

pub use recommendations::generate_recommendations;
