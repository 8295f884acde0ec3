pub mod breakers;
pub mod history;
pub mod locks;
pub mod personnel;
pub mod plans;
pub mod settings;
pub mod stats;
