pub mod flows;
pub mod state;
