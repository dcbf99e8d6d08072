pub mod combine;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod reconcile;
pub mod table;
pub mod views;
