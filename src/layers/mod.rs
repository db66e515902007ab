pub mod manager;
pub mod pushpin;
pub mod pushpin_layer;
