pub mod constants;
pub mod params;
pub mod rectifier;
pub mod surface;
