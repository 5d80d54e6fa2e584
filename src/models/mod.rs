pub mod analysis;
pub mod catalog;
pub mod error;
pub mod forecast;
pub mod fund;
pub mod health;
pub mod market;
pub mod performers;
pub mod recommendation;
pub mod series;
pub mod wire;
