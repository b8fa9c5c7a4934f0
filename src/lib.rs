//! areamap - Name, measure and exchange WGS84 polygons as KML

pub mod codec;
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod session;
pub mod shapes;
