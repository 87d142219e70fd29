// Domain layer: the chart tables, request/response models and the ports to external services.

pub mod catalog;
pub mod model;
pub mod ports;
