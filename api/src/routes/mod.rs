pub mod audit;
pub mod health_route;
