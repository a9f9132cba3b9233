pub mod audit_request;
pub mod audit_response;
pub mod audit_route;
