mod route_guards;

pub use route_guards::{protect_route, protect_service_route, Claims, SERVICE_ROLE_HEADER};
