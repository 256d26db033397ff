use actix_web::web;

use crate::middleware::AuthGate;

pub mod auth;
pub mod user;

/// Capability a route group demands from the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reachable without a credential
    Public,
    /// Wrapped with the auth gate; handlers see a verified [`crate::extractors::Identity`]
    RequiresIdentity,
}

/// One route group: a path prefix, its access requirement, and the routes
/// registered under it.
pub struct RouteGroup {
    pub prefix: &'static str,
    pub access: Access,
    configure: fn(&mut web::ServiceConfig),
}

/// Static partition of the API into public and protected groups. Determined
/// here at registration time, never by request content.
pub fn route_table() -> Vec<RouteGroup> {
    vec![
        RouteGroup {
            prefix: "/api/auth",
            access: Access::Public,
            configure: auth::configure_routes,
        },
        RouteGroup {
            prefix: "/api/user",
            access: Access::RequiresIdentity,
            configure: user::configure_routes,
        },
    ]
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(crate::health::configure_routes);

    for group in route_table() {
        match group.access {
            Access::Public => {
                cfg.service(web::scope(group.prefix).configure(group.configure));
            }
            Access::RequiresIdentity => {
                cfg.service(
                    web::scope(group.prefix)
                        .wrap(AuthGate)
                        .configure(group.configure),
                );
            }
        }
    }
}
