pub mod access_log;
pub mod auth_gate;
pub mod cross_origin;

pub use access_log::AccessLog;
pub use auth_gate::AuthGate;
pub use cross_origin::CrossOrigin;
