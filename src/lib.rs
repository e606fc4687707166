//! Pet store REST backend: pets, store orders and users over PostgreSQL.

pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;
pub mod uploads;

pub use error::{AppError, ConfigError};
pub use routes::{app, ApiDoc};
pub use service::{Gateway, OrderService, PetService, UserService};
pub use settings::Settings;
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_tables};
pub use uploads::{ImageStore, LocalImageStore};
