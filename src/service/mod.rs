//! Domain services over the storage gateway.

pub mod assembler;
pub mod gateway;
mod orders;
pub mod password;
mod pets;
pub mod rows;
mod validation;
mod users;

pub use gateway::{ExecOutcome, Gateway};
pub use orders::OrderService;
pub use pets::PetService;
pub use users::UserService;
pub use validation::RequestValidator;
