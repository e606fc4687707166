//! Domain types exposed over HTTP. Field names serialize as camelCase.

mod order;
mod pet;
mod user;

pub use order::{Order, OrderInput, OrderStatus};
pub use pet::{Category, CategoryRef, Pet, PetInput, PetPatch, PetStatus, Tag, TagInput};
pub use user::{User, UserInput};
