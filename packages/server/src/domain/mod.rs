//! Domain layer: value objects, entities, presence state, message
//! screening, and the gateway traits the use cases depend on.
//!
//! Concrete gateway implementations live in the infrastructure layer
//! (dependency inversion): the domain defines the interfaces it needs.

pub mod entity;
pub mod error;
pub mod presence;
pub mod pusher;
pub mod responder;
pub mod turn_store;
pub mod validation;
pub mod value_object;

pub use entity::ChatTurn;
pub use error::{PushError, ResponderError, TurnStoreError, ValueError};
pub use presence::PresenceRegistry;
pub use pusher::{EventPusher, PusherChannel};
pub use responder::Responder;
pub use turn_store::TurnStore;
pub use validation::{MessagePolicy, ValidationOutcome};
pub use value_object::{AuthorRole, ConnectionId, RoomId, Timestamp, UserId};

#[cfg(test)]
pub use responder::MockResponder;
#[cfg(test)]
pub use turn_store::MockTurnStore;
