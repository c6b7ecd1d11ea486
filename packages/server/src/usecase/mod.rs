//! Use case layer: one struct per operation, with collaborators injected
//! as `Arc<dyn Trait>` so every use case is testable against mocks.

pub mod broadcast;
pub mod error;
pub mod join_room;
pub mod leave_room;
pub mod process_message;
pub mod room_status;
pub mod set_typing;
pub mod transcript;

pub use broadcast::RoomBroadcaster;
pub use error::{ErrorCode, GetTranscriptError, MessageFailure};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use process_message::{InboundMessage, ProcessMessageUseCase, ReplySettings};
pub use room_status::{RoomStatusUseCase, StatusSnapshot};
pub use set_typing::SetTypingUseCase;
pub use transcript::GetTranscriptUseCase;
