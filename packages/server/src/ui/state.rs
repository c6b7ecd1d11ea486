//! Server state shared across connection handlers.

use std::sync::Arc;

use crate::domain::{EventPusher, PresenceRegistry, Responder};
use crate::usecase::{
    GetTranscriptUseCase, JoinRoomUseCase, LeaveRoomUseCase, ProcessMessageUseCase,
    RoomStatusUseCase, SetTypingUseCase,
};

/// Shared application state
pub struct AppState {
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub set_typing_usecase: Arc<SetTypingUseCase>,
    pub process_message_usecase: Arc<ProcessMessageUseCase>,
    pub room_status_usecase: Arc<RoomStatusUseCase>,
    pub get_transcript_usecase: Arc<GetTranscriptUseCase>,
    /// Live presence state; handlers refresh user activity on traffic.
    pub presence: Arc<PresenceRegistry>,
    /// Connection registry; handlers register/unregister their channel here.
    pub event_pusher: Arc<dyn EventPusher>,
    /// Surfaced in the health endpoint.
    pub responder: Arc<dyn Responder>,
}
