//! Parlor chat server: multi-user rooms over WebSocket with an AI
//! responder replying to every accepted message.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parlor-server
//! cargo run --bin parlor-server -- --host 0.0.0.0 --port 3000 --responder-url http://127.0.0.1:8500
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use parlor_server::{
    domain::{MessagePolicy, PresenceRegistry},
    infrastructure::{HttpResponder, InMemoryTurnStore, TaskDispatcher, WebSocketEventPusher},
    ui::{AppState, Server},
    usecase::{
        GetTranscriptUseCase, JoinRoomUseCase, LeaveRoomUseCase, ProcessMessageUseCase,
        ReplySettings, RoomBroadcaster, RoomStatusUseCase, SetTypingUseCase,
    },
};
use parlor_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "parlor-server")]
#[command(about = "WebSocket chat server with an AI responder", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Base URL of the text-generation backend
    #[arg(long, default_value = "http://127.0.0.1:8500")]
    responder_url: String,

    /// Minimum accepted message length, in characters
    #[arg(long, default_value = "1")]
    min_message_chars: usize,

    /// Maximum accepted message length, in characters
    #[arg(long, default_value = "2000")]
    max_message_chars: usize,

    /// Terms rejected by the message screen (case-insensitive substrings)
    #[arg(long = "blocked-term", default_values_t = vec!["spam".to_string(), "scam".to_string()])]
    blocked_terms: Vec<String>,

    /// Reply length bound forwarded to the responder, in characters
    #[arg(long, default_value = "1000")]
    max_reply_chars: usize,

    /// Bound on one responder call, in seconds
    #[arg(long, default_value = "30")]
    reply_timeout_secs: u64,

    /// Maximum number of replies generated concurrently
    #[arg(long, default_value = "8")]
    max_concurrent_replies: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger("debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Presence registry, turn store, event pusher, responder, dispatcher
    // 2. Broadcaster
    // 3. UseCases
    // 4. AppState
    // 5. Server

    let clock = Arc::new(SystemClock);

    // 1. Collaborators
    let presence = Arc::new(PresenceRegistry::new(clock.clone()));
    let turn_store = Arc::new(InMemoryTurnStore::new());
    let event_pusher = Arc::new(WebSocketEventPusher::new());
    let responder = Arc::new(HttpResponder::new(
        args.responder_url.clone(),
        args.max_reply_chars,
    ));
    let dispatcher = Arc::new(TaskDispatcher::new(args.max_concurrent_replies));

    // 2. Room fan-out over presence + pusher
    let broadcaster = RoomBroadcaster::new(presence.clone(), event_pusher.clone());

    // 3. UseCases
    let policy = MessagePolicy::new(
        args.min_message_chars,
        args.max_message_chars,
        args.blocked_terms.clone(),
    );
    let settings = ReplySettings {
        reply_timeout: Duration::from_secs(args.reply_timeout_secs),
        ..ReplySettings::default()
    };
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        presence.clone(),
        broadcaster.clone(),
    ));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
        presence.clone(),
        broadcaster.clone(),
    ));
    let set_typing_usecase = Arc::new(SetTypingUseCase::new(
        presence.clone(),
        broadcaster.clone(),
    ));
    let process_message_usecase = Arc::new(ProcessMessageUseCase::new(
        policy,
        turn_store.clone(),
        responder.clone(),
        broadcaster,
        dispatcher,
        clock,
        settings,
    ));
    let room_status_usecase = Arc::new(RoomStatusUseCase::new(
        presence.clone(),
        turn_store.clone(),
    ));
    let get_transcript_usecase = Arc::new(GetTranscriptUseCase::new(turn_store));

    // 4. AppState
    let state = Arc::new(AppState {
        join_room_usecase,
        leave_room_usecase,
        set_typing_usecase,
        process_message_usecase,
        room_status_usecase,
        get_transcript_usecase,
        presence,
        event_pusher,
        responder,
    });

    // 5. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
