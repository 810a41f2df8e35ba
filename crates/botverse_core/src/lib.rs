pub mod domain;
pub mod mode;
pub mod ports;
pub mod presenter;
pub mod session;

pub use domain::{
    BotId, BotSummary, EmbedCode, EmbedTokenRecord, EntryStatus, HistoryEntry, Role,
    TranscriptEntry,
};
pub use mode::{
    CreationMode, ModeSwitchGuard, SwitchOutcome, TransientNotice, MODE_SWITCH_NOTICE,
    NOTICE_CLEAR_DELAY,
};
pub use ports::{BotGateway, BotUpdate, DocumentUpload, PortError, PortResult, ScrapeRequest};
pub use presenter::{present, Reveal, RevealEvent, REVEAL_INTERVAL};
pub use session::{ChatSession, SessionError};
