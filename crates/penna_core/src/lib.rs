pub mod corpus;
pub mod error;
pub mod progress;
pub mod session;
pub mod store;
pub mod style;

pub use corpus::CorpusEntry;
pub use error::{CoreError, Result};
pub use progress::{ProgressEvent, ProgressSender, ProgressStage};
pub use session::{InterviewTurn, SessionRecord};
pub use store::{
    DocumentMeta, DocumentStore, FsDocumentStore, JsonFileSessionStore, SessionStore,
};
pub use style::CachedStyle;
