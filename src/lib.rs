// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod duration;
pub mod input;
pub mod logging;
pub mod passage;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod timer;
pub mod ui;

pub use app::{App, Control};
pub use duration::{InvalidDuration, TestDuration};
pub use passage::{Corpus, CorpusError};
pub use session::{FocusTrigger, Phase, Results, TypingSession};
