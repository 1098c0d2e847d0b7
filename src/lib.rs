//! Timed quiz sessions: a countdown, a single-winner submission path and
//! pure scoring, plus the terminal front end built on top of them.

pub mod cli;
pub mod clock;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod score;
pub mod session;
pub mod source;
pub mod state;
pub mod submission;
pub mod telemetry;
pub mod timer;
pub mod tui;
pub mod ui;

pub use clock::Clock;
pub use error::QuizError;
pub use model::{Attempt, AttemptStatus, Difficulty, Question, QuizDefinition};
pub use score::{score, Score};
pub use session::QuizSession;
pub use submission::{QuizResult, SessionListener, SubmissionCoordinator, SubmitOutcome, Trigger};
pub use timer::{CountdownTimer, TimerEvent, Urgency};
