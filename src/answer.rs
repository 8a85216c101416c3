//! Answer generation over transcribed questions.
//!
//! An `AssistantSession` sits behind a pipeline as a transcript sink: each
//! incoming transcript is treated as a candidate question, answered through
//! an `AnswerGenerator`, and recorded in the session history so later
//! answers can use earlier exchanges as context.

use crate::defaults;
use crate::error::Result;
use crate::pipeline::sink::{TranscriptEvent, TranscriptSink};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One answered question in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

/// Trait for answer backends.
pub trait AnswerGenerator: Send {
    /// Produce an answer for `question`, given the prior exchanges of this
    /// session (oldest first).
    fn generate(&self, question: &str, history: &[Exchange]) -> Result<String>;
}

/// Mock generator for tests: echoes a canned template.
pub struct MockAnswerGenerator {
    template: String,
    should_fail: bool,
}

impl MockAnswerGenerator {
    /// Answers every question with `"{template}: {question}"`.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
            should_fail: false,
        }
    }

    /// Configure the mock to fail on every call.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl AnswerGenerator for MockAnswerGenerator {
    fn generate(&self, question: &str, _history: &[Exchange]) -> Result<String> {
        if self.should_fail {
            return Err(crate::error::StreamscribeError::AnswerGeneration {
                message: "mock generator failure".to_string(),
            });
        }
        Ok(format!("{}: {}", self.template, question))
    }
}

/// Transcript sink that answers each question as it arrives.
///
/// Transcripts shorter than the minimum question length are treated as
/// fragments and ignored. A generator failure skips the question without
/// ending the session.
pub struct AssistantSession<G: AnswerGenerator> {
    generator: G,
    history: Vec<Exchange>,
    min_question_chars: usize,
    log_path: Option<PathBuf>,
    quiet: bool,
}

impl<G: AnswerGenerator> AssistantSession<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            history: Vec::new(),
            min_question_chars: defaults::MIN_QUESTION_CHARS,
            log_path: None,
            quiet: false,
        }
    }

    /// Append every exchange to a plain-text log file.
    pub fn with_log_file(mut self, path: impl AsRef<Path>) -> Self {
        self.log_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Suppress terminal output (log file and history still update).
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Override the minimum question length.
    pub fn with_min_question_chars(mut self, chars: usize) -> Self {
        self.min_question_chars = chars;
        self
    }

    /// All exchanges answered so far, oldest first.
    pub fn exchanges(&self) -> &[Exchange] {
        &self.history
    }

    fn append_log(&self, exchange: &Exchange) -> Result<()> {
        let Some(path) = &self.log_path else {
            return Ok(());
        };
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "Q: {}", exchange.question)?;
        writeln!(file, "A: {}", exchange.answer)?;
        writeln!(file)?;
        Ok(())
    }
}

impl<G: AnswerGenerator> TranscriptSink for AssistantSession<G> {
    fn deliver(&mut self, event: &TranscriptEvent) -> Result<()> {
        let question = event.text.trim();
        if question.chars().count() < self.min_question_chars {
            return Ok(());
        }

        let answer = match self.generator.generate(question, &self.history) {
            Ok(answer) => answer,
            Err(e) => {
                eprintln!("answer generation failed: {}", e);
                return Ok(());
            }
        };

        if !self.quiet {
            println!("Q: {}", question);
            println!("A: {}\n", answer);
        }

        let exchange = Exchange {
            question: question.to_string(),
            answer,
        };
        self.append_log(&exchange)?;
        self.history.push(exchange);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn event(text: &str) -> TranscriptEvent {
        TranscriptEvent::new(text.to_string(), None, Duration::from_secs(1))
    }

    fn session(generator: MockAnswerGenerator) -> AssistantSession<MockAnswerGenerator> {
        AssistantSession::new(generator).quiet()
    }

    #[test]
    fn test_question_answered_and_recorded() {
        let mut session = session(MockAnswerGenerator::new("answer"));
        session
            .deliver(&event("what is the capital of austria"))
            .unwrap();

        assert_eq!(session.exchanges().len(), 1);
        assert_eq!(
            session.exchanges()[0].answer,
            "answer: what is the capital of austria"
        );
    }

    #[test]
    fn test_short_fragment_ignored() {
        let mut session = session(MockAnswerGenerator::new("answer"));
        session.deliver(&event("uh huh")).unwrap();

        assert!(session.exchanges().is_empty());
    }

    #[test]
    fn test_min_question_length_is_configurable() {
        let mut session =
            session(MockAnswerGenerator::new("answer")).with_min_question_chars(3);
        session.deliver(&event("why")).unwrap();

        assert_eq!(session.exchanges().len(), 1);
    }

    #[test]
    fn test_generator_failure_skips_question() {
        let mut session = session(MockAnswerGenerator::new("x").with_failure());
        session
            .deliver(&event("a perfectly reasonable question"))
            .unwrap();

        assert!(session.exchanges().is_empty());
    }

    #[test]
    fn test_history_accumulates_in_order() {
        let mut session = session(MockAnswerGenerator::new("answer"));
        session.deliver(&event("first real question")).unwrap();
        session.deliver(&event("second real question")).unwrap();

        let questions: Vec<&str> = session
            .exchanges()
            .iter()
            .map(|e| e.question.as_str())
            .collect();
        assert_eq!(questions, vec!["first real question", "second real question"]);
    }

    #[test]
    fn test_log_file_records_exchanges() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qa.log");

        let mut session =
            AssistantSession::new(MockAnswerGenerator::new("answer")).quiet().with_log_file(&path);
        session.deliver(&event("what time is the meeting")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Q: what time is the meeting"));
        assert!(contents.contains("A: answer: what time is the meeting"));
    }
}
