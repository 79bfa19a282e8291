//! Inbound message orchestration.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::InterpretError;
use crate::models::record::TransactionRecord;
use crate::phrase::PhraseInterpreter;

use super::{replies, LedgerDirectory, LedgerStore, MessageSender};

/// What happened to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    /// A row was appended.
    Recorded(TransactionRecord),
    /// The text could not be interpreted.
    Rejected(InterpretError),
    /// The chat has no ledger location.
    Unregistered,
    /// A chat command was answered.
    Command(ChatCommand),
    /// A collaborator failed; the user got a generic notice.
    Failed(String),
}

/// Slash commands understood by the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    Start,
    Help,
    Recent,
}

impl ChatCommand {
    fn parse(text: &str) -> Option<Self> {
        let word = text.strip_prefix('/')?.split_whitespace().next().unwrap_or("");
        // "/start@my_bot" addresses a specific bot in group chats
        let word = word.split('@').next().unwrap_or(word);
        Some(match word {
            "start" => ChatCommand::Start,
            "ultimos" | "últimos" => ChatCommand::Recent,
            _ => ChatCommand::Help,
        })
    }
}

/// Routes chat messages through the interpreter into the ledger.
///
/// Every failure is answered with a reply and reported in the returned
/// outcome; nothing escapes, so one bad message never affects the next.
pub struct MessageHandler<S, D, L> {
    interpreter: PhraseInterpreter,
    sender: S,
    directory: D,
    ledger: L,
    recent_rows: usize,
}

impl<S, D, L> MessageHandler<S, D, L>
where
    S: MessageSender,
    D: LedgerDirectory,
    L: LedgerStore,
{
    pub fn new(interpreter: PhraseInterpreter, sender: S, directory: D, ledger: L) -> Self {
        Self {
            interpreter,
            sender,
            directory,
            ledger,
            recent_rows: 5,
        }
    }

    /// Set how many rows /ultimos lists.
    pub fn with_recent_rows(mut self, recent_rows: usize) -> Self {
        self.recent_rows = recent_rows;
        self
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Handle a message received now.
    pub fn handle(&self, chat_id: &str, text: &str) -> HandleOutcome {
        self.handle_on(chat_id, text, self.interpreter.today())
    }

    /// Handle a message received on `received_on`.
    pub fn handle_on(&self, chat_id: &str, text: &str, received_on: NaiveDate) -> HandleOutcome {
        let text = text.trim();

        if let Some(command) = ChatCommand::parse(text) {
            return self.run_command(chat_id, command);
        }

        let location = match self.directory.resolve(chat_id) {
            Ok(Some(location)) => location,
            Ok(None) => {
                info!("chat {} is not registered", chat_id);
                self.reply(chat_id, replies::UNREGISTERED);
                return HandleOutcome::Unregistered;
            }
            Err(e) => return self.fail(chat_id, "directory lookup", e.to_string()),
        };

        let record = match self.interpreter.interpret_on(text, received_on) {
            Ok(record) => record,
            Err(e) => {
                info!("chat {}: could not interpret message: {}", chat_id, e);
                self.reply(chat_id, &replies::rejected(&e));
                return HandleOutcome::Rejected(e);
            }
        };

        if let Err(e) = self.ledger.append_row(&location, &record) {
            return self.fail(chat_id, "ledger append", e.to_string());
        }

        info!(
            "chat {}: recorded {} {} in {}",
            chat_id,
            record.amount(),
            record.category(),
            location
        );
        self.reply(chat_id, &replies::confirmation(&record));
        HandleOutcome::Recorded(record)
    }

    fn run_command(&self, chat_id: &str, command: ChatCommand) -> HandleOutcome {
        match command {
            ChatCommand::Start => {
                let location = match self.directory.resolve(chat_id) {
                    Ok(location) => location,
                    Err(e) => return self.fail(chat_id, "directory lookup", e.to_string()),
                };
                self.reply(chat_id, &replies::start(chat_id, location.as_ref()));
            }
            ChatCommand::Help => self.reply(chat_id, replies::HELP),
            ChatCommand::Recent => {
                let location = match self.directory.resolve(chat_id) {
                    Ok(Some(location)) => location,
                    Ok(None) => {
                        self.reply(chat_id, replies::UNREGISTERED);
                        return HandleOutcome::Unregistered;
                    }
                    Err(e) => return self.fail(chat_id, "directory lookup", e.to_string()),
                };
                let rows = match self.ledger.list_rows(&location) {
                    Ok(rows) => rows,
                    Err(e) => return self.fail(chat_id, "ledger listing", e.to_string()),
                };
                let skip = rows.len().saturating_sub(self.recent_rows);
                self.reply(chat_id, &replies::recent_rows(&rows[skip..]));
            }
        }
        HandleOutcome::Command(command)
    }

    fn fail(&self, chat_id: &str, step: &str, error: String) -> HandleOutcome {
        warn!("chat {}: {} failed: {}", chat_id, step, error);
        self.reply(chat_id, replies::FAILURE);
        HandleOutcome::Failed(error)
    }

    /// Best effort; delivery failures are logged and dropped.
    fn reply(&self, chat_id: &str, text: &str) {
        if let Err(e) = self.sender.send(chat_id, text) {
            warn!("chat {}: failed to send reply: {}", chat_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollaboratorError;
    use crate::ledger::{MemoryDirectory, MemoryLedger, RecordingSender, Result};
    use crate::models::record::{LedgerLocation, LedgerRow};

    struct BrokenLedger;

    impl LedgerStore for BrokenLedger {
        fn append_row(&self, _: &LedgerLocation, _: &TransactionRecord) -> Result<()> {
            Err(CollaboratorError::backend(500, "workbook locked"))
        }

        fn list_rows(&self, _: &LedgerLocation) -> Result<Vec<LedgerRow>> {
            Err(CollaboratorError::backend(500, "workbook locked"))
        }
    }

    struct BrokenSender;

    impl MessageSender for BrokenSender {
        fn send(&self, _: &str, _: &str) -> Result<()> {
            Err(CollaboratorError::backend(429, "too many requests"))
        }
    }

    fn received() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn registered_directory() -> MemoryDirectory {
        let directory = MemoryDirectory::new();
        directory
            .register("42", LedgerLocation::new("/financas.xlsx", "2024", "Gastos"))
            .unwrap();
        directory
    }

    fn handler() -> MessageHandler<RecordingSender, MemoryDirectory, MemoryLedger> {
        MessageHandler::new(
            PhraseInterpreter::new(),
            RecordingSender::new(),
            registered_directory(),
            MemoryLedger::new(),
        )
    }

    #[test]
    fn test_records_and_confirms() {
        let handler = handler();
        let outcome = handler.handle_on("42", "gastei 50 no mercado", received());

        assert!(matches!(outcome, HandleOutcome::Recorded(_)));
        assert_eq!(handler.ledger().len(), 1);
        assert!(handler.sender().last_text().unwrap().starts_with("✅"));
    }

    #[test]
    fn test_unregistered_chat() {
        let handler = handler();
        assert_eq!(
            handler.handle_on("99", "gastei 50", received()),
            HandleOutcome::Unregistered
        );
        assert!(handler.ledger().is_empty());
        assert_eq!(handler.sender().last_text().as_deref(), Some(replies::UNREGISTERED));
    }

    #[test]
    fn test_missing_amount_rejected() {
        let handler = handler();
        assert_eq!(
            handler.handle_on("42", "almoço maravilhoso hoje", received()),
            HandleOutcome::Rejected(InterpretError::MissingAmount)
        );
        assert!(handler.sender().last_text().unwrap().contains("Não encontrei o valor"));
    }

    #[test]
    fn test_ledger_failure_is_contained() {
        let handler = MessageHandler::new(
            PhraseInterpreter::new(),
            RecordingSender::new(),
            registered_directory(),
            BrokenLedger,
        );

        assert!(matches!(
            handler.handle_on("42", "gastei 50", received()),
            HandleOutcome::Failed(_)
        ));
        assert_eq!(handler.sender().last_text().as_deref(), Some(replies::FAILURE));
        // the next message is still handled
        assert!(matches!(
            handler.handle_on("42", "/ajuda", received()),
            HandleOutcome::Command(ChatCommand::Help)
        ));
    }

    #[test]
    fn test_send_failure_does_not_change_outcome() {
        let handler = MessageHandler::new(
            PhraseInterpreter::new(),
            BrokenSender,
            registered_directory(),
            MemoryLedger::new(),
        );
        assert!(matches!(
            handler.handle_on("42", "gastei 50", received()),
            HandleOutcome::Recorded(_)
        ));
    }

    #[test]
    fn test_recent_rows_command() {
        let handler = handler().with_recent_rows(2);
        for text in ["gastei 10 no mercado", "gastei 20 na padaria", "gastei 30 no uber"] {
            handler.handle_on("42", text, received());
        }

        assert_eq!(
            handler.handle_on("42", "/ultimos", received()),
            HandleOutcome::Command(ChatCommand::Recent)
        );
        let reply = handler.sender().last_text().unwrap();
        assert!(reply.starts_with("🧾 Últimos 2"));
        assert!(reply.contains("Padaria"));
        assert!(reply.contains("Transporte"));
        assert!(!reply.contains("Mercado"));
    }

    #[test]
    fn test_start_command() {
        let handler = handler();
        handler.handle_on("99", "/start@anota_bot", received());
        let reply = handler.sender().last_text().unwrap();
        assert!(reply.contains("Seu ID é 99"));
        assert!(reply.contains("administrador"));
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(ChatCommand::parse("/start"), Some(ChatCommand::Start));
        assert_eq!(ChatCommand::parse("/ultimos 3"), Some(ChatCommand::Recent));
        assert_eq!(ChatCommand::parse("/qualquer"), Some(ChatCommand::Help));
        assert_eq!(ChatCommand::parse("gastei 5"), None);
    }
}
