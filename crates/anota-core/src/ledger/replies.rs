//! Chat reply texts.

use crate::error::InterpretError;
use crate::models::record::{LedgerLocation, LedgerRow, TransactionRecord};
use crate::phrase::rules::format_brl_amount;

/// Sent when the chat has no ledger assigned.
pub const UNREGISTERED: &str = "⚠️ Este chat ainda não está vinculado a uma planilha. \
Envie /start para ver o seu ID e peça o cadastro.";

/// Sent when a collaborator fails while handling a message.
pub const FAILURE: &str =
    "❌ Não consegui registrar o lançamento agora. Tente novamente em instantes.";

/// Usage help.
pub const HELP: &str = "Envie uma mensagem descrevendo o gasto, por exemplo:\n\
• gastei 104 no restaurante bela italia hoje, via pix\n\
• recebi 3000 de salário\n\
• comprei tv 2.500,00 em 10x no cartão nubank\n\n\
Comandos: /start, /ultimos, /ajuda";

/// Confirmation for a recorded transaction.
pub fn confirmation(record: &TransactionRecord) -> String {
    let mut lines = vec![
        "✅ Lançamento registrado".to_string(),
        format!("📅 {}", record.date().format("%d/%m/%Y")),
        format!(
            "🏷️ {} · {} · {}",
            record.transaction_type().label(),
            record.group().label(),
            record.category()
        ),
    ];
    if !record.description().is_empty() {
        lines.push(format!("📝 {}", record.description()));
    }
    lines.push(format!("💰 R$ {}", format_brl_amount(record.amount())));
    lines.push(format!(
        "💳 {} · {}",
        record.payment_method().label(),
        record.installment().label()
    ));
    lines.join("\n")
}

/// Reply for a message that could not be interpreted.
pub fn rejected(error: &InterpretError) -> String {
    format!("🤔 {} Exemplo: gastei 50 no mercado", error)
}

/// Reply to /start.
pub fn start(chat_id: &str, location: Option<&LedgerLocation>) -> String {
    match location {
        Some(location) => format!(
            "👋 Olá! Seu ID é {}.\nLançamentos vão para {}.\n\n{}",
            chat_id, location, HELP
        ),
        None => format!(
            "👋 Olá! Seu ID é {}.\nEste chat ainda não tem planilha; envie este ID para o administrador.",
            chat_id
        ),
    }
}

/// Reply listing recent rows, newest last.
pub fn recent_rows(rows: &[LedgerRow]) -> String {
    if rows.is_empty() {
        return "📭 Nenhum lançamento ainda.".to_string();
    }

    let mut lines = vec![format!("🧾 Últimos {} lançamentos:", rows.len())];
    for row in rows {
        let mut parts = vec![
            row.cell(0).unwrap_or("?").to_string(),
            row.cell(3).unwrap_or("?").to_string(),
            format!("R$ {}", row.cell(5).unwrap_or("?")),
        ];
        if let Some(description) = row.cell(4).filter(|d| !d.is_empty()) {
            parts.push(description.to_string());
        }
        lines.push(format!("• {}", parts.join(" · ")));
    }
    lines.join("\n")
}
