//! Transaction record and ledger data models.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::phrase::rules::amounts::format_brl_amount;

/// A single ledger row produced from one chat message.
///
/// Built once by the interpreter and never modified afterwards; the
/// transaction type is always derived from the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    date: NaiveDate,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    group: Group,
    category: String,
    description: String,
    amount: Decimal,
    payment_method: PaymentMethod,
    installment: InstallmentCondition,
}

impl TransactionRecord {
    /// Assemble a record. The transaction type follows from `group`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDate,
        group: Group,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        payment_method: PaymentMethod,
        installment: InstallmentCondition,
    ) -> Self {
        Self {
            date,
            transaction_type: group.transaction_type(),
            group,
            category: category.into(),
            description: description.into(),
            amount,
            payment_method,
            installment,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn group(&self) -> Group {
        self.group
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn payment_method(&self) -> &PaymentMethod {
        &self.payment_method
    }

    pub fn installment(&self) -> InstallmentCondition {
        self.installment
    }

    /// Cells in ledger column order:
    /// date, type, group, category, description, amount, payment, installment.
    pub fn to_row(&self) -> LedgerRow {
        LedgerRow::new(vec![
            self.date.format("%d/%m/%Y").to_string(),
            self.transaction_type.label().to_string(),
            self.group.label().to_string(),
            self.category.clone(),
            self.description.clone(),
            format_brl_amount(self.amount),
            self.payment_method.label(),
            self.installment.label(),
        ])
    }
}

/// Column headers matching [`TransactionRecord::to_row`].
pub const LEDGER_COLUMNS: [&str; 8] = [
    "Data",
    "Tipo",
    "Grupo",
    "Categoria",
    "Descrição",
    "Valor",
    "Forma de Pagamento",
    "Condição",
];

/// Direction of money flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money coming in (receita).
    Income,
    /// Money going out (despesa).
    Expense,
}

impl TransactionType {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Receita",
            TransactionType::Expense => "Despesa",
        }
    }
}

/// Top-level budget group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// Recurring essentials: rent, utilities, school.
    FixedExpenses,
    /// Recurring services: streaming, software.
    Subscription,
    /// Day-to-day spending.
    VariableExpenses,
    /// Bounded, one-off projects: travel, renovation.
    TemporaryExpenses,
    /// Paying off the credit card statement.
    CreditCardBill,
    /// Salary and other earnings.
    Income,
    /// Money moved into investments.
    Investment,
    /// Money moved into savings.
    Reserve,
}

impl Group {
    /// All groups, in ledger presentation order.
    pub const ALL: [Group; 8] = [
        Group::FixedExpenses,
        Group::Subscription,
        Group::VariableExpenses,
        Group::TemporaryExpenses,
        Group::CreditCardBill,
        Group::Income,
        Group::Investment,
        Group::Reserve,
    ];

    /// Label written to the ledger.
    pub fn label(&self) -> &'static str {
        match self {
            Group::FixedExpenses => "Gastos Fixos",
            Group::Subscription => "Assinatura",
            Group::VariableExpenses => "Gastos Variáveis",
            Group::TemporaryExpenses => "Gastos Temporários",
            Group::CreditCardBill => "Fatura do Cartão",
            Group::Income => "Ganhos",
            Group::Investment => "Investimento",
            Group::Reserve => "Reserva",
        }
    }

    /// Income iff the group is [`Group::Income`].
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Group::Income => TransactionType::Income,
            _ => TransactionType::Expense,
        }
    }

    /// Parse a ledger label back into a group.
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.label() == s.trim())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PaymentMethod {
    Pix,
    /// Dinheiro / espécie.
    Cash,
    /// Boleto bancário.
    BankSlip,
    /// Card with an optional issuer or network name.
    Card(Option<String>),
    CreditCard,
    DebitCard,
}

impl PaymentMethod {
    pub fn label(&self) -> String {
        match self {
            PaymentMethod::Pix => "Pix".to_string(),
            PaymentMethod::Cash => "Dinheiro".to_string(),
            PaymentMethod::BankSlip => "Boleto".to_string(),
            PaymentMethod::Card(Some(issuer)) => format!("Cartão {}", issuer),
            PaymentMethod::Card(None) => "Cartão".to_string(),
            PaymentMethod::CreditCard => "Cartão de Crédito".to_string(),
            PaymentMethod::DebitCard => "Cartão de Débito".to_string(),
        }
    }

    /// Parse a label produced by [`PaymentMethod::label`].
    ///
    /// Unknown labels are read as a card with that issuer name.
    pub fn from_label(s: &str) -> Self {
        match s.trim() {
            "Pix" => PaymentMethod::Pix,
            "Dinheiro" => PaymentMethod::Cash,
            "Boleto" => PaymentMethod::BankSlip,
            "Cartão" | "" => PaymentMethod::Card(None),
            "Cartão de Crédito" => PaymentMethod::CreditCard,
            "Cartão de Débito" => PaymentMethod::DebitCard,
            other => {
                let issuer = other.strip_prefix("Cartão ").unwrap_or(other);
                PaymentMethod::Card(Some(issuer.to_string()))
            }
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Card(None)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        method.label()
    }
}

impl From<String> for PaymentMethod {
    fn from(s: String) -> Self {
        PaymentMethod::from_label(&s)
    }
}

/// Whether a purchase is paid in full or split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum InstallmentCondition {
    /// À vista.
    #[default]
    Cash,
    /// Split into the given number of installments.
    Installments(u32),
    /// Installment language without a count.
    InstallmentsUnknown,
}

impl InstallmentCondition {
    pub fn label(&self) -> String {
        match self {
            InstallmentCondition::Cash => "À vista".to_string(),
            InstallmentCondition::Installments(n) => format!("{}x", n),
            InstallmentCondition::InstallmentsUnknown => "Parcelado (sem nº)".to_string(),
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim() {
            "À vista" => Some(InstallmentCondition::Cash),
            "Parcelado (sem nº)" => Some(InstallmentCondition::InstallmentsUnknown),
            other => other
                .strip_suffix('x')
                .and_then(|n| n.parse().ok())
                .map(InstallmentCondition::Installments),
        }
    }
}

impl fmt::Display for InstallmentCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<InstallmentCondition> for String {
    fn from(condition: InstallmentCondition) -> Self {
        condition.label()
    }
}

impl TryFrom<String> for InstallmentCondition {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        InstallmentCondition::from_label(&s)
            .ok_or_else(|| format!("unknown installment condition: {}", s))
    }
}

/// Where a chat's rows are appended: workbook path, worksheet and table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerLocation {
    /// Path of the spreadsheet document.
    pub path: String,
    /// Worksheet identifier inside the document.
    pub worksheet: String,
    /// Table identifier inside the worksheet.
    pub table: String,
}

impl LedgerLocation {
    pub fn new(
        path: impl Into<String>,
        worksheet: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            worksheet: worksheet.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for LedgerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} / {}]", self.path, self.worksheet, self.table)
    }
}

/// One stored ledger row, as plain cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow(pub Vec<String>);

impl LedgerRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[String] {
        &self.0
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}
