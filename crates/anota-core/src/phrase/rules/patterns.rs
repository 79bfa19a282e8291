//! Common regex patterns for Portuguese expense phrases.
//!
//! Every pattern runs against normalized text (lower-case, no diacritics).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Amount: optional "r$", BRL grouping (1.234,56) or plain decimal (1234,56 / 1234.56).
    // Must start a token and end one, so "10x" and "10/05" never match;
    // trailing punctuation ("50!!", "50...") still ends the token.
    pub static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"(?:^|[\s(])(?P<value>(?:r\$\s*)?(?P<number>\d{1,3}(?:\.\d{3})+(?:,\d{1,2})?|\d+(?:[.,]\d{1,2})?))[,.;:!?)]*(?:\s|$)"
    ).unwrap();

    pub static ref THOUSANDS_GROUPED: Regex = Regex::new(
        r"^\d{1,3}(?:\.\d{3})+$"
    ).unwrap();

    // Words that turn a preceding number into an installment count.
    pub static ref COUNT_SUFFIX: Regex = Regex::new(
        r"^\s*(?:vezes|parcelas?|prestac(?:ao|oes))\b"
    ).unwrap();

    // Dates: D/M, D/M/YY, D/M/YYYY with / . or - separators
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2})[./\-](\d{1,2})(?:[./\-](\d{4}|\d{2}))?\b"
    ).unwrap();

    pub static ref DAY_BEFORE_YESTERDAY: Regex = Regex::new(r"\banteontem\b").unwrap();
    pub static ref YESTERDAY: Regex = Regex::new(r"\bontem\b").unwrap();
    pub static ref TODAY: Regex = Regex::new(r"\bhoje\b").unwrap();

    // Payment method
    pub static ref PIX: Regex = Regex::new(r"\bpix\b").unwrap();

    pub static ref CASH: Regex = Regex::new(
        r"\b(?:dinheiro|especie|em maos)\b"
    ).unwrap();

    pub static ref BANK_SLIP: Regex = Regex::new(r"\bboletos?\b").unwrap();

    pub static ref CARD: Regex = Regex::new(
        r"\bcart(?:ao|oes)\b(?:\s+(?:de\s+)?(?:credito|debito))?(?:\s+(?:do\s+|da\s+|de\s+)?(?P<issuer>nubank|inter|itau|bradesco|santander|caixa|c6|bb|picpay|neon|next|xp|btg|sicredi|sicoob|mastercard|master|visa|elo|amex|hipercard|porto)\b)?"
    ).unwrap();

    pub static ref CREDIT: Regex = Regex::new(r"\bcredito\b").unwrap();
    pub static ref DEBIT: Regex = Regex::new(r"\bdebito\b").unwrap();

    // Installments, most specific first
    pub static ref INSTALLMENT_PARCEL_X: Regex = Regex::new(
        r"\bparcel\w*\s+(?:em\s+)?(\d{1,2})\s?x\b"
    ).unwrap();

    pub static ref INSTALLMENT_PARCEL_TIMES: Regex = Regex::new(
        r"\bparcel\w*\s+(?:em\s+)?(\d{1,2})\s+vezes\b"
    ).unwrap();

    pub static ref INSTALLMENT_X: Regex = Regex::new(r"\b(\d{1,2})x\b").unwrap();

    pub static ref INSTALLMENT_TIMES: Regex = Regex::new(r"\b(\d{1,2})\s+vezes\b").unwrap();

    pub static ref INSTALLMENT_COUNT_WORD: Regex = Regex::new(
        r"\b(\d{1,2})\s+(?:parcelas?|prestac(?:ao|oes))\b"
    ).unwrap();

    pub static ref INSTALLMENT_STEM: Regex = Regex::new(r"\b(?:parcel|prestac)\w*").unwrap();

    // Description cleanup
    pub static ref CURRENCY_MARKER: Regex = Regex::new(r"r\$|\breais\b|\breal\b").unwrap();

    pub static ref INSTALLMENT_PHRASE: Regex = Regex::new(
        r"\b\d{1,2}\s+(?:parcelas?|prestac(?:ao|oes))\b|\b(?:parcel|prestac)\w*(?:\s+em)?(?:\s+\d{1,2}\s?(?:x|vezes))?\b|\b\d{1,2}x\b|\b\d{1,2}\s+vezes\b|\ba\s+vista\b"
    ).unwrap();

    pub static ref TEMPORAL_WORDS: Regex = Regex::new(
        r"\b(?:hoje|ontem|anteontem|dia)\b"
    ).unwrap();

    pub static ref VERBS: Regex = Regex::new(
        r"\b(?:gastei|gasto|paguei|pago|comprei|investi|guardei|recebi|ganhei|custou|deu)\b"
    ).unwrap();

    pub static ref PAYMENT_WORDS: Regex = Regex::new(
        r"\b(?:pix|dinheiro|especie|cartao|cartoes|credito|debito|boletos?)\b"
    ).unwrap();

    pub static ref STOP_WORDS: Regex = Regex::new(
        r"\b(?:a|o|as|os|um|uma|uns|umas|de|da|do|das|dos|em|no|na|nos|nas|num|numa|ao|aos|para|pra|pro|por|pelo|pela|com|via|e|que|meu|minha)\b"
    ).unwrap();

    pub static ref PUNCTUATION: Regex = Regex::new(r"[^\p{L}\p{N}\s]").unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}
