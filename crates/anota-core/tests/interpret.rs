use anota_core::phrase::rules::{normalize, InstallmentExtractor};
use anota_core::{
    Group, InstallmentCondition, InterpretError, PaymentMethod, PhraseInterpreter,
    TransactionType,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

fn received() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

#[test]
fn restaurant_paid_with_pix() {
    let record = PhraseInterpreter::new()
        .interpret_on("gastei 104 no restaurante bela italia hoje, via pix", received())
        .unwrap();

    assert_eq!(record.amount(), Decimal::new(104, 0));
    assert_eq!(record.date(), received());
    assert_eq!(record.transaction_type(), TransactionType::Expense);
    assert_eq!(record.group(), Group::VariableExpenses);
    assert_eq!(record.category(), "Restaurante");
    assert_eq!(record.payment_method(), &PaymentMethod::Pix);
    assert_eq!(record.installment(), InstallmentCondition::Cash);
    assert_eq!(record.description(), "bela italia");
}

#[test]
fn salary_is_income() {
    let record = PhraseInterpreter::new()
        .interpret_on("recebi 3000 de salario hoje", received())
        .unwrap();

    assert_eq!(record.transaction_type(), TransactionType::Income);
    assert_eq!(record.group(), Group::Income);
    assert_eq!(record.category(), "Salário");
    assert_eq!(record.amount(), Decimal::new(3000, 0));
}

#[test]
fn bare_amount_uses_defaults() {
    let record = PhraseInterpreter::new()
        .interpret_on("paguei 50", received())
        .unwrap();

    assert_eq!(record.amount(), Decimal::new(50, 0));
    assert_eq!(record.payment_method(), &PaymentMethod::Card(None));
    assert_eq!(record.payment_method().label(), "Cartão");
    assert_eq!(record.installment(), InstallmentCondition::Cash);
    assert_eq!(record.group(), Group::VariableExpenses);
    assert_eq!(record.category(), "Outros");
    assert_eq!(record.description(), "");
}

#[test]
fn text_without_amount_fails() {
    let interpreter = PhraseInterpreter::new();
    for text in ["almoço maravilhoso hoje", "", "paguei o mercado", "comprei em 3 vezes"] {
        assert_eq!(
            interpreter.interpret_on(text, received()),
            Err(InterpretError::MissingAmount),
            "{text:?}"
        );
    }
}

#[test]
fn amount_formats_agree() {
    let interpreter = PhraseInterpreter::new();
    let expected = Decimal::new(123456, 2);

    for text in [
        "gastei R$ 1.234,56 no mercado",
        "gastei 1.234,56 no mercado",
        "gastei 1234,56 no mercado",
        "gastei 1234.56 no mercado",
        "gastei r$1234,56 no mercado",
    ] {
        let record = interpreter.interpret_on(text, received()).unwrap();
        assert_eq!(record.amount(), expected, "{text:?}");
        assert_eq!(record.category(), "Mercado", "{text:?}");
    }
}

#[test]
fn relative_dates() {
    let interpreter = PhraseInterpreter::new();
    let yesterday = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();

    let today = interpreter
        .interpret_on("hoje paguei 20 na padaria", received())
        .unwrap();
    assert_eq!(today.date(), received());

    let before = interpreter
        .interpret_on("paguei 20 na padaria ontem a noite", received())
        .unwrap();
    assert_eq!(before.date(), yesterday);
}

#[test]
fn explicit_date() {
    let record = PhraseInterpreter::new()
        .interpret_on("paguei 120 de luz dia 05/02", received())
        .unwrap();
    assert_eq!(record.date(), NaiveDate::from_ymd_opt(2024, 2, 5).unwrap());
    assert_eq!(record.group(), Group::FixedExpenses);
}

#[test]
fn installment_forms_agree() {
    let interpreter = PhraseInterpreter::new();
    for text in [
        "comprei tv 500 em 5x",
        "comprei tv 500 em 5 vezes",
        "comprei tv 500 parcelado em 5x",
        "comprei tv 500 parcelado em 5 vezes",
    ] {
        let record = interpreter.interpret_on(text, received()).unwrap();
        assert_eq!(record.installment(), InstallmentCondition::Installments(5), "{text:?}");
        assert_eq!(record.installment().label(), "5x");
        assert_eq!(record.amount(), Decimal::new(500, 0), "{text:?}");
    }

    assert_eq!(
        InstallmentExtractor::new().detect("comprei parcelado"),
        InstallmentCondition::InstallmentsUnknown
    );
}

#[test]
fn force_token_fixes_group() {
    let interpreter = PhraseInterpreter::new();

    let record = interpreter
        .interpret_on("restaurante 90 🔁", received())
        .unwrap();
    assert_eq!(record.group(), Group::Subscription);
    assert_eq!(record.category(), "Restaurante");

    let record = interpreter
        .interpret_on("assinatura restaurante 90", received())
        .unwrap();
    assert_eq!(record.group(), Group::Subscription);
}

#[test]
fn normalization_is_idempotent() {
    for text in ["Almoço no Café", "SALÁRIO", "pão de queijo 🧀", "already plain", ""] {
        let once = normalize(text);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn punctuation_after_amount() {
    let interpreter = PhraseInterpreter::new();
    for text in ["paguei 50!!", "gastei 50...", "paguei 50?!"] {
        let record = interpreter.interpret_on(text, received()).unwrap();
        assert_eq!(record.amount(), Decimal::new(50, 0), "{text:?}");
        assert_eq!(record.description(), "", "{text:?}");
    }
}

#[test]
fn installment_count_words() {
    let interpreter = PhraseInterpreter::new();

    let record = interpreter
        .interpret_on("comprei geladeira 2000 em 10 prestacoes", received())
        .unwrap();
    assert_eq!(record.amount(), Decimal::new(2000, 0));
    assert_eq!(record.installment(), InstallmentCondition::Installments(10));
    assert_eq!(record.group(), Group::VariableExpenses);
    assert_eq!(record.category(), "Outros");
    assert_eq!(record.description(), "geladeira");

    let record = interpreter
        .interpret_on("comprei tv 3000 em 10 parcelas", received())
        .unwrap();
    assert_eq!(record.installment(), InstallmentCondition::Installments(10));
    assert_eq!(record.description(), "tv");
}

#[test]
fn keys_do_not_fire_inside_longer_words() {
    let interpreter = PhraseInterpreter::new();

    let record = interpreter
        .interpret_on("gastei 80 na decoracao da festa", received())
        .unwrap();
    assert_eq!(record.category(), "Outros");
    assert_eq!(record.description(), "decoracao festa");

    let record = interpreter
        .interpret_on("comprei ração pro gato 120", received())
        .unwrap();
    assert_eq!(record.category(), "Pet");
    assert_eq!(record.description(), "gato");

    let record = interpreter
        .interpret_on("investi 1000 em ações", received())
        .unwrap();
    assert_eq!(record.group(), Group::Investment);
}
