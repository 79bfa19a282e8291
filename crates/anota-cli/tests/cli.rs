use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Temporary workspace with a config file pointing storage inside it.
struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        let data_dir = dir.path().join("data");
        fs::write(
            &config,
            serde_json::json!({ "storage": { "data_dir": data_dir } }).to_string(),
        )
        .unwrap();
        Self { dir, config }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn anota(&self) -> Command {
        let mut cmd = Command::cargo_bin("anota").unwrap();
        cmd.arg("--config").arg(&self.config);
        cmd
    }

    fn register(&self, chat: &str) {
        self.anota()
            .args(["register", chat, "--path", "casa.xlsx", "--worksheet", "2024", "--table", "Gastos"])
            .assert()
            .success();
    }
}

#[test]
fn interpret_prints_json() {
    Workspace::new()
        .anota()
        .args(["interpret", "gastei 104 no restaurante bela italia hoje, via pix", "--date", "2024-03-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""date": "2024-03-15""#))
        .stdout(predicate::str::contains(r#""category": "Restaurante""#))
        .stdout(predicate::str::contains(r#""payment_method": "Pix""#))
        .stdout(predicate::str::contains(r#""description": "bela italia""#));
}

#[test]
fn interpret_csv_uses_ledger_columns() {
    Workspace::new()
        .anota()
        .args(["interpret", "recebi 3000 de salario", "--date", "2024-03-15", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Data,Tipo,Grupo,Categoria"))
        .stdout(predicate::str::contains("15/03/2024,Receita,Ganhos,Salário"))
        .stdout(predicate::str::contains("\"3.000,00\""));
}

#[test]
fn interpret_text_format() {
    Workspace::new()
        .anota()
        .args(["interpret", "comprei tv 2.500,00 em 10x no cartao nubank", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amount:       R$ 2.500,00"))
        .stdout(predicate::str::contains("Payment:      Cartão Nubank"))
        .stdout(predicate::str::contains("Installments: 10x"));
}

#[test]
fn interpret_without_amount_fails() {
    Workspace::new()
        .anota()
        .args(["interpret", "almoço maravilhoso hoje"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Não encontrei o valor na mensagem."));
}

#[test]
fn unregistered_chat_is_told_how_to_register() {
    Workspace::new()
        .anota()
        .args(["log", "--chat", "42", "gastei 50 no mercado"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/start"));
}

#[test]
fn register_log_and_list_rows() {
    let ws = Workspace::new();
    ws.register("42");

    ws.anota()
        .args(["resolve", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("casa.xlsx [2024 / Gastos]"));

    ws.anota()
        .args(["log", "--chat", "42", "--date", "2024-03-15", "gastei 50 no mercado ontem"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Lançamento registrado"))
        .stdout(predicate::str::contains("📅 14/03/2024"));

    ws.anota()
        .args(["rows", "42", "--csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("14/03/2024,Despesa,Gastos Variáveis,Mercado"));

    ws.anota()
        .args(["log", "--chat", "42", "/ultimos"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mercado · R$ 50,00"));
}

#[test]
fn resolve_unknown_chat_fails() {
    Workspace::new()
        .anota()
        .args(["resolve", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chat 7 is not registered"));
}

#[test]
fn batch_writes_summary() {
    let ws = Workspace::new();
    ws.register("1");

    let input = ws.path().join("messages.txt");
    fs::write(
        &input,
        "# março\ngastei 20 na padaria\nsem valor aqui\nrecebi 100 de freela\n",
    )
    .unwrap();
    let summary = ws.path().join("summary.csv");

    ws.anota()
        .arg("batch")
        .arg(&input)
        .args(["--chat", "1", "--date", "2024-03-15", "--continue-on-error", "--summary"])
        .arg(&summary)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 recorded, 1 not recorded"));

    let content = fs::read_to_string(&summary).unwrap();
    assert!(content.starts_with("line,status,text,category,amount,reply"));
    assert!(content.contains("2,recorded,gastei 20 na padaria,Padaria,\"20,00\""));
    assert!(content.contains("3,rejected,sem valor aqui"));

    ws.anota()
        .args(["rows", "1", "--csv", "--last", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Freelance"))
        .stdout(predicate::str::contains("Padaria").not());
}

#[test]
fn batch_stops_at_first_error_by_default() {
    let ws = Workspace::new();
    ws.register("1");

    let input = ws.path().join("messages.txt");
    fs::write(&input, "sem valor\ngastei 20 na padaria\n").unwrap();

    ws.anota()
        .arg("batch")
        .arg(&input)
        .args(["--chat", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 1 was not recorded (rejected)"));

    ws.anota()
        .args(["rows", "1", "--csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Padaria").not());
}

#[test]
fn config_set_and_get() {
    let ws = Workspace::new();

    ws.anota()
        .args(["config", "set", "messages.recent_rows", "3"])
        .assert()
        .success();

    ws.anota()
        .args(["config", "get", "messages.recent_rows"])
        .assert()
        .success()
        .stdout(predicate::str::diff("3\n"));

    ws.anota()
        .args(["config", "get", "messages.nope"])
        .assert()
        .failure();
}

#[test]
fn config_init_refuses_to_overwrite() {
    let ws = Workspace::new();
    ws.anota().args(["config", "init"]).assert().failure();
    ws.anota().args(["config", "init", "--force"]).assert().success();
}
