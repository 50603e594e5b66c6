use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const REPORT: &str = "\
TARUMA COMERCIAL LTDA
Emitido em 22/11/2025 07:31
Código Número Descrição Estoque Unid Local Marca Preço
------------------------------------------------------------------
9576 577508 ABS S.LIVRE ADAP C/A 48X8UN L8P7 955 CX SEMPRELIVRE 118,00
1755 100200 ACUCAR ITAMARATY 30X1KG 449 FD A12 ITAMARATY 98,00
2001 300400 BISCOITO MAIZENA 5 CX VITARELLA 45,90
Pagina 1 de 2
\x0c\
3100 900001 DETERGENTE YPE 500ML 24X1 60 CX YPE 55,00
3102 900003 SABAO EM PO 1KG 8 FD OMO 12,34,56
Pagina 2 de 2
";

fn write_report(dir: &Path) -> PathBuf {
    let path = dir.join("22112025.txt");
    fs::write(&path, REPORT).unwrap();
    path
}

fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.json");
    let config = format!(
        r#"{{"output": {{"output_dir": {:?}, "template": {:?}}}}}"#,
        dir.join("output").to_string_lossy(),
        dir.join("missing-template.html").to_string_lossy()
    );
    fs::write(&path, config).unwrap();
    path
}

fn oferta() -> Command {
    Command::cargo_bin("oferta").unwrap()
}

#[test]
fn extract_prints_csv_in_report_order() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(dir.path());
    let config = write_config(dir.path());

    oferta()
        .arg("-c")
        .arg(&config)
        .args(["extract", "--no-summary", "-f", "csv"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "9576,577508,ABS S.LIVRE ADAP C/A 48X8UN L8P7,955,CX,,SEMPRELIVRE,118.00\n\
             1755,100200,ACUCAR ITAMARATY 30X1KG,449,FD,A12,ITAMARATY,98.00\n\
             3100,900001,DETERGENTE YPE 500ML 24X1,60,CX,,YPE,55.00\n",
        ))
        .stdout(predicate::str::contains("2001").not());
}

#[test]
fn extract_writes_summary() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(dir.path());
    let config = write_config(dir.path());

    oferta()
        .arg("-c")
        .arg(&config)
        .args(["extract", "-m", "100"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("PRODUTOS COM ESTOQUE > 100 CAIXAS"));

    let summary = fs::read_to_string(dir.path().join("output").join("produtos_filtrados.txt")).unwrap();
    assert!(summary.contains("1. ABS S.LIVRE ADAP C/A 48X8UN L8P7"));
    assert!(summary.contains("2. ACUCAR ITAMARATY 30X1KG"));
    assert!(!summary.contains("DETERGENTE"));
}

#[test]
fn extract_threshold_at_quantity_yields_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(dir.path());
    let config = write_config(dir.path());

    oferta()
        .arg("-c")
        .arg(&config)
        .args(["extract", "-m", "955", "-f", "json"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"))
        .stderr(predicate::str::contains("No products found"));

    assert!(!dir.path().join("output").exists());
}

#[test]
fn extract_missing_input_fails() {
    oferta()
        .args(["extract", "no-such-report.PDF"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn extract_unreadable_pdf_is_a_source_failure() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("22112025.PDF");
    fs::write(&report, "definitely not a pdf").unwrap();
    let config = write_config(dir.path());

    oferta()
        .arg("-c")
        .arg(&config)
        .arg("extract")
        .arg(&report)
        .assert()
        .failure()
        .stderr(predicate::str::contains("source unavailable"));
}

#[test]
fn generate_renders_document_without_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(dir.path());
    let config = write_config(dir.path());

    oferta()
        .arg("-c")
        .arg(&config)
        .args(["generate", "--no-convert", "--valid-until", "22/11/2025"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Offer generated with 3 products"));

    let document = fs::read_to_string(dir.path().join("output").join("OFERTA-DO-DIA.html")).unwrap();
    assert!(document.contains("Válido para: 22/11/2025"));
    assert!(document.contains("Total de produtos: 3"));
    assert!(document.contains("<td>9576</td>"));
}

#[test]
fn generate_with_no_products_fails() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_report(dir.path());
    let config = write_config(dir.path());

    oferta()
        .arg("-c")
        .arg(&config)
        .args(["generate", "--no-convert", "-m", "10000"])
        .arg(&report)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No products found"));
}

#[test]
fn config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");

    oferta()
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "extraction.minimum_quantity", "20"])
        .assert()
        .success();

    oferta()
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "extraction.minimum_quantity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20"));
}
