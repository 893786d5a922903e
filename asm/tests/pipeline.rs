use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use asm8::error::{Error, GrammarFault, ResolveFault};
use asm8::record::{Bank, HexRecord, RecordType};
use asm8::{assemble, assemble_str, disassemble, disassemble_str, DisasmOptions};

fn create_temp_dir(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("asm8-{label}-{}-{nanos}", process::id()));
    fs::create_dir_all(&dir).expect("Create temp dir");
    dir
}

const PROGRAM: &str = "\
; load both registers
mov 12, a
mov 30, b
add b, a        ; result = a + b
mov result, a
mov a, b
mov b, a
mov result, b
nop
mov 255, b
";

fn records(image: &str) -> Vec<HexRecord> {
    image
        .lines()
        .map(|line| HexRecord::decode(line).expect("valid record"))
        .collect()
}

#[test]
fn round_trip() {
    let image = assemble_str(PROGRAM).unwrap();
    let text = disassemble_str(&image, &DisasmOptions::default()).unwrap();
    let expect: Vec<&str> = vec![
        "mov 12, a",
        "mov 30, b",
        "add a, b",
        "mov result, a",
        "mov a, b",
        "mov b, a",
        "mov result, b",
        "nop",
        "mov 255, b",
        "halt",
    ];
    assert_eq!(text.lines().collect::<Vec<_>>(), expect);

    // Without the appended halt, the canonical text assembles to the same image
    let body = text.strip_suffix("halt\n").unwrap();
    assert_eq!(assemble_str(body).unwrap(), image);
}

#[test]
fn image_layout() {
    let image = assemble_str(PROGRAM).unwrap();
    let recs = records(&image);
    assert_eq!(recs.len(), 4);
    assert_eq!(recs[0].selected_bank(), Some(Bank::Zero));
    assert_eq!(recs[1].record_type, RecordType::Data);
    assert_eq!((recs[1].address, recs[1].byte_count), (0x0000, 16));
    assert_eq!((recs[2].address, recs[2].byte_count), (0x0010, 4));
    assert!(recs[3].is_eof());
    assert!(image.ends_with(":00000001FF\n"));
}

#[test]
fn bank_switch_at_64kb() {
    let source = "nop\n".repeat(65535);
    let image = assemble_str(&source).unwrap();
    let recs = records(&image);

    let selectors: Vec<(usize, Bank)> = recs
        .iter()
        .enumerate()
        .filter_map(|(idx, rec)| rec.selected_bank().map(|bank| (idx, bank)))
        .collect();
    assert_eq!(selectors, vec![(0, Bank::Zero), (4097, Bank::One)]);

    // Bank 0 ends at 0xFFF0, bank 1 restarts at 0
    assert_eq!(recs[4096].address, 0xFFF0);
    assert_eq!(recs[4098].address, 0x0000);

    // 65535 nops + halt fill bank 1 exactly
    let last_data = &recs[recs.len() - 2];
    assert_eq!(last_data.address, 0xFFF0);
    assert_eq!(last_data.byte_count, 16);

    let opts = DisasmOptions {
        show_address: true,
        padding: 6,
    };
    let text = disassemble_str(&image, &opts).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 65536);
    assert_eq!(lines[0x8000], "nop   ;Address:0x8000");
    assert_eq!(lines[0xFFFF], "halt  ;Address:0xFFFF");
}

#[test]
fn instruction_limit() {
    let source = "nop\n".repeat(65536);
    match assemble_str(&source) {
        Err(Error::Resolve { fault, token }) => {
            assert_eq!(fault, ResolveFault::InstructionLimit);
            assert_eq!(token.text, "nop");
            assert_eq!(token.pos.row, 65536);
        }
        other => panic!("expected instruction limit, got {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn files_round_trip() {
    let dir = create_temp_dir("files");
    let source = dir.join("main.asm");
    let image = dir.join("main.hex");
    let back = dir.join("back.asm");
    fs::write(&source, PROGRAM).unwrap();

    assemble(&source, &image).unwrap();
    assert_eq!(fs::read_to_string(&image).unwrap(), assemble_str(PROGRAM).unwrap());

    disassemble(&image, &back, false, 35).unwrap();
    assert!(fs::read_to_string(&back).unwrap().starts_with("mov 12, a\nmov 30, b\n"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn failed_assembly_leaves_no_file() {
    let dir = create_temp_dir("fail-asm");
    let source = dir.join("bad.asm");
    let image = dir.join("bad.hex");
    let mut text = "nop\n".repeat(100);
    text.push_str("mov a b\n");
    fs::write(&source, text).unwrap();

    let err = assemble(&source, &image).unwrap_err();
    assert!(matches!(
        err,
        Error::Grammar {
            fault: GrammarFault::ExpectedSeparator,
            ..
        }
    ));
    assert!(!image.exists());

    let rendered = err.render(&source);
    assert!(rendered.contains("line: 101, column: 7"));
    assert!(rendered.ends_with('^'));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn failed_disassembly_leaves_no_file() {
    let dir = create_temp_dir("fail-disasm");
    let image = dir.join("bad.hex");
    let dest = dir.join("bad.asm");
    fs::write(&image, ":020000040000FA\n:04000000020C0100ED\n").unwrap();

    assert!(disassemble(&image, &dest, true, 35).is_err());
    assert!(!dest.exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_input() {
    let dir = create_temp_dir("missing");
    let source = dir.join("none.asm");
    let image = dir.join("none.hex");

    let err = assemble(&source, &image).unwrap_err();
    assert!(matches!(err, Error::NoSuchFile(ref path, _) if *path == source));
    assert!(!image.exists());

    let err = disassemble(&image, &source, false, 35).unwrap_err();
    assert!(matches!(err, Error::NoSuchFile(..)));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn output_in_missing_directory() {
    let dir = create_temp_dir("badpath");
    let source = dir.join("main.asm");
    fs::write(&source, "nop\n").unwrap();

    let err = assemble(&source, &dir.join("nowhere").join("main.hex")).unwrap_err();
    assert!(matches!(err, Error::NoSuchFile(..)));

    fs::remove_dir_all(&dir).unwrap();
}
