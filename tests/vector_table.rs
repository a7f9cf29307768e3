//! End-to-end vector table properties.

use std::io::Write;

use mcucfg::vector_table::{VECTOR_STEP, VectorTable, VectorTableError};

const CORTEX_M_HEAD: &str = "\
# stm32f103 vector table (head)
estack
reset
nmi
hardfault
memmanage
busfault
usagefault
-
-
-
-
svcall
# debug monitor slot is unused
-
-
pendsv
systick
@40
tim2
";

#[test]
fn realistic_table_parses_with_gaps_and_jump() {
    let table = VectorTable::parse(CORTEX_M_HEAD).unwrap();
    assert_eq!(table.min_offset(), Some(0));
    assert_eq!(table.max_offset(), Some(0x40));

    let slots: Vec<(u32, Option<&str>)> = table.iter().collect();
    assert_eq!(slots.len(), (0x40 / VECTOR_STEP as usize) + 1);
    assert_eq!(slots[0], (0x00, Some("estack")));
    assert_eq!(slots[1], (0x04, Some("reset")));
    assert_eq!(slots[7], (0x1c, None), "'-' consumes the slot");
    assert_eq!(slots[11], (0x2c, Some("svcall")));
    assert_eq!(slots[15], (0x3c, Some("systick")));
    assert_eq!(slots[16], (0x40, Some("tim2")));
}

#[test]
fn iteration_is_re_invokable() {
    let table = VectorTable::parse(CORTEX_M_HEAD).unwrap();
    let first: Vec<_> = table.iter().collect();
    let second: Vec<_> = table.iter().collect();
    assert_eq!(first, second);
}

#[test]
fn table_loads_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "estack\nreset\n@10\nwwdg\n").unwrap();

    let table = VectorTable::from_path(file.path()).unwrap();
    assert_eq!(table.handler_at(0), Some("estack"));
    assert_eq!(table.handler_at(0x10), Some("wwdg"));
    assert_eq!(table.iter().count(), 5);
}

#[test]
fn missing_file_is_an_io_error() {
    let result = VectorTable::from_path("/nonexistent/vectors.txt");
    assert!(matches!(result, Err(VectorTableError::Io(_))));
}

#[test]
fn invalid_directive_reports_the_line() {
    let err = VectorTable::parse("estack\nreset\n@0x10\n").unwrap_err();
    match err {
        VectorTableError::InvalidOffset { line, directive } => {
            assert_eq!(line, 3);
            assert_eq!(directive, "@0x10");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
