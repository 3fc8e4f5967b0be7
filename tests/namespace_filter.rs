//! Integration tests for namespace filtering over scanned logs.
//! Tests: include/exclude, DDL bypass, opcode sentinel, config-driven scans

use std::io::Write;

use oplog_core::{
    Chunk, Chunker, Criterion, FilterConfig, NamespaceCriteria, PartialCarry, ScanOptions,
};
use tempfile::NamedTempFile;

const OPLOG: &[&str] = &[
    r#"{"ts":1,"op":"c","ns":"shop.$cmd","o":{"create":"orders"}}"#,
    r#"{"ts":2,"op":"i","ns":"shop.system.indexes","o":{"key":{"sku":1},"ns":"shop.orders","name":"sku_1"}}"#,
    r#"{"ts":3,"op":"i","ns":"shop.orders","o":{"_id":1,"sku":"a"}}"#,
    r#"{"ts":4,"op":"i","ns":"shop.customers","o":{"_id":1}}"#,
    r#"{"ts":5,"op":"u","ns":"shop.orders","o2":{"_id":1},"o":{"$set":{"qty":2}}}"#,
    r#"{"ts":6,"op":"d","ns":"shop.orders","b":true,"o":{"_id":1}}"#,
    r#"{"ts":7,"op":"n","ns":"","o":{"msg":"periodic noop"}}"#,
    r#"{"ts":8,"op":"c","ns":"shop.$cmd","o":{"drop":"customers"}}"#,
];

fn write_oplog(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

fn accepted_ts(file: &NamedTempFile, criterion: impl Criterion) -> Vec<usize> {
    let options = ScanOptions::builder().window_size(24).build();
    Chunker::open(file.path(), options)
        .unwrap()
        .filter_with(criterion)
        .map(|record| {
            let record = record.unwrap();
            OPLOG.iter().position(|line| *line == record).unwrap() + 1
        })
        .collect()
}

#[test]
fn collection_filter_includes_ddl_and_every_opcode() {
    let file = write_oplog(OPLOG);
    let ts = accepted_ts(&file, NamespaceCriteria::new("shop.orders", false));
    assert_eq!(ts, vec![1, 2, 3, 5, 6]);
}

#[test]
fn operation_filter_keeps_ddl_and_matching_opcode() {
    let file = write_oplog(OPLOG);
    let ts = accepted_ts(&file, NamespaceCriteria::new("shop.orders.update", false));
    assert_eq!(ts, vec![1, 2, 5]);
}

#[test]
fn exclusion_is_the_complement() {
    let file = write_oplog(OPLOG);
    let ts = accepted_ts(&file, NamespaceCriteria::new("shop.orders", true));
    assert_eq!(ts, vec![4, 7, 8]);
}

#[test]
fn drop_command_follows_its_collection() {
    let file = write_oplog(OPLOG);
    let ts = accepted_ts(&file, NamespaceCriteria::new("shop.customers.delete", false));
    assert_eq!(ts, vec![8]);
}

#[test]
fn config_driven_scan() {
    let file = write_oplog(OPLOG);
    let config = FilterConfig::from_json_str(
        r#"{
            "scan": {"window_size": 32},
            "filters": [
                {"namespace": "shop.orders"},
                {"namespace": "shop.orders.delete", "exclude": true}
            ]
        }"#,
    )
    .unwrap();
    let criteria = config.build_criteria().unwrap();
    let mut filtered = Chunker::open(file.path(), config.scan.clone())
        .unwrap()
        .filter_with(criteria);
    let accepted: Vec<String> = filtered.by_ref().map(Result::unwrap).collect();
    // DDL records satisfy the delete filter too, so excluding it drops them.
    assert_eq!(accepted, vec![OPLOG[2], OPLOG[4]]);
    assert_eq!(filtered.rejected(), 6);
    filtered.finish().ensure_complete().unwrap();
}

#[test]
fn record_split_across_two_windows_is_filtered_whole() {
    // Two windows: the first ends inside the second record.
    let head = "{\"ns\":\"app.users\",\"op\":\"i\"}\n{\"ns\":\"app.orders\"";
    let tail = ",\"op\":\"u\"}}\n";
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(head.as_bytes()).unwrap();
    file.write_all(tail.as_bytes()).unwrap();
    file.flush().unwrap();
    let len = (head.len() + tail.len()) as u64;

    let mut carry = PartialCarry::new();
    let first = Chunk::new(file.as_file(), 0, len, head.len()).unwrap();
    assert_eq!(first.read_size(), head.len());
    let first_records: Vec<String> = first.records(&mut carry).collect();
    assert_eq!(first_records, vec![r#"{"ns":"app.users","op":"i"}"#]);

    let second = Chunk::new(file.as_file(), head.len() as u64, len, head.len()).unwrap();
    let second_records: Vec<String> = second.records(&mut carry).collect();
    assert_eq!(second_records, vec![r#"{"ns":"app.orders","op":"u"}}"#]);

    let record = &second_records[0];
    assert!(NamespaceCriteria::new("app.orders", false).is_satisfied_by(record));
    assert!(!NamespaceCriteria::new("app.orders.i", false).is_satisfied_by(record));
    assert!(!NamespaceCriteria::new("app.orders.insert", false).is_satisfied_by(record));
}
