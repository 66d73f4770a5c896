use depsets_util::progress::columns;

#[test]
fn test_columns_empty() {
    assert_eq!(columns(&[], 80), "");
}

#[test]
fn test_columns_wraps_rows() {
    let items: Vec<String> = ["web", "logging", "testing"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    // cell width is 9, so two per row at width 20
    let out = columns(&items, 20);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "web      logging");
    assert_eq!(lines[1], "testing");
}

#[test]
fn test_columns_narrow_width_one_per_row() {
    let items = vec!["a-long-identifier".to_string(), "b".to_string()];
    let out = columns(&items, 4);
    assert_eq!(out, "a-long-identifier\nb\n");
}
