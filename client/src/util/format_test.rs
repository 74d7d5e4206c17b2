use super::*;

#[test]
fn format_amount_groups_thousands() {
    assert_eq!(format_amount(0.0), "0");
    assert_eq!(format_amount(999.0), "999");
    assert_eq!(format_amount(1_200.0), "1,200");
    assert_eq!(format_amount(1_234_567.5), "1,234,567.5");
    assert_eq!(format_amount(-42_000.25), "-42,000.25");
}

#[test]
fn format_amount_rounds_to_cents() {
    assert_eq!(format_amount(10.006), "10.01");
    assert_eq!(format_amount(f64::NAN), "0");
}

#[test]
fn format_amounts_skips_zero_currencies() {
    let mut amounts = Amounts::new();
    amounts.insert("USD".to_owned(), 1_500.0);
    amounts.insert("EUR".to_owned(), 0.0);
    amounts.insert("MNT".to_owned(), 20.5);
    assert_eq!(format_amounts(&amounts), vec!["20.5 MNT", "1,500 USD"]);
}

#[test]
fn close_date_from_epoch_millis() {
    assert_eq!(format_close_date("0").as_deref(), Some("1970-01-01"));
    // 2024-02-29T12:00:00Z
    assert_eq!(format_close_date("1709208000000").as_deref(), Some("2024-02-29"));
    assert_eq!(format_close_date("-86400000").as_deref(), Some("1969-12-31"));
}

#[test]
fn close_date_from_iso_string() {
    assert_eq!(format_close_date("2024-05-01T10:00:00.000Z").as_deref(), Some("2024-05-01"));
    assert_eq!(format_close_date("soon"), None);
    assert_eq!(format_close_date("  "), None);
}

#[test]
fn initials_take_first_two_words() {
    assert_eq!(initials("ada lovelace byron"), "AL");
    assert_eq!(initials("Grace"), "G");
    assert_eq!(initials(""), "");
}
