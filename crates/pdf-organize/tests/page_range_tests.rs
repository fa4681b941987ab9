use pdf_organize::*;
use std::collections::BTreeSet;

#[test]
fn test_format_page_ranges() {
    assert_eq!(
        format_page_ranges([1, 2, 3, 4, 5, 8, 10, 11, 12]),
        "1-5,8,10-12"
    );
    assert_eq!(format_page_ranges([12, 3, 1, 2, 3]), "1-3,12");
    assert_eq!(format_page_ranges([0, 4]), "4");
    assert_eq!(format_page_ranges(Vec::new()), "");
}

#[test]
fn test_format_page_sequence_keeps_order() {
    assert_eq!(format_page_sequence(&[3, 1, 2, 4]), "3,1-2,4");
    assert_eq!(format_page_sequence(&[1, 2, 3]), "1-3");
    assert_eq!(format_page_sequence(&[5, 4, 3]), "5,4,3");
    assert_eq!(format_page_sequence(&[]), "");
}

#[test]
fn test_parse_page_list() {
    let pages = parse_page_list("1, 3-5,9").unwrap();
    assert_eq!(pages, BTreeSet::from([1, 3, 4, 5, 9]));

    assert_eq!(parse_page_list(" 2 - 2 ").unwrap(), BTreeSet::from([2]));
    assert!(parse_page_list("").unwrap().is_empty());
    assert!(parse_page_list(" , ,").unwrap().is_empty());
}

#[test]
fn test_parse_page_list_rejects_malformed() {
    for input in ["0", "a", "3-", "-3", "5-2", "1-2-3", "1.5"] {
        assert!(
            matches!(parse_page_list(input), Err(OrganizeError::InvalidInput(_))),
            "input {:?} should be rejected",
            input
        );
    }
}

#[test]
fn test_parse_page_list_rejects_huge_pages() {
    for input in ["1-99999999999", "100001", "5, 2-100001"] {
        assert!(
            matches!(parse_page_list(input), Err(OrganizeError::InvalidInput(_))),
            "input {:?} should be rejected",
            input
        );
    }
    assert_eq!(parse_page_list("99999-100000").unwrap().len(), 2);
}

#[test]
fn test_parse_then_format() {
    let pages = parse_page_list("10-12, 8, 1-5").unwrap();
    assert_eq!(format_page_ranges(pages), "1-5,8,10-12");
}
