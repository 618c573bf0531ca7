use kinex::repair::{RelationPair, RepairError, close_angle_brackets, extract_pairs};

#[test]
fn test_single_closing_bracket_parses_like_doubled_form() {
    let complete = "final answer: <<[[\"CASP3\", \"PARP1\"]]>>";
    let clipped = "final answer: <<[[\"CASP3\", \"PARP1\"]]>";

    let from_complete = extract_pairs(&close_angle_brackets(complete)).expect("Should parse");
    let from_clipped = extract_pairs(&close_angle_brackets(clipped)).expect("Should parse");

    assert_eq!(from_complete, from_clipped);
}

#[test]
fn test_delimiter_repair_ignores_trailing_whitespace() {
    let clipped = "<<[[\"A\", \"B\"]]>   \n  ";
    assert_eq!(close_angle_brackets(clipped), "<<[[\"A\", \"B\"]]>>");
}

#[test]
fn test_second_span_takes_precedence_over_first() {
    let content = concat!(
        "My first guess would be <<[[\"WRONG\", \"GUESS\"]]>>, but on closer reading ",
        "the supported pairs are <<[[\"CDK1\", \"Histone H1\"], [\"CK2\", \"PTEN\"]]>>"
    );

    let pairs = extract_pairs(content).expect("Should parse the last span");

    assert_eq!(
        pairs,
        vec![
            RelationPair::new("CDK1", "Histone H1"),
            RelationPair::new("CK2", "PTEN"),
        ]
    );
}

#[test]
fn test_truncated_literal_parses_like_closed_form() {
    let truncated = "<<[[\"A\",\"B\"]>>";
    let closed = "<<[[\"A\",\"B\"]]>>";

    assert_eq!(
        extract_pairs(truncated).expect("Should repair"),
        extract_pairs(closed).expect("Should parse")
    );
}

#[test]
fn test_mapping_payload_preserves_insertion_order() {
    let content = "<<{\"Q86U12\": \"Q9FCE5\", \"Q86123\": \"Q15502\", \"Q86U33\": \"Q04950\"}>>";

    let pairs = extract_pairs(content).expect("Should parse mapping");

    assert_eq!(
        pairs,
        vec![
            RelationPair::new("Q86U12", "Q9FCE5"),
            RelationPair::new("Q86123", "Q15502"),
            RelationPair::new("Q86U33", "Q04950"),
        ]
    );
}

#[test]
fn test_deduplication_keeps_first_occurrence() {
    let content = "<<[[\"A\",\"B\"],[\"A\",\"B\"],[\"C\",\"D\"],[\"A\",\"B\"]]>>";

    let pairs = extract_pairs(content).expect("Should parse");

    assert_eq!(
        pairs,
        vec![RelationPair::new("A", "B"), RelationPair::new("C", "D")]
    );
}

#[test]
fn test_prose_without_delimiters_is_no_payload() {
    let result = extract_pairs("No enzyme-substrate relationships are described in this text.");
    assert!(matches!(result, Err(RepairError::NoPayload)));
}

#[test]
fn test_multiline_payload_with_indentation() {
    let content = "<<[\n    [\"PPM1D\", \"RUNX2\"],\n    [\"PPP2CA\", \"TP53\"]\n]>>";

    let pairs = extract_pairs(content).expect("Should parse multiline payload");

    assert_eq!(
        pairs,
        vec![
            RelationPair::new("PPM1D", "RUNX2"),
            RelationPair::new("PPP2CA", "TP53"),
        ]
    );
}

#[test]
fn test_parse_error_carries_cause() {
    let err = extract_pairs("<<[not a literal]>>").expect_err("Should fail to parse");
    match err {
        RepairError::Parse(inner) => {
            assert!(!inner.to_string().is_empty());
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}
