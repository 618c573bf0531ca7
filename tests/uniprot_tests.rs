use kinex::uniprot::possible_uniprot_ids;

#[test]
fn test_no_duplicates_and_first_seen_order() {
    let text = "Q86U12 binds Q15502; Q86U12 also binds Q04950. Q15502 is ubiquitous.";

    let ids = possible_uniprot_ids(text);

    assert_eq!(ids, vec!["Q86U12", "Q15502", "Q04950"]);
}

#[test]
fn test_both_accession_shapes_match() {
    let text = "P17612 and A0A024R161 were co-purified.";

    let ids = possible_uniprot_ids(text);

    assert_eq!(ids, vec!["P17612", "A0A024R161"]);
}

#[test]
fn test_lookalike_tokens_are_ignored() {
    // Wrong leading letter, wrong length, embedded in a larger word
    let text = "X17612, P1761, xP17612y and PROTEIN are not accessions.";

    assert!(possible_uniprot_ids(text).is_empty());
}

#[test]
fn test_no_matches_yields_empty_vec() {
    assert!(possible_uniprot_ids("plain prose with no identifiers").is_empty());
}
