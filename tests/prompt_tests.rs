use kinex::prompt::{REASONING_INSTRUCTION, enzyme_substrate_prompt, kinase_substrate_prompt};

#[test]
fn test_enzyme_prompt_contains_task_steps() {
    let prompt = enzyme_substrate_prompt("CASP3 cleaves PARP1 during apoptosis.");

    assert!(prompt.contains("CASP3 cleaves PARP1 during apoptosis."));
    assert!(prompt.contains("Extract Enzyme–Substrate Relationships"));
    assert!(prompt.contains("Step 1: Identify Enzymes and Their Substrates"));
    assert!(prompt.contains("Step 3: Format the Output"));
}

#[test]
fn test_enzyme_prompt_shows_list_delimiter_convention() {
    let prompt = enzyme_substrate_prompt("text");

    // The worked example demonstrates the <<[...]>> shape the parser expects
    assert!(prompt.contains("<<["));
    assert!(prompt.contains(r#"["CDK1", "Histone H1"]"#));
}

#[test]
fn test_kinase_prompt_embeds_candidate_ids_in_first_seen_order() {
    let prompt = kinase_substrate_prompt(
        "PKA (P17612) phosphorylates CREB (P16220); P17612 is cAMP-dependent.",
    );

    assert!(prompt.contains("P17612, P16220"));
    assert!(prompt.contains("Extracted Possible UniProt IDs"));
}

#[test]
fn test_kinase_prompt_falls_back_when_no_ids_found() {
    let prompt = kinase_substrate_prompt("Kinase A phosphorylates Protein B.");

    assert!(prompt.contains("None found"));
}

#[test]
fn test_kinase_prompt_shows_mapping_delimiter_convention() {
    let prompt = kinase_substrate_prompt("text");

    assert!(prompt.contains("<<{"));
    assert!(prompt.contains(r#""Q86U12": "Q9FCE5""#));
}

#[test]
fn test_reasoning_instruction_asks_for_thought_process_first() {
    assert!(REASONING_INSTRUCTION.contains("explain your thought process"));
}

#[test]
fn test_prompt_is_stable_across_calls() {
    // The retry controller reuses one prompt for a whole task; building it
    // twice must give the same string
    let text = "PPM1D dephosphorylates RUNX2.";
    assert_eq!(enzyme_substrate_prompt(text), enzyme_substrate_prompt(text));
    assert_eq!(kinase_substrate_prompt(text), kinase_substrate_prompt(text));
}
