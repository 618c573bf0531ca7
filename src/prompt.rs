//! Prompt construction for the extraction tasks.
//!
//! Two variants, selected per task: the enzyme-substrate prompt asks for a
//! flat list-of-pairs literal, the kinase-substrate prompt additionally
//! hints the candidate UniProt accessions found in the text and asks for a
//! mapping literal. Both are pure functions of their input; the same prompt
//! is reused across every retry of a task.

use crate::uniprot::possible_uniprot_ids;

/// Instruction sent alongside every prompt: the models produce noticeably
/// better pair lists when made to reason in prose before answering.
pub const REASONING_INSTRUCTION: &str = "Do not give the final result immediately. \
     First, explain your thought process, then provide the answer.";

/// Build the enzyme-substrate extraction prompt (list-of-pairs output).
pub fn enzyme_substrate_prompt(paper_text: &str) -> String {
    format!(
        r#"
The following text is an excerpt from a scientific paper discussing enzymatic activity:
{paper_text}

### Task: Extract Enzyme–Substrate Relationships

Carefully analyze the text, **line by line and section by section**, and follow these steps:

### Step 1: Identify Enzymes and Their Substrates
- Locate all **enzymes** mentioned in the text. An enzyme is a protein that **catalyzes a biochemical reaction**, such as phosphorylation, dephosphorylation, cleavage, methylation, etc.
- For each enzyme, identify the **specific substrate or reactant** it acts upon.
- Only include relationships where the **action is explicitly stated or clearly implied** in the text (e.g., "Enzyme A dephosphorylates Protein B at site X").

### Step 2: Normalize Names (If Possible)
- Whenever possible, use the **standard gene symbol**, **protein name**, or **EC number** to represent the enzyme and substrate.
- If a normalized name cannot be confidently determined from context, fall back to using the **exact wording from the original text**.

### Step 3: Format the Output
- Present each enzyme–substrate pair as a **Python list** (in text), using the best available names per Step 2.
- The list format should look like this:
  python
  <<[
      ["Enzyme Name", "Substrate Name"],
      ...
  ]>>

-- For example:
    <<[
        ["PPM1D", "RUNX2"],
        ["CDK1", "Histone H1"],
        ["PPP2CA", "TP53"],
        ["CASP3", "PARP1"]
    ]>>
"#
    )
}

/// Build the kinase-substrate extraction prompt (mapping output), hinting
/// the candidate UniProt accessions scanned from the text.
pub fn kinase_substrate_prompt(paper_text: &str) -> String {
    let candidates = possible_uniprot_ids(paper_text);
    let candidate_list = if candidates.is_empty() {
        "None found".to_string()
    } else {
        candidates.join(", ")
    };

    format!(
        r#"
The following text is an excerpt from a scientific paper discussing kinase-substrate relationships:
{paper_text}

### **Extracted Possible UniProt IDs**
These are all potential UniProt IDs found in the text:
{candidate_list}

Carefully analyze the document, **line by line and section by section**, and follow these steps:

### Step 1: Identify Kinases and Their Substrates
- Locate all **protein kinases** mentioned in the text. A kinase is an enzyme that catalyzes the **phosphorylation** of a substrate.
- Identify the **substrates** that each kinase phosphorylates.
- Ensure that each kinase-substrate pair is **directly supported by evidence** in the text.

### Step 2: Validate UniProt IDs
- Cross-check the possible UniProt IDs against the **correct species and protein function**.
- If multiple isoforms exist, list them all under `"Possible Matches"` and select the **most relevant** one based on the text.

### Step 3: Format the Output
- Present the kinase-substrate pairs as a **Python dictionary** enclosed in double angle brackets <<>>.
- Each dictionary entry should follow this format:
  python
  <<{{
      "Kinase UniProt ID": "Substrate UniProt ID",
      ...
  }}>>
-- For example:
    <<{{
    "Q86U12": "Q9FCE5",
    "Q86123": "Q15502",
    "Q86U33": "Q04950",
    "Q23454": "Q44444"
    }}>>
"#
    )
}
