pub const SYSTEM_PROMPT: &str = "You are a helpful AI medical coder.";

/// Builds the user prompt asking the model to code `prescription_text`.
pub fn coding_prompt(prescription_text: &str) -> String {
    format!(
        r#"You are a medical coder. A doctor has shared the following prescription:

"""
{prescription_text}
"""

Please extract and return a structured JSON array with:
- Patient Name (if available)
- Date (if available)
- Disease
- ICD-10 Code
- Medicine
- RxNorm or ATC Code (use RxNorm if both are known)
- Dosage or Frequency

Format like:
[
  {{
    "patient": "Rajesh",
    "date": "04-Apr-2025",
    "disease": "Fever",
    "icd10": "R50.9",
    "medicine": "Paracetamol",
    "medicine_code": "N02BE01",
    "dosage": "500mg twice a day"
  }}
]"#
    )
}
