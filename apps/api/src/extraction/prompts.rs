// All LLM prompt constants for the extraction module.
// Each module that needs model calls defines its own prompts.rs alongside it.

/// System prompt for resume extraction — enforces JSON-only output.
pub const EXTRACTION_SYSTEM: &str =
    "You are an expert resume analyst for a campus placement portal. \
    Extract structured candidate information from raw resume text. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Extraction prompt template. Replace `{resume_text}` before sending.
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract structured information from the following resume text.

Return a JSON object with this EXACT schema (no extra fields):
{
  "name": "Full Name",
  "email": "person@example.com",
  "phone": "+1 415 555 0132",
  "skills": ["python", "react"],
  "education": ["BSc Computer Science, State University, 2022"],
  "projects": ["Realtime chat app using websockets"],
  "experience": ["Backend intern at Acme Corp, summer 2021"],
  "confidence": 0.85
}

Rules for extraction:
- Every field MUST be present. If information is absent, use "" for strings
  and [] for lists. NEVER omit a field and NEVER use null.
- "skills" is a flat list of individual skill names, no duplicates.
- "education", "projects", and "experience" are lists of short free-text
  line items, one item per entry found in the resume.
- "confidence" is your own estimate, between 0 and 1, of how faithful and
  complete this extraction is. Report it honestly: garbled, truncated, or
  non-resume input deserves a low value.

RESUME TEXT:
{resume_text}"#;
