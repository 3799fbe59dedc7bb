// All LLM prompt constants for the analysis module.

/// Full-resume analysis prompt. Replace `{resume_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert ATS and recruitment professional. Analyze this resume for hiring signals.

RESUME:
{resume_text}

Provide a JSON response with this exact structure:
{
  "errors": [
    {
      "category": "error_type",
      "severity": "high|medium|low",
      "description": "specific issue found",
      "example": "actual text from resume"
    }
  ],
  "atsOptimizations": [
    {
      "title": "fix_title",
      "currentState": "what's wrong now",
      "improvement": "specific action to take",
      "expectedImpact": "ATS score improvement"
    }
  ],
  "strengths": ["strength1", "strength2", "strength3"],
  "estimatedATSLift": 5
}

Focus on:
1. Formatting issues that harm ATS parsing
2. Missing critical keywords or sections
3. Weak action verbs or vague impact statements
4. Inconsistent date formats
5. Contact info visibility
6. Quantifiable metrics presence
7. Proper chronological order"#;

pub fn analysis_prompt(resume_text: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

pub fn question_prompt(question: &str, snippets: &[String]) -> String {
    let bullets = snippets
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "You are an AI resume coach. \
        Answer the question using ONLY the resume snippets below. \
        If the answer is not in the snippets, say you need more detail.\n\n\
        Resume snippets:\n{bullets}\n\n\
        Question: {question}\n\n\
        Respond with 2-4 sentences. Include a short actionable recommendation."
    )
}
