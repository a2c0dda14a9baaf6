// ATS evaluation prompt. The output-format section is what the UI relies on
// for the report headers and emoji markers.

/// Builds the single prompt sent to the model.
///
/// Both inputs are embedded verbatim in one pass, so text inside either one
/// that looks like a placeholder is never substituted.
pub fn build_ats_prompt(job_description: &str, resume_text: &str) -> String {
    format!(
        "
    Act Like a skilled ATS (Application Tracking System).
    Evaluate the resume based on the given job description.

    JOB DESCRIPTION:
    {job_description}

    RESUME TEXT:
    {resume_text}

    OUTPUT FORMAT (Markdown):
    1. Start with a header \"## 📊 ATS Evaluation Report\".
    2. Then, show the Match Percentage prominently (e.g., \"### 🎯 Match Score: 85%\").
    3. List missing keywords using bullet points with an emoji (e.g., \"❌ Keyword\").
    4. Provide a profile summary under \"### 📝 Profile Summary\".
    5. Use Bold text (**text**) for emphasis.
    "
    )
}
