// Prompt text for question generation. The labelled layout below is what
// `provider::parser` expects back.

pub const QUESTION_PROMPT: &str = "Create a short Python multiple-choice question (MCQ) with 4 options (A-D), \
    one correct answer, a brief explanation, and a difficulty tag (easy, medium, or hard). \
    It should test Python knowledge at any level and be suitable for TikTok-style graphic slides.\n\n\
    Format:\n\
    Difficulty:\n\
    Question:\n\
    Options:\n\
    Answer:\n\
    Explanation:";
