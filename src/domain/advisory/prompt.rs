use crate::domain::tts::LanguageCode;

const DEFAULT_IMAGE_QUESTION: &str = "Please analyze this image.";

/// Prompt for a photo of a crop, with the farmer's question if they wrote one
pub fn image_prompt(question: &str, language: LanguageCode) -> String {
    let question = if question.trim().is_empty() {
        DEFAULT_IMAGE_QUESTION
    } else {
        question.trim()
    };

    format!(
        "You are an expert agricultural assistant for Indian farmers. \
         Analyze the provided image and the user's question. \
         User's question: \"{question}\". \
         Your tasks: 1. Identify the plant and disease. \
         2. Provide a simple explanation. \
         3. List one organic and one chemical treatment. \
         Use short, simple sentences. \
         IMPORTANT: Respond ONLY in the {language} language.",
        question = question,
        language = language.display_name(),
    )
}

/// Prompt for a text-only question
pub fn text_prompt(question: &str, language: LanguageCode) -> String {
    format!(
        "You are an expert agricultural assistant for Indian farmers. \
         The user's question is: \"{question}\". \
         Provide a helpful, concise answer. \
         Use short, simple sentences. \
         IMPORTANT: Respond ONLY in the {language} language.",
        question = question.trim(),
        language = language.display_name(),
    )
}
