/// System instruction for the question-answering chain.
pub const SYSTEM_PROMPT: &str = "You are an assistant for question-answering tasks. \
Use the following pieces of retrieved context to answer the question. \
If you don't know the answer, say that you don't know. \
Use three sentences maximum and keep the answer concise.";

/// Stuff the retrieved chunk texts and the user's question into a single
/// prompt for the LLM. Composed fresh per request.
pub fn build_prompt(contexts: &[String], question: &str) -> String {
    let context = contexts.join("\n\n");
    format!("{}\n\nContext:\n{}\n\nQuestion: {}\nAnswer:", SYSTEM_PROMPT, context, question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_all_parts() {
        let contexts = vec![
            "The heart has four chambers.".to_string(),
            "Blood flows from the atria to the ventricles.".to_string(),
        ];
        let prompt = build_prompt(&contexts, "How many chambers does the heart have?");
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.contains("four chambers"));
        assert!(prompt.contains("atria"));
        assert!(prompt.contains("How many chambers does the heart have?"));
    }

    #[test]
    fn test_prompt_with_no_context() {
        let prompt = build_prompt(&[], "What is aspirin?");
        assert!(prompt.contains("What is aspirin?"));
    }
}
