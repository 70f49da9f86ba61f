//! Prompt assembly.
//!
//! Builds the fixed two-message sequence sent to the model: the system
//! persona followed by one user message embedding the data context and
//! the question. Pure and deterministic; no conversation history is
//! ever carried between calls.

use aquadata_core::message::Message;

/// The assistant persona and topic scope. Configuration data, not
/// logic — config may swap it out wholesale.
pub const WATER_SYSTEM_PROMPT: &str = "\
You are a specialized water quality data assistant with expertise in practical water uses and water body management. You answer questions about:

1. Water Quality & Parameters:
   - Water quality measurements and standards
   - Physical, chemical, and biological parameters
   - Contamination levels and their implications

2. Water Bodies:
   - Lakes, rivers, ponds, streams, reservoirs
   - Coastal waters and marine environments
   - Natural springs and groundwater

3. Cleaning & Treatment:
   - Water body cleaning methods
   - Treatment processes and technologies
   - Purification and filtration systems
   - Maintenance and restoration practices

4. Practical Uses:
   - Drinking water requirements
   - Agricultural irrigation
   - Industrial applications
   - Recreational activities (swimming, fishing)
   - Domestic use considerations

5. Conservation & Management:
   - Environmental protection
   - Ecosystem preservation
   - Sustainable water use
   - Pollution prevention

Base your answers on the provided context data and focus on practical, actionable information. If discussing cleaning or treatment, include relevant quality parameters and standards. For practical uses, consider safety requirements and quality thresholds.

Remember: Provide specific, practical advice while maintaining technical accuracy.";

/// Exactly two messages, in fixed order: the system prompt unmodified,
/// then `"Context: {context}\n\nQuestion: {question}"` as the user turn.
pub fn build_messages(system_prompt: &str, context: &str, question: &str) -> Vec<Message> {
    vec![
        Message::system(system_prompt),
        Message::user(format!("Context: {context}\n\nQuestion: {question}")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquadata_core::message::Role;

    #[test]
    fn exactly_two_messages_in_fixed_order() {
        let messages = build_messages("persona", "tabla", "¿pregunta?");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn system_prompt_passes_through_unmodified() {
        let messages = build_messages(WATER_SYSTEM_PROMPT, "", "q");
        assert_eq!(messages[0].content, WATER_SYSTEM_PROMPT);
    }

    #[test]
    fn user_message_embeds_context_then_question() {
        let context = "ESTADO  PH\nJalisco  7.8";
        let question = "¿Es apta para riego?";
        let messages = build_messages("s", context, question);

        let user = &messages[1].content;
        let ctx_at = user.find("Context: ").unwrap();
        let q_at = user.find("\n\nQuestion: ").unwrap();
        assert!(ctx_at < q_at);
        assert!(user[ctx_at..q_at].contains(context));
        assert!(user[q_at..].ends_with(question));
    }

    #[test]
    fn empty_context_still_produces_both_markers() {
        let messages = build_messages("s", "", "agua");
        assert_eq!(messages[1].content, "Context: \n\nQuestion: agua");
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let a = build_messages("s", "c", "q");
        let b = build_messages("s", "c", "q");
        assert_eq!(a, b);
    }
}
