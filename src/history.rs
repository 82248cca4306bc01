//! Rolling conversation history and prompt rendering.

/// Ceiling on the rendered prompt length, a crude four-characters-per-token
/// heuristic over the model's context budget.
pub(crate) const PROMPT_CHAR_BUDGET: usize = 4000 * 4;

/// Ordered list of completed turns, oldest first.
#[derive(Debug, Default)]
pub(crate) struct History {
    entries: Vec<String>,
}

impl History {
    pub(crate) fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Record a completed turn.
    pub(crate) fn push_turn(&mut self, user_text: &str, reply: &str) {
        self.entries
            .push(format!("User: {user_text}\n\n\nChatGPT: {reply}\n"));
    }

    /// Render the full prompt for the next turn: preamble, every history
    /// entry in order, then the current user line with the assistant cue.
    ///
    /// While the result exceeds [`PROMPT_CHAR_BUDGET`], the oldest entry is
    /// dropped and the prompt re-rendered. The drops land on the real
    /// history, so context forgotten here stays forgotten for every later
    /// turn. With history empty the prompt is returned as-is, over budget or
    /// not.
    pub(crate) fn render_prompt(&mut self, base_prompt: &str, user_text: &str) -> String {
        loop {
            let prompt = format!(
                "{base_prompt}{}User: {user_text}\nPepe the Frog:",
                self.entries.concat()
            );
            if prompt.chars().count() <= PROMPT_CHAR_BUDGET || self.entries.is_empty() {
                return prompt;
            }
            self.entries.remove(0);
        }
    }
}
