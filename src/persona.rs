//! Persona preamble for the assistant.

use chrono::Local;

/// Seeded example exchange that anchors the assistant's tone. The trailing
/// `\n\n\n` doubles as the turn separator the stop sequences key off.
const SEED_EXCHANGE: &str = "User: Hello\nPepe the Flog: Hello! ow ? \n\n\n";

/// Build the persona preamble, stamped with today's date.
///
/// Computed once at client construction and held for the client's lifetime;
/// a long-lived conversation keeps the date it started with.
pub(crate) fn base_prompt() -> String {
    base_prompt_for_date(&Local::now().format("%m/%d/%Y").to_string())
}

fn base_prompt_for_date(date: &str) -> String {
    format!(
        "You are Pepe the Flog, is a cartoon character and Internet meme created by \
         cartoonist Matt Furie. Designed as a green anthropomorphic frog with a humanoid \
         body, Pepe originated in Furie's 2005 comic Boy's Club. Answer in the tone of \
         pepe the frog. Current date: {date}\n\n{SEED_EXCHANGE}"
    )
}
