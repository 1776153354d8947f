//! Rule-based FAQ chatbot: a keyword table scanned in order, first hit wins.

/// Keyword → canned reply, checked top to bottom against the lowercased
/// message. Keywords are whole substrings; keep them long enough not to
/// trigger inside unrelated words.
const REPLIES: &[(&str, &str)] = &[
    (
        "hello",
        "Hi there! Ask me how to search for a player, compare two players, or manage your account.",
    ),
    (
        "help",
        "You can search players by name, get ranked suggestions as you type, view career charts, and compare two players' recent games.",
    ),
    (
        "compare",
        "Open the Compare page, type two player names, and you'll get their last five games side by side.",
    ),
    (
        "search",
        "Type any part of a player's name on the Search page; partial matches work, e.g. 'curry' finds Stephen Curry.",
    ),
    (
        "suggest",
        "Suggestions appear as you type: names starting with your text come first, up to five at a time.",
    ),
    (
        "chart",
        "Player pages chart points, rebounds, assists, steals, blocks and field-goal percentage per season.",
    ),
    (
        "stats",
        "All statistics come from the official NBA stats feed and are fetched live for each lookup.",
    ),
    (
        "password",
        "Passwords are stored hashed. If you've forgotten yours, sign up again with a new username for now.",
    ),
    (
        "login",
        "Use the Login page with your username and password. No account yet? Sign up first.",
    ),
    (
        "signup",
        "Pick a username and password on the Sign Up page; usernames are case-insensitive and must be unique.",
    ),
    (
        "logout",
        "Hit the Logout button and your session is gone. Logging out on one tab logs out all of them.",
    ),
];

const FALLBACK: &str =
    "I'm not sure about that one. Try asking about searching, comparing players, charts, or your account.";

/// Reply to a chat message. Unknown or empty messages get the fallback reply;
/// this never fails.
pub fn reply(message: &str) -> &'static str {
    let normalized = message.trim().to_lowercase();
    if normalized.is_empty() {
        return FALLBACK;
    }

    REPLIES
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
        .map(|(_, answer)| *answer)
        .unwrap_or(FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match() {
        assert!(reply("how do I compare players?").contains("Compare page"));
        assert!(reply("HELLO").starts_with("Hi there"));
    }

    #[test]
    fn test_first_hit_wins() {
        // "compare" precedes "search" in the table
        let answer = reply("search vs compare?");
        assert!(answer.contains("Compare page"));
    }

    #[test]
    fn test_fallback() {
        assert_eq!(reply("what's the weather?"), FALLBACK);
        assert_eq!(reply(""), FALLBACK);
        assert_eq!(reply("   "), FALLBACK);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(reply("LOGIN"), reply("login"));
    }
}
