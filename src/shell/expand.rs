use super::tokenize::tokenize;
use crate::core::state::ShellState;

/// Rewrites `state.tokens` in place: variables first, then at most one alias
/// substitution on the leading token.
pub fn expand_tokens(state: &mut ShellState) {
    let tokens = std::mem::take(&mut state.tokens);
    let context: &ShellState = state;
    let expanded: Vec<String> = tokens
        .into_iter()
        .map(|token| {
            if token.contains('$') {
                expand_word(&token, context)
            } else {
                token
            }
        })
        .filter(|token| !token.is_empty())
        .collect();
    state.tokens = expanded;

    expand_alias(state);
}

/// Substitutes `$?`, `$$` and `$NAME` anywhere in `word`. Undefined names
/// expand to nothing; a `$` not followed by one of those forms is kept.
pub fn expand_word(word: &str, state: &ShellState) -> String {
    let mut result = String::with_capacity(word.len());
    let mut rest = word;

    while let Some(dollar_pos) = rest.find('$') {
        result.push_str(&rest[..dollar_pos]);
        let after = &rest[dollar_pos + 1..];

        match after.chars().next() {
            Some('?') => {
                result.push_str(&state.last_status.to_string());
                rest = &after[1..];
            }
            Some('$') => {
                result.push_str(&state.pid.to_string());
                rest = &after[1..];
            }
            Some(c) if is_name_char(c) => {
                let var_end = after
                    .find(|c: char| !is_name_char(c))
                    .unwrap_or(after.len());
                if let Some(value) = state.environment.get(&after[..var_end]) {
                    result.push_str(value);
                }
                rest = &after[var_end..];
            }
            _ => {
                result.push('$');
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}

/// Single pass: the replacement is never looked up again, so an alias that
/// names itself expands once.
fn expand_alias(state: &mut ShellState) {
    let Some(value) = state.tokens.first().and_then(|t| state.aliases.get(t)) else {
        return;
    };

    let mut expanded = tokenize(value);
    tracing::debug!(alias = %state.tokens[0], ?expanded, "alias expanded");
    expanded.extend(state.tokens.drain(1..));
    state.tokens = expanded;
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
