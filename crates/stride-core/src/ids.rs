//! Prefixed random identifiers.
//!
//! Every ID is `{prefix}-{8 hex chars}`, e.g. `tsk-a3f8b2c1`. Randomness comes
//! from the operating system via `getrandom`.

use crate::errors::CoreError;

pub const PREFIX_ASSIGNMENT: &str = "asg";
pub const PREFIX_TASK: &str = "tsk";
pub const PREFIX_GROUP_PROJECT: &str = "grp";
pub const PREFIX_GROUP_TASK: &str = "gtk";
pub const PREFIX_UPDATE: &str = "upd";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_ASSIGNMENT,
    PREFIX_TASK,
    PREFIX_GROUP_PROJECT,
    PREFIX_GROUP_TASK,
    PREFIX_UPDATE,
];

/// Upper bound on re-draws when an ID collides with one already taken.
const MAX_DRAWS: usize = 16;

/// Generate a new prefixed ID.
///
/// # Errors
///
/// Returns `CoreError::IdGeneration` if the OS random source fails.
pub fn generate(prefix: &str) -> Result<String, CoreError> {
    let mut buf = [0u8; 4];
    getrandom::fill(&mut buf).map_err(|e| CoreError::IdGeneration(e.to_string()))?;
    Ok(format!(
        "{prefix}-{:02x}{:02x}{:02x}{:02x}",
        buf[0], buf[1], buf[2], buf[3]
    ))
}

/// Generate a prefixed ID for which `is_taken` returns `false`.
///
/// # Errors
///
/// Returns `CoreError::IdGeneration` if randomness fails or every draw collides.
pub fn generate_unique(prefix: &str, is_taken: impl Fn(&str) -> bool) -> Result<String, CoreError> {
    for _ in 0..MAX_DRAWS {
        let id = generate(prefix)?;
        if !is_taken(&id) {
            return Ok(id);
        }
    }
    Err(CoreError::IdGeneration(format!(
        "no free '{prefix}' id after {MAX_DRAWS} draws"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_prefix_and_hex_suffix() {
        for prefix in ALL_PREFIXES {
            let id = generate(prefix).unwrap();
            let (head, tail) = id.split_once('-').unwrap();
            assert_eq!(head, *prefix);
            assert_eq!(tail.len(), 8);
            assert!(tail.chars().all(|c| c.is_ascii_hexdigit()), "{id}");
        }
    }

    #[test]
    fn generate_unique_gives_up_when_everything_is_taken() {
        let err = generate_unique(PREFIX_TASK, |_| true).unwrap_err();
        assert!(matches!(err, CoreError::IdGeneration(_)));
    }
}
