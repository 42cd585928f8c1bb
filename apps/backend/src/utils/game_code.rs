//! Game code generation for sessions.
//!
//! Game codes are 5-character strings drawn from Crockford's Base32
//! alphabet. The generator knows nothing about existing sessions; the
//! registry collision-checks each draw against its code index.

use rand::Rng;

use crate::infra::rng::GameRng;

/// Length of a game code.
pub const CODE_LENGTH: usize = 5;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

/// Draw a candidate game code.
///
/// Selects `CODE_LENGTH` characters uniformly from Crockford's Base32
/// alphabet using the shared game RNG.
pub fn generate_game_code(rng: &GameRng) -> String {
    rng.with(|rng| {
        let mut code = String::with_capacity(CODE_LENGTH);
        for _ in 0..CODE_LENGTH {
            code.push(CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char);
        }
        code
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_game_code_has_correct_length() {
        let code = generate_game_code(&GameRng::new(None));
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_game_code_uses_the_alphabet() {
        let code = generate_game_code(&GameRng::new(None));
        assert!(code.bytes().all(|b| CROCKFORD.contains(&b)));
    }

    #[test]
    fn test_generate_game_code_produces_different_results() {
        let rng = GameRng::new(None);
        let code1 = generate_game_code(&rng);
        let code2 = generate_game_code(&rng);
        assert_ne!(code1, code2);
    }

    #[test]
    fn test_seeded_codes_replay() {
        let code1 = generate_game_code(&GameRng::new(Some(11)));
        let code2 = generate_game_code(&GameRng::new(Some(11)));
        assert_eq!(code1, code2);
    }
}
