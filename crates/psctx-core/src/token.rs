//! # Token Generator
//!
//! Produces short random tokens standing in for schema namespaces and
//! records each new `<token>:` → namespace mapping in the working context.
//!
//! A draw renders `draw_len` random base-36 digits, keeps only the letters
//! `a`–`z`, and truncates to `token_len`. Draws that keep fewer letters
//! give shorter tokens (possibly empty); they are accepted as-is.
//!
//! ## Invariants
//!
//! - A returned token's key (`<token>:`) was absent from the context
//!   before the call and is present after it.
//! - Retries are bounded by `max_attempts`; exhaustion is reported as
//!   `ContextError::TokenSpaceExhausted` rather than looping forever.
//!
//! The read-check-insert sequence is not atomic. `generate` takes
//! `&mut Context`, so the borrow checker rules out unsynchronized sharing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::context::{Context, TOKEN_SEPARATOR};
use crate::error::ContextError;
use crate::options::TokenOptions;

const RADIX: u32 = 36;

/// Random token source bound to a set of `TokenOptions`.
#[derive(Debug, Clone)]
pub struct TokenGenerator<R = StdRng> {
    rng: R,
    options: TokenOptions,
}

impl TokenGenerator<StdRng> {
    /// Generator seeded from OS entropy with default options.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            options: TokenOptions::default(),
        }
    }

    /// Generator seeded from OS entropy with the given options.
    pub fn with_options(options: TokenOptions) -> Result<Self, ContextError> {
        Self::with_rng(StdRng::from_entropy(), options)
    }
}

impl<R: Rng> TokenGenerator<R> {
    /// Generator over a caller-supplied RNG.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::Options` if `options` fails validation.
    pub fn with_rng(rng: R, options: TokenOptions) -> Result<Self, ContextError> {
        options.validate()?;
        Ok(Self { rng, options })
    }

    /// Options this generator was built with.
    pub fn options(&self) -> &TokenOptions {
        &self.options
    }

    /// One candidate token. Not checked against any context.
    pub fn draw(&mut self) -> String {
        let rng = &mut self.rng;
        (0..self.options.draw_len)
            .filter_map(|_| std::char::from_digit(rng.gen_range(0..RADIX), RADIX))
            .filter(char::is_ascii_lowercase)
            .take(self.options.token_len)
            .collect()
    }

    /// Draw an unused token for `namespace`, insert `<token>:` → `namespace`
    /// into `context`, and return the bare token.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::TokenSpaceExhausted` if every one of
    /// `max_attempts` draws collides with an existing key.
    pub fn generate(&mut self, context: &mut Context, namespace: &str) -> Result<String, ContextError> {
        for attempt in 1..=self.options.max_attempts {
            let token = self.draw();
            let key = format!("{token}{TOKEN_SEPARATOR}");
            if context.contains_token(&key) {
                tracing::trace!(%key, attempt, "token collision, redrawing");
                continue;
            }
            context.insert(key, namespace);
            tracing::debug!(%token, namespace, attempt, "generated context token");
            return Ok(token);
        }

        Err(ContextError::TokenSpaceExhausted {
            namespace: namespace.to_string(),
            attempts: self.options.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn seeded(seed: u64) -> TokenGenerator {
        TokenGenerator::with_rng(StdRng::seed_from_u64(seed), TokenOptions::default()).unwrap()
    }

    #[test]
    fn draw_is_short_and_lowercase_alphabetic() {
        let mut gen = seeded(7);
        for _ in 0..500 {
            let t = gen.draw();
            assert!(t.len() <= 3, "token too long: {t}");
            assert!(t.chars().all(|c| c.is_ascii_lowercase()), "bad token: {t}");
        }
    }

    #[test]
    fn generate_inserts_colon_key() {
        let mut gen = seeded(1);
        let mut ctx = Context::new();
        let token = gen.generate(&mut ctx, "https://example.com/example#").unwrap();

        assert!(!token.ends_with(':'));
        assert_eq!(
            ctx.get(&format!("{token}:")),
            Some("https://example.com/example#")
        );
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn generate_never_reuses_existing_keys() {
        let mut gen = seeded(42);
        let mut ctx = Context::new();
        for i in 0..300 {
            let ns = format!("https://ns{i}.example/#");
            gen.generate(&mut ctx, &ns).unwrap();
        }
        // Every namespace got its own key.
        assert_eq!(ctx.len(), 300);
    }

    #[test]
    fn same_seed_same_tokens() {
        let mut a = seeded(99);
        let mut b = seeded(99);
        for _ in 0..20 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn letterless_draws_give_empty_token() {
        // A constant-zero RNG only ever renders the digit '0'.
        let mut gen = TokenGenerator::with_rng(StepRng::new(0, 0), TokenOptions::default()).unwrap();
        let mut ctx = Context::new();
        let token = gen.generate(&mut ctx, "https://a.example/#").unwrap();
        assert_eq!(token, "");
        assert_eq!(ctx.get(":"), Some("https://a.example/#"));
    }

    #[test]
    fn exhaustion_is_reported() {
        let options = TokenOptions {
            max_attempts: 5,
            ..TokenOptions::default()
        };
        let mut gen = TokenGenerator::with_rng(StepRng::new(0, 0), options).unwrap();
        let mut ctx = Context::from_pairs([(":", "https://taken.example/#")]);

        match gen.generate(&mut ctx, "https://b.example/#") {
            Err(ContextError::TokenSpaceExhausted { namespace, attempts }) => {
                assert_eq!(namespace, "https://b.example/#");
                assert_eq!(attempts, 5);
            }
            other => panic!("expected TokenSpaceExhausted, got {other:?}"),
        }
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn collision_against_bare_token_is_not_a_collision() {
        // Only the `<token>:` key shape counts as taken.
        let mut gen = TokenGenerator::with_rng(StepRng::new(0, 0), TokenOptions::default()).unwrap();
        let mut ctx = Context::from_pairs([("", "https://bare.example/#")]);
        let token = gen.generate(&mut ctx, "https://c.example/#").unwrap();
        assert_eq!(token, "");
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn with_options_keeps_settings() {
        let options = TokenOptions {
            token_len: 2,
            ..TokenOptions::default()
        };
        let mut gen = TokenGenerator::with_options(options.clone()).unwrap();
        assert_eq!(gen.options(), &options);
        assert!(gen.draw().len() <= 2);
    }

    #[test]
    fn invalid_options_rejected() {
        let options = TokenOptions {
            token_len: 0,
            ..TokenOptions::default()
        };
        assert!(TokenGenerator::with_rng(StepRng::new(0, 1), options).is_err());
    }
}
