// Quote rotation never shows the same quote twice in a row

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use zendash::engine::quote::QUOTE_FADE_MS;
use zendash::engine::{QuoteTile, ZEN_QUOTES};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_next_quote_never_repeats(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tile = QuoteTile::new(&mut rng);

        for _ in 0..1000 {
            let previous = tile.index();
            let next = tile.next_quote(&mut rng);
            prop_assert_ne!(next, previous);
            prop_assert!(next < ZEN_QUOTES.len());
        }
    }
}

#[test]
fn test_fade_gates_repeated_advances() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut tile = QuoteTile::new(&mut rng);
    let start = 1_000;

    assert!(tile.advance(&mut rng, start));
    let shown = tile.index();
    assert!(tile.is_fading(start + QUOTE_FADE_MS - 1));
    assert!(!tile.advance(&mut rng, start + 10));
    assert_eq!(tile.index(), shown);

    assert!(!tile.is_fading(start + QUOTE_FADE_MS));
    assert!(tile.advance(&mut rng, start + QUOTE_FADE_MS));
    assert_ne!(tile.index(), shown);
}

#[test]
fn test_every_quote_is_trilingual() {
    assert_eq!(ZEN_QUOTES.len(), 6);
    for quote in ZEN_QUOTES {
        assert!(!quote.ja.is_empty());
        assert!(!quote.en.is_empty());
        assert!(!quote.tw.is_empty());
    }
}
