// Rotating zen quote tile

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZenQuote {
    pub ja: &'static str,
    pub en: &'static str,
    pub tw: &'static str,
}

pub const ZEN_QUOTES: &[ZenQuote] = &[
    ZenQuote {
        ja: "一期一會",
        en: "Treasure every meeting, for it will never recur.",
        tw: "珍惜每個瞬間，因為它永不再來。",
    },
    ZenQuote {
        ja: "日日是好日",
        en: "Every day is a good day.",
        tw: "放下執著，每一天都是生命中最好的日子。",
    },
    ZenQuote {
        ja: "知足常樂",
        en: "Contentment is natural wealth.",
        tw: "知足便是最富有的狀態，能從平凡中見喜悅。",
    },
    ZenQuote {
        ja: "初心忘るべからず",
        en: "Don't forget your beginner's mind.",
        tw: "始終保持初學者的好奇與謙卑，莫忘初衷。",
    },
    ZenQuote {
        ja: "行雲流水",
        en: "Like drifting clouds and flowing water.",
        tw: "順應自然，不執著於定態，心境如流雲流水般自在。",
    },
    ZenQuote {
        ja: "和敬清寂",
        en: "Harmony, Respect, Purity, Tranquility.",
        tw: "在和諧與尊敬中尋找純淨，達到內心的寧靜。",
    },
];

/// Length of the fade that brackets a quote change.
pub const QUOTE_FADE_MS: i64 = 300;

/// Pick a uniformly random index in `0..len` other than `current`.
///
/// With a single entry there is nothing else to pick, so `current` is kept.
pub fn pick_different<R: Rng + ?Sized>(rng: &mut R, len: usize, current: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    loop {
        let candidate = rng.gen_range(0..len);
        if candidate != current {
            return candidate;
        }
    }
}

pub struct QuoteTile {
    catalog: &'static [ZenQuote],
    index: usize,
    fade_until: Option<i64>,
}

impl QuoteTile {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_catalog(ZEN_QUOTES, rng)
    }

    pub fn with_catalog<R: Rng + ?Sized>(catalog: &'static [ZenQuote], rng: &mut R) -> Self {
        let index = if catalog.is_empty() {
            0
        } else {
            rng.gen_range(0..catalog.len())
        };
        Self {
            catalog,
            index,
            fade_until: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&ZenQuote> {
        self.catalog.get(self.index)
    }

    /// Move to a different random quote and return its index.
    pub fn next_quote<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        self.index = pick_different(rng, self.catalog.len(), self.index);
        self.index
    }

    /// User-triggered advance with a fade. Ignored while a fade is running.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, now_ms: i64) -> bool {
        if self.is_fading(now_ms) {
            return false;
        }
        self.next_quote(rng);
        self.fade_until = Some(now_ms + QUOTE_FADE_MS);
        true
    }

    pub fn is_fading(&self, now_ms: i64) -> bool {
        self.fade_until.is_some_and(|until| now_ms < until)
    }
}
