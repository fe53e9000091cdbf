//! EV spread and nature decoding.
//!
//! Spread keys look like `"Adamant:0/252/0/0/4/252"`. Each spread is folded
//! into five buckets that describe one aspect of the investment, so spreads
//! that differ elsewhere but agree on, say, Speed merge into one entry.

use crate::calculate::distribution::{normalize, select_top, Denominator, DEFAULT_MIN_COUNT};
use crate::models::{EvBuckets, EvShare, Nature, Share, SpreadShare, Stat, Weights};

/// A parsed spread key.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadKey {
    /// Nature text as written in the feed
    pub nature_name: String,
    /// `None` when the nature text is not a known nature
    pub nature: Option<Nature>,
    /// `[hp, atk, def, spa, spd, spe]`
    pub evs: [u16; 6],
}

impl SpreadKey {
    /// Parse `"<Nature>:<H>/<A>/<D>/<C>/<D>/<S>"`.
    pub fn parse(key: &str) -> Option<Self> {
        let (nature_name, evs) = key.split_once(':')?;

        let values: Vec<u16> = evs
            .split('/')
            .map(|v| v.trim().parse::<u16>())
            .collect::<Result<_, _>>()
            .ok()?;
        let evs: [u16; 6] = values.try_into().ok()?;

        Some(Self {
            nature_name: nature_name.to_string(),
            nature: nature_name.parse().ok(),
            evs,
        })
    }

    fn ev(&self, stat: Stat) -> u16 {
        self.evs[stat.index()]
    }

    fn sign(&self, stat: Stat) -> &'static str {
        self.nature.map(|n| n.sign(stat)).unwrap_or("")
    }

    fn single(&self, stat: Stat) -> String {
        format!("{}{} {}", self.ev(stat), self.sign(stat), stat.label())
    }

    fn with_hp(&self, stat: Stat) -> String {
        format!(
            "{} {} / {}{} {}",
            self.ev(Stat::Hp),
            Stat::Hp.label(),
            self.ev(stat),
            self.sign(stat),
            stat.label()
        )
    }

    /// Bucket keys in `[atk, spa, spe, hp_def, hp_spd]` order.
    pub fn bucket_keys(&self) -> [String; 5] {
        [
            self.single(Stat::Atk),
            self.single(Stat::Spa),
            self.single(Stat::Spe),
            self.with_hp(Stat::Def),
            self.with_hp(Stat::Spd),
        ]
    }
}

/// Fold spreads into the five EV buckets, each normalized against
/// `popularity` and trimmed with the adaptive top-N rule.
pub fn decode_evs(spreads: &Weights, popularity: f64) -> EvBuckets {
    let mut raw: [Vec<(String, f64)>; 5] = Default::default();

    for (key, weight) in spreads.iter() {
        let Some(spread) = SpreadKey::parse(key) else {
            continue;
        };
        for (bucket, bucket_key) in raw.iter_mut().zip(spread.bucket_keys()) {
            bucket.push((bucket_key, weight));
        }
    }

    let [atk, spa, spe, hp_def, hp_spd] = raw.map(|pairs| {
        let weights: Weights = pairs.into_iter().collect();
        select_top(
            normalize(&weights, Denominator::Popularity(popularity)),
            DEFAULT_MIN_COUNT,
        )
        .into_iter()
        .map(|s| EvShare {
            ev_string: s.name,
            usage_percent: s.usage_percent,
        })
        .collect::<Vec<_>>()
    });

    EvBuckets {
        atk,
        spa,
        spe,
        hp_def,
        hp_spd,
    }
}

/// Nature distribution: spread weights summed by the text before `:`.
pub fn natures(spreads: &Weights, popularity: f64) -> Vec<Share> {
    let weights: Weights = spreads
        .iter()
        .filter_map(|(key, weight)| {
            let (nature, _) = key.split_once(':')?;
            (!nature.is_empty()).then(|| (nature.to_string(), weight))
        })
        .collect();

    normalize(&weights, Denominator::Popularity(popularity))
        .into_iter()
        .map(|s| Share {
            name: s.name,
            usage_percent: s.usage_percent,
        })
        .collect()
}

/// Most common full spreads.
pub fn top_spreads(spreads: &Weights, popularity: f64) -> Vec<SpreadShare> {
    select_top(
        normalize(spreads, Denominator::Popularity(popularity)),
        DEFAULT_MIN_COUNT,
    )
    .into_iter()
    .map(|s| SpreadShare {
        spread: s.name,
        usage_percent: s.usage_percent,
    })
    .collect()
}
