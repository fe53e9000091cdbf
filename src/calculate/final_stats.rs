//! Final stat calculation from base stats, EVs, IVs and nature.

use crate::models::{Nature, Stat};

pub const DEFAULT_LEVEL: u32 = 100;
pub const DEFAULT_IVS: [u32; 6] = [31; 6];

/// Final `[hp, atk, def, spa, spd, spe]` at `level`.
///
/// `nature = None` is neutral. Shedinja-style base HP of 1 always yields 1 HP.
pub fn calculate_stats(
    base: [u32; 6],
    evs: [u16; 6],
    nature: Option<Nature>,
    level: u32,
    ivs: [u32; 6],
) -> [u32; 6] {
    let mut out = [0u32; 6];

    for stat in Stat::ALL {
        let i = stat.index();
        let core = (2 * base[i] + ivs[i] + u32::from(evs[i]) / 4) * level / 100;

        out[i] = match stat {
            Stat::Hp if base[i] == 1 => 1,
            Stat::Hp => core + level + 10,
            _ => {
                let raw = core + 5;
                let multiplier = nature.map(|n| n.multiplier(stat)).unwrap_or(1.0);
                (f64::from(raw) * multiplier).floor() as u32
            }
        };
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garchomp_jolly() {
        // 108/130/95/80/85/102
        let stats = calculate_stats(
            [108, 130, 95, 80, 85, 102],
            [0, 252, 0, 0, 4, 252],
            Some(Nature::Jolly),
            DEFAULT_LEVEL,
            DEFAULT_IVS,
        );
        assert_eq!(stats, [357, 359, 226, 176, 207, 333]);
    }

    #[test]
    fn test_neutral_nature() {
        let stats = calculate_stats([100; 6], [0; 6], None, DEFAULT_LEVEL, DEFAULT_IVS);
        assert_eq!(stats, [341, 236, 236, 236, 236, 236]);

        let hardy = calculate_stats([100; 6], [0; 6], Some(Nature::Hardy), DEFAULT_LEVEL, DEFAULT_IVS);
        assert_eq!(stats, hardy);
    }

    #[test]
    fn test_shedinja_hp() {
        let stats = calculate_stats([1, 90, 45, 30, 30, 40], [252; 6], None, DEFAULT_LEVEL, DEFAULT_IVS);
        assert_eq!(stats[0], 1);
    }

    #[test]
    fn test_zero_speed_iv() {
        let stats = calculate_stats(
            [100; 6],
            [0; 6],
            Some(Nature::Brave),
            DEFAULT_LEVEL,
            [31, 31, 31, 31, 31, 0],
        );
        // (200 + 0) + 5 = 205, * 0.9 = 184.5
        assert_eq!(stats[5], 184);
        assert_eq!(stats[1], 259);
    }

    #[test]
    fn test_level_50() {
        let stats = calculate_stats([100; 6], [0; 6], None, 50, DEFAULT_IVS);
        assert_eq!(stats[0], 175);
        assert_eq!(stats[1], 120);
    }
}
