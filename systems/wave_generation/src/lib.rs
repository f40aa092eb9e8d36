#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave manifest generation.
//!
//! Each enemy kind contributes an independent stream of spawns with its own
//! start offset and cadence. Streams are merged on absolute spawn time with a
//! stable sort and converted back into relative delays, so the spawner only
//! ever decrements a single timer.

use sha2::{Digest, Sha256};
use tower_defence_core::{Difficulty, EnemyKind, SpawnEntry, WaveComposition};

/// Number of waves in every match.
pub const WAVE_COUNT: u32 = 15;

const BASE_BONUS: u32 = 20;
const BONUS_PER_WAVE: u32 = 5;
const OVERLORD_LEAD: f32 = 6.0;

/// Escalation band a wave index belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WaveBand {
    /// Waves 1 to 3: grunts only.
    Early,
    /// Waves 4 to 7: runners join.
    Middle,
    /// Waves 8 to 11: brutes join.
    Late,
    /// Waves 12 to 15: overlords close each wave.
    Final,
}

impl WaveBand {
    /// Band of the provided one-based wave index.
    #[must_use]
    pub const fn for_wave(wave: u32) -> Self {
        match wave {
            0..=3 => Self::Early,
            4..=7 => Self::Middle,
            8..=11 => Self::Late,
            _ => Self::Final,
        }
    }

    const fn bonus(self) -> u32 {
        match self {
            Self::Early => 0,
            Self::Middle => 10,
            Self::Late => 25,
            Self::Final => 50,
        }
    }
}

/// Timed stream of a single enemy kind before merging.
#[derive(Clone, Copy, Debug)]
struct Stream {
    kind: EnemyKind,
    count: u32,
    start: f32,
    interval: f32,
}

impl Stream {
    fn times(self) -> impl Iterator<Item = (f32, EnemyKind)> {
        (0..self.count).map(move |index| (self.start + index as f32 * self.interval, self.kind))
    }

    fn end(self) -> f32 {
        match self.count {
            0 => self.start,
            count => self.start + (count - 1) as f32 * self.interval,
        }
    }
}

/// Generates the manifests of every wave in the match.
#[must_use]
pub fn generate_waves(difficulty: Difficulty) -> Vec<WaveComposition> {
    (1..=WAVE_COUNT)
        .map(|wave| generate_wave(wave, difficulty))
        .collect()
}

/// Generates the manifest of a single one-based wave.
#[must_use]
pub fn generate_wave(wave: u32, difficulty: Difficulty) -> WaveComposition {
    let wave = wave.max(1);
    let mut streams = swarm_streams(wave, difficulty);

    if wave >= 12 {
        let swarm_end = streams
            .iter()
            .map(|stream| stream.end())
            .fold(0.0_f32, f32::max);
        streams.push(Stream {
            kind: EnemyKind::Overlord,
            count: scale(1 + (wave - 12) / 2, difficulty),
            start: swarm_end + OVERLORD_LEAD,
            interval: 8.0,
        });
    }

    let mut timeline: Vec<(f32, EnemyKind)> =
        streams.into_iter().flat_map(Stream::times).collect();
    timeline.sort_by(|left, right| left.0.total_cmp(&right.0));

    let mut previous = 0.0_f32;
    let entries = timeline
        .into_iter()
        .map(|(time, kind)| {
            let delay = (time - previous).max(0.0);
            previous = time;
            SpawnEntry { kind, delay }
        })
        .collect();

    WaveComposition {
        wave,
        entries,
        bonus: completion_bonus(wave),
    }
}

/// Gold credited when the provided wave is cleared; the final wave pays nothing.
#[must_use]
pub fn completion_bonus(wave: u32) -> u32 {
    if wave >= WAVE_COUNT {
        return 0;
    }
    BASE_BONUS + BONUS_PER_WAVE * wave + WaveBand::for_wave(wave).bonus()
}

/// Derives the seed of a wave-local random stream from the match seed.
#[must_use]
pub fn derive_wave_seed(seed: u64, wave: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(wave.to_le_bytes());
    finalize_seed(hasher)
}

fn finalize_seed(hasher: Sha256) -> u64 {
    let digest = hasher.finalize();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[0..8]);
    u64::from_le_bytes(bytes)
}

fn swarm_streams(wave: u32, difficulty: Difficulty) -> Vec<Stream> {
    let mut streams = vec![Stream {
        kind: EnemyKind::Grunt,
        count: scale(4 + 2 * wave, difficulty),
        start: 0.0,
        interval: (1.0 - 0.04 * (wave - 1) as f32).max(0.45),
    }];

    if wave >= 4 {
        streams.push(Stream {
            kind: EnemyKind::Runner,
            count: scale(3 + 2 * (wave - 4), difficulty),
            start: 1.5,
            interval: 0.55,
        });
    }

    if wave >= 8 {
        streams.push(Stream {
            kind: EnemyKind::Brute,
            count: scale(1 + (wave - 8), difficulty),
            start: 3.0,
            interval: 2.5,
        });
    }

    streams
}

fn scale(count: u32, difficulty: Difficulty) -> u32 {
    (count as f32 * difficulty.get()).ceil() as u32
}
