use glam::IVec3;

use plume_core::direction::Direction;
use plume_core::settings::{SmokeSettings, WindConstraint};
use plume_core::types::{GridCoord, MaterialId};

use crate::error::PersistError;
use crate::format::{RawLedgerEntry, RawSource, NO_WIND};

/// Everything persisted about one source. Particles are transient and never
/// stored; the ledger keeps the cells the source was showing smoke in.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    pub anchor: GridCoord,
    pub anchor_material: MaterialId,
    pub settings: SmokeSettings,
    pub ledger: Vec<(GridCoord, u32)>,
}

impl SourceRecord {
    pub(crate) fn to_raw(&self) -> RawSource {
        let s = &self.settings;
        let (wind_from, wind_to) = match s.wind {
            Some(window) => (window.from.ordinal(), window.to.ordinal()),
            None => (NO_WIND, NO_WIND),
        };
        RawSource {
            anchor: self.anchor.to_array(),
            anchor_material: self.anchor_material.0,
            smoke_material: s.smoke_material.0,
            density_min: s.density_min,
            density_max: s.density_max,
            max_distance: s.max_distance,
            decay_chance: s.decay_chance,
            wind_from,
            wind_to,
            random_spread: u8::from(s.random_spread),
            _pad: 0,
            ledger_len: self.ledger.len() as u32,
        }
    }

    pub(crate) fn ledger_to_raw(&self) -> impl Iterator<Item = RawLedgerEntry> + '_ {
        self.ledger.iter().map(|(coord, count)| RawLedgerEntry {
            coord: coord.to_array(),
            count: *count,
        })
    }

    pub(crate) fn from_raw(raw: &RawSource, ledger: Vec<(GridCoord, u32)>) -> Result<Self, PersistError> {
        let wind = match (raw.wind_from, raw.wind_to) {
            (NO_WIND, NO_WIND) => None,
            (from, to) => Some(WindConstraint::new(decode_direction(from)?, decode_direction(to)?)),
        };
        Ok(Self {
            anchor: IVec3::from_array(raw.anchor),
            anchor_material: MaterialId(raw.anchor_material),
            settings: SmokeSettings {
                smoke_material: MaterialId(raw.smoke_material),
                density_min: raw.density_min,
                density_max: raw.density_max,
                decay_chance: raw.decay_chance,
                max_distance: raw.max_distance,
                wind,
                random_spread: raw.random_spread != 0,
            },
            ledger,
        })
    }
}

fn decode_direction(code: u8) -> Result<Direction, PersistError> {
    if code < 8 {
        Ok(Direction::from_ordinal(i32::from(code)))
    } else {
        Err(PersistError::InvalidDirection(code))
    }
}
