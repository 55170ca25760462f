use glam::IVec3;

use plume_core::constants::SPREAD_ROLL_SIDES;
use plume_core::math::distance;
use plume_core::random::RandomSource;
use plume_core::settings::SmokeSettings;
use plume_core::types::GridCoord;
use plume_core::voxel::VoxelWorld;

use crate::ledger::OccupancyLedger;
use crate::tiers::{MAX_TIER_LEN, MOVEMENT_TIERS};
use crate::wind::WindState;

/// What a particle's source looks like from the particle's side: configuration
/// only. Ledger updates go through the `&mut OccupancyLedger` handed to `tick`.
#[derive(Debug, Clone, Copy)]
pub struct SourceView<'a> {
    pub anchor: GridCoord,
    pub settings: &'a SmokeSettings,
}

/// Outcome of one particle tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    /// Reached the world height ceiling.
    Ceiling,
    /// Drifted past the source's max distance.
    OutOfRange,
    /// Lost the decay roll.
    Decayed,
    /// No viable destination.
    Stuck,
    Moved(GridCoord),
}

impl Fate {
    pub fn is_alive(self) -> bool {
        matches!(self, Fate::Moved(_))
    }
}

/// One mobile unit of smoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Particle {
    pub position: GridCoord,
}

impl Particle {
    pub fn new(position: GridCoord) -> Self {
        Self { position }
    }

    /// Advance one tick. Every outcome leaves the ledger consistent: a dead
    /// particle has released its claim, a live one has moved it.
    pub fn tick<W, R>(
        &mut self,
        source: SourceView<'_>,
        world: &W,
        wind: &WindState,
        rng: &mut R,
        ledger: &mut OccupancyLedger,
    ) -> Fate
    where
        W: VoxelWorld + ?Sized,
        R: RandomSource + ?Sized,
    {
        let fate = self.decide(source, world, wind, rng);
        match fate {
            Fate::Moved(to) => {
                ledger.transfer(self.position, to);
                self.position = to;
            }
            _ => ledger.release(self.position),
        }
        log::trace!("particle at {:?}: {:?}", self.position, fate);
        fate
    }

    fn decide<W, R>(
        &self,
        source: SourceView<'_>,
        world: &W,
        wind: &WindState,
        rng: &mut R,
    ) -> Fate
    where
        W: VoxelWorld + ?Sized,
        R: RandomSource + ?Sized,
    {
        let settings = source.settings;
        if self.position.y >= world.max_height() {
            return Fate::Ceiling;
        }
        if distance(source.anchor, self.position) > settings.max_distance as f32 {
            return Fate::OutOfRange;
        }
        if rng.next_unit() < settings.decay_chance {
            return Fate::Decayed;
        }
        match self.search(settings, world, wind, rng) {
            Some(to) => Fate::Moved(to),
            None => Fate::Stuck,
        }
    }

    /// First viable destination: tiers in order, shuffled within a tier.
    fn search<W, R>(
        &self,
        settings: &SmokeSettings,
        world: &W,
        wind: &WindState,
        rng: &mut R,
    ) -> Option<GridCoord>
    where
        W: VoxelWorld + ?Sized,
        R: RandomSource + ?Sized,
    {
        let mut push = IVec3::ZERO;
        if settings.random_spread {
            push.x = spread_roll(rng);
            push.z = spread_roll(rng);
        }

        // The wind is named for where it blows from; smoke drifts the other way.
        let blowing_from = match settings.wind {
            Some(window) => window.apply(wind.direction),
            None => wind.direction,
        };
        let drift = blowing_from.offset() * wind.strength as i32;
        push.x -= drift.x;
        push.z -= drift.y;

        let mut scratch = [IVec3::ZERO; MAX_TIER_LEN];
        for tier in MOVEMENT_TIERS {
            let order = &mut scratch[..tier.len()];
            order.copy_from_slice(tier);
            if order.len() > 1 {
                rng.shuffle(order);
            }
            for offset in order.iter() {
                let candidate = self.position + *offset + push;
                if viable(settings, world, candidate, rng) {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

/// -1 or +1 on the two extreme faces of the die, 0 otherwise.
fn spread_roll<R: RandomSource + ?Sized>(rng: &mut R) -> i32 {
    match rng.next_below(SPREAD_ROLL_SIDES) {
        0 => -1,
        n if n == SPREAD_ROLL_SIDES - 1 => 1,
        _ => 0,
    }
}

fn viable<W, R>(settings: &SmokeSettings, world: &W, coord: GridCoord, rng: &mut R) -> bool
where
    W: VoxelWorld + ?Sized,
    R: RandomSource + ?Sized,
{
    if coord.y >= world.max_height() {
        return false;
    }
    let material = world.material_at(coord);
    if material.is_air() {
        return true;
    }
    if material == settings.smoke_material {
        return !settings.spreads() || rng.next_bool();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::{seeded, TestWorld};
    use plume_core::direction::Direction;
    use plume_core::settings::WindConstraint;
    use plume_core::types::MaterialId;

    const SMOKE: MaterialId = MaterialId(30);
    const STONE: MaterialId = MaterialId(1);

    fn settings() -> SmokeSettings {
        let mut s = SmokeSettings::new(SMOKE);
        s.decay_chance = 0.000_001;
        s.max_distance = 100;
        s
    }

    fn view(settings: &SmokeSettings) -> SourceView<'_> {
        SourceView {
            anchor: IVec3::new(0, 64, 0),
            settings,
        }
    }

    fn tick_once(p: &mut Particle, s: &SmokeSettings, world: &TestWorld, wind: WindState) -> Fate {
        let mut ledger = OccupancyLedger::new();
        ledger.add(p.position, 1);
        let fate = p.tick(view(s), world, &wind, &mut seeded(1), &mut ledger);
        assert_eq!(ledger.violations(), 0);
        fate
    }

    #[test]
    fn test_rises_into_open_air() {
        let s = settings();
        let world = TestWorld::new(256);
        let mut p = Particle::new(IVec3::new(0, 64, 0));
        let fate = tick_once(&mut p, &s, &world, WindState::calm());
        assert_eq!(fate, Fate::Moved(IVec3::new(0, 65, 0)));
        assert_eq!(p.position, IVec3::new(0, 65, 0));
    }

    #[test]
    fn test_ceiling_beats_everything() {
        let mut s = settings();
        s.decay_chance = 0.999_999;
        s.max_distance = 0;
        let world = TestWorld::new(64);
        let mut p = Particle::new(IVec3::new(0, 64, 0));
        assert_eq!(tick_once(&mut p, &s, &world, WindState::calm()), Fate::Ceiling);
    }

    #[test]
    fn test_out_of_range_before_decay() {
        let mut s = settings();
        s.decay_chance = 0.999_999;
        s.max_distance = 0;
        let world = TestWorld::new(256);
        let mut p = Particle::new(IVec3::new(0, 65, 0));
        assert_eq!(tick_once(&mut p, &s, &world, WindState::calm()), Fate::OutOfRange);

        // The anchor cell itself is in range even at zero distance.
        let mut at_anchor = Particle::new(IVec3::new(0, 64, 0));
        assert_eq!(
            tick_once(&mut at_anchor, &s, &world, WindState::calm()),
            Fate::Decayed
        );
    }

    #[test]
    fn test_dead_particle_releases_claim() {
        let mut s = settings();
        s.decay_chance = 0.999_999;
        let world = TestWorld::new(256);
        let mut ledger = OccupancyLedger::new();
        let mut p = Particle::new(IVec3::new(0, 64, 0));
        ledger.add(p.position, 1);
        let fate = p.tick(view(&s), &world, &WindState::calm(), &mut seeded(2), &mut ledger);
        assert_eq!(fate, Fate::Decayed);
        assert!(!fate.is_alive());
        assert_eq!(ledger.count(p.position), 0);
        assert_eq!(ledger.violations(), 0);
    }

    #[test]
    fn test_boxed_in_particle_is_stuck() {
        let s = settings();
        let mut world = TestWorld::new(256);
        let centre = IVec3::new(0, 64, 0);
        for tier in MOVEMENT_TIERS {
            for offset in tier {
                world.set_material(centre + *offset, STONE);
            }
        }
        let mut p = Particle::new(centre);
        assert_eq!(tick_once(&mut p, &s, &world, WindState::calm()), Fate::Stuck);
    }

    #[test]
    fn test_blocked_above_moves_to_lateral_rise() {
        let s = settings();
        let mut world = TestWorld::new(256);
        let start = IVec3::new(0, 64, 0);
        world.set_material(start + IVec3::Y, STONE);
        let mut p = Particle::new(start);
        match tick_once(&mut p, &s, &world, WindState::calm()) {
            Fate::Moved(to) => {
                assert_eq!(to.y, 65);
                assert_ne!(to, start + IVec3::Y);
            }
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn test_ceiling_candidates_not_viable() {
        let s = settings();
        let world = TestWorld::new(65);
        let mut p = Particle::new(IVec3::new(0, 64, 0));
        match tick_once(&mut p, &s, &world, WindState::calm()) {
            Fate::Moved(to) => assert_eq!(to.y, 64, "must stay below the ceiling"),
            other => panic!("expected a lateral move, got {other:?}"),
        }
    }

    #[test]
    fn test_wind_pushes_opposite_its_origin() {
        let s = settings();
        let world = TestWorld::new(256);
        let wind = WindState {
            direction: Direction::East,
            strength: 2,
        };
        let mut p = Particle::new(IVec3::new(0, 64, 0));
        assert_eq!(
            tick_once(&mut p, &s, &world, wind),
            Fate::Moved(IVec3::new(-2, 65, 0))
        );
    }

    #[test]
    fn test_wind_window_constrains_push() {
        let mut s = settings();
        s.wind = Some(WindConstraint::fixed(Direction::South));
        let world = TestWorld::new(256);
        let wind = WindState {
            direction: Direction::East,
            strength: 1,
        };
        let mut p = Particle::new(IVec3::new(0, 64, 0));
        // Wind from the south pushes north (negative z).
        assert_eq!(
            tick_once(&mut p, &s, &world, wind),
            Fate::Moved(IVec3::new(0, 65, -1))
        );
    }

    #[test]
    fn test_random_spread_stays_within_one_cell() {
        let mut s = settings();
        s.random_spread = true;
        let world = TestWorld::new(256);
        let mut rng = seeded(8);
        let mut jittered = 0;
        for _ in 0..500 {
            let mut ledger = OccupancyLedger::new();
            let mut p = Particle::new(IVec3::new(0, 64, 0));
            ledger.add(p.position, 1);
            match p.tick(view(&s), &world, &WindState::calm(), &mut rng, &mut ledger) {
                Fate::Moved(to) => {
                    assert_eq!(to.y, 65);
                    assert!(to.x.abs() <= 1 && to.z.abs() <= 1);
                    if to.x != 0 || to.z != 0 {
                        jittered += 1;
                    }
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        // Two rolls with 2/9 odds each: roughly 40% of moves jitter.
        assert!((100..300).contains(&jittered), "jittered {jittered} of 500");
    }

    #[test]
    fn test_single_density_joins_own_smoke() {
        let s = settings();
        let mut world = TestWorld::new(256);
        let start = IVec3::new(0, 64, 0);
        world.set_material(start + IVec3::Y, SMOKE);
        let mut p = Particle::new(start);
        assert_eq!(
            tick_once(&mut p, &s, &world, WindState::calm()),
            Fate::Moved(start + IVec3::Y)
        );
    }

    #[test]
    fn test_dense_source_sometimes_skips_own_smoke() {
        let mut s = settings();
        s.density_max = 3;
        let mut world = TestWorld::new(256);
        let start = IVec3::new(0, 64, 0);
        world.set_material(start + IVec3::Y, SMOKE);
        let mut rng = seeded(21);
        let (mut joined, mut skipped) = (0, 0);
        for _ in 0..400 {
            let mut ledger = OccupancyLedger::new();
            let mut p = Particle::new(start);
            ledger.add(start, 1);
            match p.tick(view(&s), &world, &WindState::calm(), &mut rng, &mut ledger) {
                Fate::Moved(to) if to == start + IVec3::Y => joined += 1,
                Fate::Moved(_) => skipped += 1,
                other => panic!("unexpected {other:?}"),
            }
        }
        assert!(joined > 120 && skipped > 120, "joined {joined}, skipped {skipped}");
    }

    #[test]
    fn test_order_independent_outcome() {
        let s = settings();
        let mut world = TestWorld::new(256);
        world.set_material(IVec3::new(0, 65, 0), STONE);
        let starts = [IVec3::new(0, 64, 0), IVec3::new(3, 64, 3), IVec3::new(0, 64, 0)];

        let run = |order: &[usize]| {
            let mut ledger = OccupancyLedger::new();
            let mut particles: Vec<Particle> = starts.iter().map(|&c| Particle::new(c)).collect();
            for p in &particles {
                ledger.add(p.position, 1);
            }
            for &i in order {
                // Each particle draws from its own stream.
                let mut rng = seeded(100 + i as u64);
                particles[i].tick(view(&s), &world, &WindState::calm(), &mut rng, &mut ledger);
            }
            ledger.sorted_entries()
        };

        assert_eq!(run(&[0, 1, 2]), run(&[2, 0, 1]));
        assert_eq!(run(&[0, 1, 2]), run(&[1, 2, 0]));
    }
}
