//! Particle burst recipes
//!
//! Pure visuals. Functions take the particle list and RNG separately so they
//! can be called while other parts of `GameState` are borrowed.

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::rgb;

pub const HEAL_COLOR: u32 = rgb(0x44, 0xff, 0x44);
pub const SHIELD_COLOR: u32 = rgb(0x88, 0x88, 0xff);
pub const HIT_COLOR: u32 = rgb(0xff, 0xff, 0xff);
pub const EXPLOSION_COLOR: u32 = rgb(0xff, 0xaa, 0x44);

/// Shape of one burst
struct Burst {
    count: usize,
    /// Full width of the square the particles start in
    spread: f32,
    /// Full width of the velocity range on each axis
    velocity: f32,
    min_radius: f32,
    radius_range: f32,
    color: u32,
    life: u32,
}

fn jitter<R: Rng>(rng: &mut R, width: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * width
}

fn emit<R: Rng>(particles: &mut Vec<Particle>, rng: &mut R, origin: Vec2, burst: Burst) {
    particles.reserve(burst.count);
    for _ in 0..burst.count {
        let pos = origin + Vec2::new(jitter(rng, burst.spread), jitter(rng, burst.spread));
        let vel = Vec2::new(jitter(rng, burst.velocity), jitter(rng, burst.velocity));
        particles.push(Particle {
            pos,
            vel,
            radius: rng.random::<f32>() * burst.radius_range + burst.min_radius,
            color: burst.color,
            life: burst.life,
        });
    }
}

/// Green sparkle around the player
pub fn heal_burst<R: Rng>(particles: &mut Vec<Particle>, rng: &mut R, at: Vec2) {
    emit(particles, rng, at, Burst {
        count: 20,
        spread: 40.0,
        velocity: 4.0,
        min_radius: 1.0,
        radius_range: 3.0,
        color: HEAL_COLOR,
        life: 30,
    });
}

/// Slow halo when the shield goes up
pub fn shield_burst<R: Rng>(particles: &mut Vec<Particle>, rng: &mut R, at: Vec2) {
    emit(particles, rng, at, Burst {
        count: 30,
        spread: 50.0,
        velocity: 2.0,
        min_radius: 1.0,
        radius_range: 2.0,
        color: SHIELD_COLOR,
        life: 60,
    });
}

/// Spark where the shield repels an enemy
pub fn shield_hit_burst<R: Rng>(particles: &mut Vec<Particle>, rng: &mut R, at: Vec2) {
    emit(particles, rng, at, Burst {
        count: 15,
        spread: 0.0,
        velocity: 8.0,
        min_radius: 2.0,
        radius_range: 3.0,
        color: SHIELD_COLOR,
        life: 30,
    });
}

/// Small impact burst
pub fn hit_burst<R: Rng>(particles: &mut Vec<Particle>, rng: &mut R, at: Vec2, color: u32) {
    emit(particles, rng, at, Burst {
        count: 8,
        spread: 0.0,
        velocity: 6.0,
        min_radius: 1.0,
        radius_range: 2.0,
        color,
        life: 20,
    });
}

/// Enemy death or bomber detonation
pub fn explosion_burst<R: Rng>(particles: &mut Vec<Particle>, rng: &mut R, at: Vec2) {
    emit(particles, rng, at, Burst {
        count: 15,
        spread: 0.0,
        velocity: 8.0,
        min_radius: 2.0,
        radius_range: 4.0,
        color: EXPLOSION_COLOR,
        life: 40,
    });
}
