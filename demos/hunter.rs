//! Hunter Actor
//!
//! A headless actor that spins until it spots an enemy straight ahead,
//! charges it, and goes back to spinning after a kill or when the charge
//! runs too long. Once every enemy is gone an any-state transition ends it.
//!
//! Key concepts:
//! - Per-state transitions plus one any-state transition
//! - Self-dispatch from `on_update` (the charge timeout)
//! - External dispatch from the driver (sighting, collision)
//!
//! Run with: RUST_LOG=debug cargo run --example hunter

use hookstate::core::{Blueprint, Context, State};
use hookstate::machine::{MachineError, StateMachine};
use hookstate::state_enum;
use tracing_subscriber::EnvFilter;

const DT: f32 = 1.0 / 30.0;
const MAX_TICKS: usize = 3000;

state_enum! {
    enum Hunter {
        Rotation,
        MoveForward,
        End,
    }
    final: [End]
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum HunterEvent {
    Timeout,
    FindEnemy,
    DefeatEnemy,
    DefeatAllEnemy,
}

struct Arena {
    time: f32,
    position: (f32, f32),
    heading: f32,
    enemies: Vec<(f32, f32)>,
    spins: u32,
    active: bool,
}

impl Arena {
    fn forward(&self) -> (f32, f32) {
        let radians = self.heading.to_radians();
        (radians.cos(), radians.sin())
    }

    /// Whether an enemy sits inside a narrow cone ahead.
    fn sees_enemy(&self) -> bool {
        let (fx, fy) = self.forward();
        self.enemies.iter().any(|(ex, ey)| {
            let (dx, dy) = (ex - self.position.0, ey - self.position.1);
            let distance = (dx * dx + dy * dy).sqrt();
            distance > 0.0 && (dx * fx + dy * fy) / distance > 0.995
        })
    }

    /// Remove the first enemy touching the hunter.
    fn collide(&mut self) -> bool {
        let (px, py) = self.position;
        let hit = self
            .enemies
            .iter()
            .position(|(ex, ey)| (ex - px).powi(2) + (ey - py).powi(2) < 0.25);
        match hit {
            Some(index) => {
                self.enemies.swap_remove(index);
                true
            }
            None => false,
        }
    }
}

struct Rotation {
    direction: f32,
}

impl Rotation {
    const SPEED: f32 = 90.0;
}

impl State<HunterBrain> for Rotation {
    fn on_enter(&mut self, ctx: &mut Context<'_, HunterBrain>, _previous: Option<Hunter>) {
        // Alternate spin direction on every entry.
        let arena = ctx.owner_mut();
        arena.spins += 1;
        self.direction = if arena.spins % 2 == 0 { 1.0 } else { -1.0 };
    }

    fn on_update(&mut self, ctx: &mut Context<'_, HunterBrain>) {
        let arena = ctx.owner_mut();
        arena.heading = (arena.heading + Self::SPEED * self.direction * DT).rem_euclid(360.0);
    }
}

struct MoveForward {
    timeout_at: f32,
}

impl MoveForward {
    const SPEED: f32 = 2.0;
    const TIMEOUT: f32 = 1.0;
}

impl State<HunterBrain> for MoveForward {
    fn on_enter(&mut self, ctx: &mut Context<'_, HunterBrain>, _previous: Option<Hunter>) {
        self.timeout_at = ctx.owner().time + Self::TIMEOUT;
    }

    fn on_update(&mut self, ctx: &mut Context<'_, HunterBrain>) {
        let arena = ctx.owner_mut();
        let (fx, fy) = arena.forward();
        arena.position.0 += fx * Self::SPEED * DT;
        arena.position.1 += fy * Self::SPEED * DT;

        if self.timeout_at <= ctx.owner().time {
            ctx.dispatch(HunterEvent::Timeout);
        }
    }
}

struct End;

impl State<HunterBrain> for End {
    fn on_enter(&mut self, ctx: &mut Context<'_, HunterBrain>, _previous: Option<Hunter>) {
        ctx.owner_mut().active = false;
    }
}

struct HunterBrain;

impl Blueprint for HunterBrain {
    type Kind = Hunter;
    type Event = HunterEvent;
    type Owner = Arena;
    type Param = ();

    fn create(kind: Hunter) -> Box<dyn State<Self>> {
        match kind {
            Hunter::Rotation => Box::new(Rotation { direction: 1.0 }),
            Hunter::MoveForward => Box::new(MoveForward { timeout_at: 0.0 }),
            Hunter::End => Box::new(End),
        }
    }
}

/// One frame of the driver loop.
fn tick(machine: &mut StateMachine<HunterBrain>) -> Result<(), MachineError> {
    machine.owner_mut().time += DT;

    if machine.owner().enemies.is_empty() {
        machine.dispatch(HunterEvent::DefeatAllEnemy)?;
        return Ok(());
    }

    machine.update()?;

    if machine.owner().sees_enemy() {
        machine.dispatch(HunterEvent::FindEnemy)?;
    }

    if machine.owner_mut().collide() {
        tracing::info!(
            "Enemy defeated at t={:.2}s, {} left",
            machine.owner().time,
            machine.owner().enemies.len()
        );
        machine.dispatch(HunterEvent::DefeatEnemy)?;
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let arena = Arena {
        time: 0.0,
        position: (0.0, 0.0),
        heading: 0.0,
        enemies: vec![(3.0, 0.5), (-2.0, 2.0), (0.5, -3.0)],
        spins: 0,
        active: true,
    };

    let mut machine = StateMachine::<HunterBrain>::new(arena);

    // Spot an enemy: stop spinning and charge
    machine.add_transition(Hunter::Rotation, Hunter::MoveForward, HunterEvent::FindEnemy)?;
    // Kill or give up: spin again
    machine.add_transition(Hunter::MoveForward, Hunter::Rotation, HunterEvent::DefeatEnemy)?;
    machine.add_transition(Hunter::MoveForward, Hunter::Rotation, HunterEvent::Timeout)?;
    // Everything dead: stop for good
    machine.add_any_transition(Hunter::End, HunterEvent::DefeatAllEnemy)?;

    machine.start(Hunter::Rotation)?;

    let mut ticks = 0;
    while machine.owner().active && ticks < MAX_TICKS {
        tick(&mut machine)?;
        ticks += 1;
    }

    println!("Finished after {} ticks in state {:?}", ticks, machine.current());
    println!("Enemies left: {}", machine.owner().enemies.len());
    println!("Transitions kept in history: {}", machine.history().len());

    Ok(())
}
