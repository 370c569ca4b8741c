//! Wandering Enemies
//!
//! Several headless enemies, each with its own machine. They stand still
//! until only one of them is left; the survivor then alternates between
//! walking and waiting on timers it dispatches to itself.
//!
//! Key concepts:
//! - One independent machine per owner
//! - Branching on the current state from the driver
//! - Timeouts dispatched from `on_update`
//!
//! Run with: RUST_LOG=debug cargo run --example wanderer

use hookstate::core::{Blueprint, Context, State};
use hookstate::machine::{MachineError, StateMachine};
use hookstate::state_enum;
use tracing_subscriber::EnvFilter;

const DT: f32 = 1.0 / 30.0;
const TICKS: usize = 600;
const CULL_EVERY: usize = 90;

state_enum! {
    enum Wander {
        Stop,
        RandomWalk,
        RandomWait,
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum WanderEvent {
    Timeout,
    LastOne,
}

struct Body {
    id: usize,
    time: f32,
    position: (f32, f32),
    heading: f32,
    legs: u32,
}

impl Body {
    /// Deterministic stand-in for a random draw in `min..max`.
    fn jitter(&self, min: f32, max: f32) -> f32 {
        let step = ((self.legs as usize + self.id * 7) % 10) as f32 / 10.0;
        min + (max - min) * step
    }
}

struct RandomWait {
    timeout_at: f32,
}

impl State<EnemyBrain> for RandomWait {
    fn on_enter(&mut self, ctx: &mut Context<'_, EnemyBrain>, _previous: Option<Wander>) {
        let body = ctx.owner();
        self.timeout_at = body.time + body.jitter(0.5, 1.0);
    }

    fn on_update(&mut self, ctx: &mut Context<'_, EnemyBrain>) {
        if self.timeout_at <= ctx.owner().time {
            ctx.dispatch(WanderEvent::Timeout);
        }
    }
}

struct RandomWalk {
    timeout_at: f32,
}

impl RandomWalk {
    const SPEED: f32 = 4.0;
}

impl State<EnemyBrain> for RandomWalk {
    fn on_enter(&mut self, ctx: &mut Context<'_, EnemyBrain>, _previous: Option<Wander>) {
        let body = ctx.owner_mut();
        body.legs += 1;
        self.timeout_at = body.time + body.jitter(0.5, 1.0);
        body.heading = (body.heading + body.jitter(0.0, 360.0)).rem_euclid(360.0);

        tracing::info!(
            "Enemy {} walks off at {:.0} degrees",
            body.id,
            body.heading
        );
    }

    fn on_update(&mut self, ctx: &mut Context<'_, EnemyBrain>) {
        let body = ctx.owner_mut();
        let radians = body.heading.to_radians();
        body.position.0 += radians.cos() * Self::SPEED * DT;
        body.position.1 += radians.sin() * Self::SPEED * DT;

        if self.timeout_at <= ctx.owner().time {
            ctx.dispatch(WanderEvent::Timeout);
        }
    }
}

struct Stop;

impl State<EnemyBrain> for Stop {}

struct EnemyBrain;

impl Blueprint for EnemyBrain {
    type Kind = Wander;
    type Event = WanderEvent;
    type Owner = Body;
    type Param = ();

    fn create(kind: Wander) -> Box<dyn State<Self>> {
        match kind {
            Wander::Stop => Box::new(Stop),
            Wander::RandomWalk => Box::new(RandomWalk { timeout_at: 0.0 }),
            Wander::RandomWait => Box::new(RandomWait { timeout_at: 0.0 }),
        }
    }
}

fn spawn(id: usize) -> Result<StateMachine<EnemyBrain>, MachineError> {
    let body = Body {
        id,
        time: 0.0,
        position: (id as f32 * 2.0, 0.0),
        heading: 0.0,
        legs: 0,
    };
    let mut machine = StateMachine::new(body);

    // Start moving once alone
    machine.add_transition(Wander::Stop, Wander::RandomWalk, WanderEvent::LastOne)?;
    // Alternate walking and waiting on timers
    machine.add_transition(Wander::RandomWalk, Wander::RandomWait, WanderEvent::Timeout)?;
    machine.add_transition(Wander::RandomWait, Wander::RandomWalk, WanderEvent::Timeout)?;

    machine.start(Wander::Stop)?;
    Ok(machine)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut enemies = (0..4).map(spawn).collect::<Result<Vec<_>, _>>()?;

    for tick in 1..=TICKS {
        if tick % CULL_EVERY == 0 && enemies.len() > 1 {
            let culled = enemies.remove(0);
            tracing::info!("Enemy {} destroyed", culled.owner().id);
        }

        let alone = enemies.len() == 1;
        for machine in &mut enemies {
            machine.owner_mut().time += DT;
            machine.update()?;

            if machine.is_in(Wander::Stop) && alone {
                machine.dispatch(WanderEvent::LastOne)?;
            }
        }
    }

    for machine in &enemies {
        let body = machine.owner();
        println!(
            "Enemy {} ended in {:?} at ({:.1}, {:.1}) after {} walks",
            body.id,
            machine.current(),
            body.position.0,
            body.position.1,
            body.legs
        );
    }

    Ok(())
}
