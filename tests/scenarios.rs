//! End-to-end scenarios driving a machine the way a game loop would.

use hookstate::core::{Blueprint, Context, State};
use hookstate::machine::{Dispatch, MachineError, StateMachine};
use hookstate::state_enum;
use hookstate::{MachineBuilder, MachineConfig};

state_enum! {
    enum Step {
        A,
        B,
        C,
    }
    final: [C]
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Signal {
    Next = 1,
    Finish = 2,
    Reset = 9,
}

#[derive(Clone, Debug, PartialEq)]
enum Payload {
    Reason(&'static str),
    Score(u32),
}

#[derive(Default)]
struct Journal {
    lines: Vec<String>,
    payloads: Vec<Payload>,
}

struct Logged {
    step: Step,
    follow_up: Option<Signal>,
}

impl State<Flow> for Logged {
    fn on_enter(&mut self, ctx: &mut Context<'_, Flow>, previous: Option<Step>) {
        let line = format!("{:?}.enter({:?})", self.step, previous);
        ctx.owner_mut().lines.push(line);
        if let Some(payload) = ctx.param().cloned() {
            ctx.owner_mut().payloads.push(payload);
        }
        if let Some(signal) = self.follow_up {
            ctx.dispatch(signal);
        }
    }

    fn on_exit(&mut self, ctx: &mut Context<'_, Flow>, next: Option<Step>) {
        let line = format!("{:?}.exit({:?})", self.step, next);
        ctx.owner_mut().lines.push(line);
    }
}

struct Flow;

impl Blueprint for Flow {
    type Kind = Step;
    type Event = Signal;
    type Owner = Journal;
    type Param = Payload;

    fn create(step: Step) -> Box<dyn State<Self>> {
        Box::new(Logged {
            step,
            follow_up: None,
        })
    }
}

fn lines(machine: &StateMachine<Flow>) -> Vec<&str> {
    machine.owner().lines.iter().map(String::as_str).collect()
}

#[test]
fn wildcard_and_ignored_events() {
    let mut machine = StateMachine::<Flow>::new(Journal::default());
    machine.add_transition(Step::A, Step::B, Signal::Next).unwrap();
    machine.add_transition(Step::B, Step::C, Signal::Finish).unwrap();
    machine.add_any_transition(Step::A, Signal::Reset).unwrap();

    machine.start(Step::A).unwrap();
    assert_eq!(machine.current(), Some(Step::A));

    machine.dispatch(Signal::Next).unwrap();
    assert_eq!(machine.current(), Some(Step::B));

    machine.dispatch(Signal::Reset).unwrap();
    assert_eq!(machine.current(), Some(Step::A));

    let outcome = machine.dispatch(Signal::Finish).unwrap();
    assert_eq!(outcome, Dispatch::Ignored);
    assert_eq!(machine.current(), Some(Step::A));

    assert_eq!(
        lines(&machine),
        vec![
            "A.enter(None)",
            "A.exit(Some(B))",
            "B.enter(Some(A))",
            "B.exit(Some(A))",
            "A.enter(Some(B))"
        ]
    );
}

#[test]
fn self_dispatch_chain_completes_inside_start() {
    let mut machine = StateMachine::<Flow>::new(Journal::default());
    machine
        .insert(
            Step::A,
            Box::new(Logged {
                step: Step::A,
                follow_up: Some(Signal::Next),
            }),
        )
        .unwrap();
    machine
        .insert(
            Step::B,
            Box::new(Logged {
                step: Step::B,
                follow_up: Some(Signal::Finish),
            }),
        )
        .unwrap();
    machine.add_transition(Step::A, Step::B, Signal::Next).unwrap();
    machine.add_transition(Step::B, Step::C, Signal::Finish).unwrap();

    machine.start(Step::A).unwrap();

    assert_eq!(machine.current(), Some(Step::C));
    assert!(machine.is_final());
    assert_eq!(
        lines(&machine),
        vec![
            "A.enter(None)",
            "A.exit(Some(B))",
            "B.enter(Some(A))",
            "B.exit(Some(C))",
            "C.enter(Some(B))"
        ]
    );
}

#[test]
fn wildcard_shadows_state_transition() {
    let mut machine = StateMachine::<Flow>::new(Journal::default());
    machine.add_transition(Step::B, Step::C, Signal::Reset).unwrap();
    machine.add_transition(Step::A, Step::B, Signal::Next).unwrap();
    machine.add_any_transition(Step::A, Signal::Reset).unwrap();
    machine.start(Step::A).unwrap();
    machine.dispatch(Signal::Next).unwrap();

    let outcome = machine.dispatch(Signal::Reset).unwrap();

    assert_eq!(
        outcome,
        Dispatch::Transitioned {
            from: Step::B,
            to: Step::A
        }
    );
}

#[test]
fn payloads_reach_the_entered_state() {
    let mut machine = StateMachine::<Flow>::new(Journal::default());
    machine.add_transition(Step::A, Step::B, Signal::Next).unwrap();
    machine.add_any_transition(Step::C, Signal::Finish).unwrap();

    machine
        .start_with(Step::A, Payload::Reason("spawned"))
        .unwrap();
    machine.dispatch(Signal::Next).unwrap();
    assert_eq!(machine.param(), None);

    machine
        .dispatch_with(Signal::Finish, Payload::Score(7))
        .unwrap();
    assert_eq!(machine.param(), Some(&Payload::Score(7)));

    assert_eq!(
        machine.owner().payloads,
        vec![Payload::Reason("spawned"), Payload::Score(7)]
    );
}

#[test]
fn usage_errors_leave_machine_untouched() {
    let mut machine = StateMachine::<Flow>::new(Journal::default());
    machine.add_transition(Step::A, Step::B, Signal::Next).unwrap();

    let err = machine.dispatch(Signal::Next).unwrap_err();
    assert!(err.is_usage_error());
    assert!(matches!(machine.update(), Err(MachineError::NotStarted)));

    machine.start(Step::A).unwrap();
    let err = machine.start(Step::B).unwrap_err();
    assert!(err.is_usage_error());

    assert_eq!(machine.current(), Some(Step::A));
    assert_eq!(lines(&machine), vec!["A.enter(None)"]);
}

#[test]
fn builder_definition_drives_like_manual_registration() {
    let mut machine = MachineBuilder::<Flow>::new(Journal::default())
        .config(MachineConfig::default().with_history_capacity(2))
        .strict()
        .states([Step::A, Step::B, Step::C])
        .transition(Step::A, Step::B, Signal::Next)
        .transition(Step::B, Step::C, Signal::Finish)
        .any_transition(Step::A, Signal::Reset)
        .build()
        .unwrap();

    machine.start(Step::A).unwrap();
    machine.dispatch(Signal::Next).unwrap();
    machine.dispatch(Signal::Finish).unwrap();

    assert_eq!(machine.current(), Some(Step::C));
    assert_eq!(machine.history().len(), 2);
    assert_eq!(
        machine.history().get_path(),
        vec![&Step::A, &Step::B, &Step::C]
    );
}

#[test]
fn history_serializes_for_diagnostics() {
    state_enum! {
        enum Phase {
            Idle,
            Busy,
        }
    }

    struct Quiet;
    impl State<Phases> for Quiet {}

    struct Phases;
    impl Blueprint for Phases {
        type Kind = Phase;
        type Event = u8;
        type Owner = ();
        type Param = ();

        fn create(_kind: Phase) -> Box<dyn State<Self>> {
            Box::new(Quiet)
        }
    }

    let mut machine = StateMachine::<Phases>::new(());
    machine.add_transition(Phase::Idle, Phase::Busy, 1).unwrap();
    machine.start(Phase::Idle).unwrap();
    machine.dispatch(1).unwrap();

    let json = serde_json::to_value(machine.history()).unwrap();
    let transitions = json["transitions"].as_array().unwrap();
    assert_eq!(transitions.len(), 2);
    assert_eq!(transitions[1]["from"], "Idle");
    assert_eq!(transitions[1]["to"], "Busy");
    assert_eq!(transitions[1]["event"], 1);
}
