//! Scripted streams and a tracing interpreter for checking composition laws.

use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    build::{demand, emit, lift},
    effect::Io,
    stream::{Stream, View},
};

/// Observable event of a traced run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Emit(u32),
    Await(u32),
    Effect(u32),
    Return(String),
    Cutoff,
}

/// Shared event log. Clones append to the same log.
#[derive(Clone, Default)]
pub(crate) struct Recorder {
    log: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    const STEP_LIMIT: usize = 100_000;

    pub(crate) fn record(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }

    /// Drives `stream` to completion and returns everything observed on the way.
    ///
    /// Demands are answered with `seed`, `seed + 1`, ... in order, and emissions are
    /// accepted as soon as they appear. Effects record themselves when performed.
    pub(crate) fn trace<R: fmt::Debug>(&self, stream: Stream<'_, u32, u32, Io, R>, seed: u64) -> Vec<Event> {
        self.log.borrow_mut().clear();
        let mut input = seed as u32;
        let mut stream = stream;
        for _ in 0..Self::STEP_LIMIT {
            stream = match stream.view() {
                View::Pure(r) => {
                    self.record(Event::Return(format!("{r:?}")));
                    return self.log.take();
                }
                View::Effect(action) => Io::perform(action),
                View::Emit(value, resume) => {
                    self.record(Event::Emit(value));
                    resume()
                }
                View::Await(receive) => {
                    self.record(Event::Await(input));
                    let supplied = input;
                    input = input.wrapping_add(1);
                    receive(supplied)
                }
            };
        }
        self.record(Event::Cutoff);
        self.log.take()
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Emit(u32),
    Await,
    Effect(u32),
}

/// A randomly generated straight-line stage: a few emits, demands and effects
/// followed by a return.
///
/// Emitted values and the result mix in everything demanded so far, so two traces
/// only match when the same inputs reached the same places.
#[derive(Debug, Clone)]
pub(crate) struct Script {
    ops: Rc<[Op]>,
    ret: u32,
}

impl Script {
    pub(crate) fn generate(seed: u64) -> Self {
        let mut state = seed;
        let mut next_u32 = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 32) as u32
        };

        let len = next_u32() % 6;
        let ops = (0..len)
            .map(|_| match next_u32() % 3 {
                0 => Op::Emit(next_u32() % 1000),
                1 => Op::Await,
                _ => Op::Effect(next_u32() % 1000),
            })
            .collect();
        Script { ops, ret: next_u32() % 1000 }
    }

    /// The script as a stage finishing with its mixed result.
    pub(crate) fn build(&self, recorder: &Recorder) -> Stream<'static, u32, u32, Io, u32> {
        steps(Rc::clone(&self.ops), 0, self.ret, recorder.clone())
    }

    /// The script as a `for_each` body: `x` seeds the mix, and the result is dropped.
    pub(crate) fn build_body(&self, recorder: &Recorder, x: u32) -> Stream<'static, u32, u32, Io, ()> {
        steps(Rc::clone(&self.ops), 0, self.ret ^ x, recorder.clone()).map_return(|_| ())
    }
}

fn steps(ops: Rc<[Op]>, index: usize, acc: u32, recorder: Recorder) -> Stream<'static, u32, u32, Io, u32> {
    let Some(op) = ops.get(index).copied() else {
        return Stream::pure(acc);
    };
    match op {
        Op::Emit(value) => emit(value.wrapping_add(acc)).and_then(move |()| steps(ops, index + 1, acc, recorder)),
        Op::Await => {
            demand().and_then(move |x: u32| steps(ops, index + 1, acc.wrapping_mul(31).wrapping_add(x), recorder))
        }
        Op::Effect(label) => {
            let noted = recorder.clone();
            lift(Io::delay(move || noted.record(Event::Effect(label))))
                .and_then(move |()| steps(ops, index + 1, acc, recorder))
        }
    }
}
