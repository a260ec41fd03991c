use std::cell::RefCell;
use std::rc::Rc;

use broadcaster::{Broadcaster, Function, Method};
use colored::Colorize;

use crate::error::SimulationError;
use crate::option::{SimulationOption, StepOpts, TargetOpts};

pub type Bus = Broadcaster<String, i64>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Counter {
    pub count: u64,
    pub total: i64,
}

impl Counter {
    fn increment(&mut self, _event: String, _value: i64) {
        self.count += 1;
    }

    fn add(&mut self, _event: String, value: i64) {
        self.count += 1;
        self.total += value;
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Recorder {
    pub entries: Vec<(String, i64)>,
}

impl Recorder {
    fn record(&mut self, event: String, value: i64) {
        self.entries.push((event, value));
    }
}

#[derive(Clone)]
enum Object {
    Counter(Rc<RefCell<Counter>>),
    Recorder(Rc<RefCell<Recorder>>),
}

impl Object {
    fn new(kind: &str) -> Result<Object, SimulationError> {
        match kind {
            "counter" => Ok(Object::Counter(Rc::new(RefCell::new(Counter::default())))),
            "recorder" => Ok(Object::Recorder(Rc::new(RefCell::new(Recorder::default())))),
            _ => Err(SimulationError::UnknownKind(kind.to_string())),
        }
    }

    fn state(&self) -> ObjectState {
        match self {
            Object::Counter(counter) => ObjectState::Counter(counter.borrow().clone()),
            Object::Recorder(recorder) => ObjectState::Recorder(recorder.borrow().clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectState {
    Counter(Counter),
    Recorder(Recorder),
}

#[derive(Debug)]
pub struct Report {
    pub dispatched: usize,
    pub objects: Vec<(String, ObjectState)>,
}

impl Report {
    pub fn object(&self, name: &str) -> Option<&ObjectState> {
        self.objects.iter().find(|(n, _)| n == name).map(|(_, state)| state)
    }
}

fn print(event: String, value: i64) {
    println!("{} {} {}", "->".dimmed(), event.cyan(), value);
}

fn audit(event: String, value: i64) {
    log::info!("audit {} {}", event, value);
}

fn function_handler(name: &str) -> Result<Function<String, i64>, SimulationError> {
    let handler: Function<String, i64> = match name {
        "print" => print,
        "audit" => audit,
        _ => return Err(SimulationError::UnknownHandler(name.to_string())),
    };
    Ok(handler)
}

fn counter_method(name: &str) -> Result<Method<Counter, String, i64>, SimulationError> {
    let method: Method<Counter, String, i64> = match name {
        "increment" => Counter::increment,
        "add" => Counter::add,
        _ => return Err(unknown_method("counter", name)),
    };
    Ok(method)
}

fn recorder_method(name: &str) -> Result<Method<Recorder, String, i64>, SimulationError> {
    let method: Method<Recorder, String, i64> = match name {
        "record" => Recorder::record,
        _ => return Err(unknown_method("recorder", name)),
    };
    Ok(method)
}

fn unknown_method(kind: &str, method: &str) -> SimulationError {
    SimulationError::UnknownMethod {
        kind: kind.to_string(),
        method: method.to_string(),
    }
}

/// A scripted run of a signal bus: named objects, and a list of steps that
/// subscribe, unsubscribe and dispatch on one shared [`Bus`].
pub struct Simulation {
    steps: Vec<StepOpts>,
    bus: Bus,
    objects: Vec<(String, Object)>,
    dispatched: usize,
}

impl Simulation {
    pub fn new(opts: SimulationOption) -> Result<Self, SimulationError> {
        let mut objects: Vec<(String, Object)> = Vec::with_capacity(opts.objects.len());
        for obj in &opts.objects {
            if objects.iter().any(|(name, _)| *name == obj.name) {
                return Err(SimulationError::DuplicateObject(obj.name.clone()));
            }
            objects.push((obj.name.clone(), Object::new(&obj.kind)?));
        }
        log::debug!("simulation with {} object(s), {} step(s)", objects.len(), opts.steps.len());
        Ok(Simulation {
            steps: opts.steps,
            bus: Bus::new(),
            objects,
            dispatched: 0,
        })
    }

    pub fn run(mut self) -> Result<Report, SimulationError> {
        let steps = std::mem::take(&mut self.steps);
        for (index, step) in steps.iter().enumerate() {
            log::debug!("step {}: {:?}", index, step);
            self.step(step)?;
        }
        Ok(Report {
            dispatched: self.dispatched,
            objects: self.objects.iter().map(|(name, obj)| (name.clone(), obj.state())).collect(),
        })
    }

    fn step(&mut self, step: &StepOpts) -> Result<(), SimulationError> {
        match step {
            StepOpts::Subscribe(target) => self.bind(target, true),
            StepOpts::Unsubscribe(target) => self.bind(target, false),
            StepOpts::Dispatch { event, value } => {
                self.bus.dispatch(event.clone(), *value);
                self.dispatched += 1;
                Ok(())
            }
            StepOpts::Release { object } => {
                let index = self
                    .objects
                    .iter()
                    .position(|(name, _)| name == object)
                    .ok_or_else(|| SimulationError::UnknownObject(object.clone()))?;
                self.objects.remove(index);
                log::info!("released {}", object);
                Ok(())
            }
            StepOpts::Clear => {
                self.bus.clear();
                Ok(())
            }
        }
    }

    fn bind(&mut self, target: &TargetOpts, subscribe: bool) -> Result<(), SimulationError> {
        let event = target.event.clone();
        match (&target.handler, &target.object, &target.method) {
            (Some(handler), _, _) => {
                let handler = function_handler(handler)?;
                if subscribe {
                    self.bus.subscribe(event, handler);
                } else {
                    self.bus.unsubscribe(&event, handler);
                }
            }
            (None, Some(object), Some(method)) => match self.object(object)? {
                Object::Counter(counter) => {
                    let method = counter_method(method)?;
                    if subscribe {
                        self.bus.subscribe_method(event, &counter, method);
                    } else {
                        self.bus.unsubscribe_method(&event, &counter, method);
                    }
                }
                Object::Recorder(recorder) => {
                    let method = recorder_method(method)?;
                    if subscribe {
                        self.bus.subscribe_method(event, &recorder, method);
                    } else {
                        self.bus.unsubscribe_method(&event, &recorder, method);
                    }
                }
            },
            _ => return Err(SimulationError::MissingTarget(event)),
        }
        Ok(())
    }

    fn object(&self, name: &str) -> Result<Object, SimulationError> {
        self.objects
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, obj)| obj.clone())
            .ok_or_else(|| SimulationError::UnknownObject(name.to_string()))
    }
}
